//! # Meter, Counter and Register Arrays
//!
//! Meters and counters are either direct (one cell per entry of a bound
//! table, so the size is only known at runtime) or indexed (explicit size).
//! Register arrays are always indexed.

use crate::entity::{Identity, NamedEntity};
use crate::kinds::MeterType;
use serde::Serialize;
use std::fmt;

/// Addressing mode of a stateful array
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "addressing", rename_all = "lowercase")]
pub enum ArrayBinding {
    /// Bound 1:1 to the entries of the named table
    Direct { table: String },
    /// Addressed by an index in `0..size`
    Indexed { size: u64 },
}

impl ArrayBinding {
    #[inline]
    pub fn is_direct(&self) -> bool {
        matches!(self, ArrayBinding::Direct { .. })
    }

    /// Bound table name (direct arrays only)
    pub fn table(&self) -> Option<&str> {
        match self {
            ArrayBinding::Direct { table } => Some(table),
            ArrayBinding::Indexed { .. } => None,
        }
    }

    /// Declared size (indexed arrays only)
    pub fn size(&self) -> Option<u64> {
        match self {
            ArrayBinding::Direct { .. } => None,
            ArrayBinding::Indexed { size } => Some(*size),
        }
    }
}

impl fmt::Display for ArrayBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayBinding::Direct { table } => write!(f, "direct({})", table),
            ArrayBinding::Indexed { size } => write!(f, "indexed({})", size),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MeterArray {
    #[serde(flatten)]
    pub identity: Identity,
    pub binding: ArrayBinding,
    pub meter_type: MeterType,
    /// Number of rates (e.g. 2 for a two-rate three-color meter)
    pub rate_count: u32,
}

impl MeterArray {
    pub fn new(
        name: impl Into<String>,
        id: i64,
        binding: ArrayBinding,
        meter_type: MeterType,
        rate_count: u32,
    ) -> Self {
        Self {
            identity: Identity::new(name, id),
            binding,
            meter_type,
            rate_count,
        }
    }
}

impl NamedEntity for MeterArray {
    const CATEGORY: &'static str = "meter array";

    fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl fmt::Display for MeterArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:30} [{}, {}, {}]",
            self.name(),
            self.binding,
            self.rate_count,
            self.meter_type
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CounterArray {
    #[serde(flatten)]
    pub identity: Identity,
    pub binding: ArrayBinding,
}

impl CounterArray {
    pub fn new(name: impl Into<String>, id: i64, binding: ArrayBinding) -> Self {
        Self {
            identity: Identity::new(name, id),
            binding,
        }
    }
}

impl NamedEntity for CounterArray {
    const CATEGORY: &'static str = "counter array";

    fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl fmt::Display for CounterArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:30} [{}]", self.name(), self.binding)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterArray {
    #[serde(flatten)]
    pub identity: Identity,
    pub bitwidth: u32,
    pub size: u64,
}

impl RegisterArray {
    pub fn new(name: impl Into<String>, id: i64, bitwidth: u32, size: u64) -> Self {
        Self {
            identity: Identity::new(name, id),
            bitwidth,
            size,
        }
    }
}

impl NamedEntity for RegisterArray {
    const CATEGORY: &'static str = "register array";

    fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl fmt::Display for RegisterArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:30} [{}, {}]", self.name(), self.bitwidth, self.size)
    }
}
