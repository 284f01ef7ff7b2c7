//! Actions and their runtime parameters

use crate::entity::{Identity, NamedEntity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime (control-plane supplied) parameter of an action
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuntimeParam {
    pub name: String,
    pub bitwidth: u32,
}

impl RuntimeParam {
    pub fn new(name: impl Into<String>, bitwidth: u32) -> Self {
        Self {
            name: name.into(),
            bitwidth,
        }
    }
}

/// `(header, field)` operand of a primitive
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    pub header: String,
    pub field: String,
}

impl FieldRef {
    pub fn new(header: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            field: field.into(),
        }
    }

    #[inline]
    pub fn matches(&self, header: &str, field: &str) -> bool {
        self.header == header && self.field == field
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Action {
    #[serde(flatten)]
    pub identity: Identity,

    /// Parameters in load order; the order is the positional call layout
    pub runtime_data: Vec<RuntimeParam>,

    /// Field operands of `assign` primitives, in order of appearance.
    /// Only used to recover learn field names.
    #[serde(skip)]
    pub primitives: Vec<FieldRef>,
}

impl Action {
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        Self {
            identity: Identity::new(name, id),
            runtime_data: Vec::new(),
            primitives: Vec::new(),
        }
    }

    #[inline]
    pub fn num_params(&self) -> usize {
        self.runtime_data.len()
    }

    /// Field written right after the one matching `(header, field)`
    pub fn operand_after(&self, header: &str, field: &str) -> Option<Option<&FieldRef>> {
        let mut operands = self.primitives.iter();
        while let Some(operand) = operands.next() {
            if operand.matches(header, field) {
                return Some(operands.next());
            }
        }
        None
    }
}

impl NamedEntity for Action {
    const CATEGORY: &'static str = "action";

    fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .runtime_data
            .iter()
            .map(|p| format!("{}({})", p.name, p.bitwidth))
            .collect::<Vec<_>>()
            .join(",\t");
        write!(f, "{:30} [{}]", self.name(), params)
    }
}
