//! Learn lists (digests sent to the control plane)

use crate::entity::{Identity, NamedEntity};
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LearnField {
    /// Recovered metadata name
    pub name: String,
    pub bitwidth: u32,
}

/// Ordered set of fields delivered together as one digest
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LearnQuanta {
    #[serde(flatten)]
    pub identity: Identity,
    pub fields: Vec<LearnField>,
}

impl LearnQuanta {
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        Self {
            identity: Identity::new(name, id),
            fields: Vec::new(),
        }
    }
}

impl NamedEntity for LearnQuanta {
    const CATEGORY: &'static str = "learn list";

    fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl fmt::Display for LearnQuanta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .fields
            .iter()
            .map(|field| format!("{}({})", field.name, field.bitwidth))
            .collect::<Vec<_>>()
            .join(",\t");
        write!(f, "{:30} [{}]", self.name(), fields)
    }
}
