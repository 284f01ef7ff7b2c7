//! Identity shared by every model entity

use serde::Serialize;

/// Replace characters that cannot appear in a C identifier
///
/// Only `.`, `[` and `]` are rewritten; other characters pass through.
pub fn c_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '.' | '[' | ']' => '_',
            other => other,
        })
        .collect()
}

/// Name, IR id and sanitized symbol of an entity
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    /// Name as written in the IR, unique within a registry
    pub name: String,

    /// Id from the IR, never reassigned
    pub id: i64,

    /// `name` sanitized for use as a generated identifier
    pub cname: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        let name = name.into();
        let cname = c_name(&name);
        Self { name, id, cname }
    }
}

/// An entity that lives in a name-keyed [`Registry`](crate::Registry)
pub trait NamedEntity {
    /// Registry name used in diagnostics
    const CATEGORY: &'static str;

    fn identity(&self) -> &Identity;

    #[inline]
    fn name(&self) -> &str {
        &self.identity().name
    }

    #[inline]
    fn id(&self) -> i64 {
        self.identity().id
    }

    #[inline]
    fn cname(&self) -> &str {
        &self.identity().cname
    }
}
