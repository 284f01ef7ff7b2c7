//! # Tables and Action Profiles
//!
//! A table matches on an ordered list of key fields and dispatches to a set
//! of actions. Indirect tables reach their actions through an
//! [`ActionProfile`], which may be shared by several tables.

use crate::entity::{Identity, NamedEntity};
use crate::kinds::{MatchType, TableType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One field of a table key
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyField {
    pub name: String,
    pub match_type: MatchType,
    pub bitwidth: u32,
}

impl KeyField {
    pub fn new(name: impl Into<String>, match_type: MatchType, bitwidth: u32) -> Self {
        Self {
            name: name.into(),
            match_type,
            bitwidth,
        }
    }
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.name, self.match_type, self.bitwidth)
    }
}

/// Match-action table
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Table {
    #[serde(flatten)]
    pub identity: Identity,

    /// Fixed at construction
    match_type: MatchType,

    pub table_type: TableType,

    /// Key fields in declaration order
    pub key: Vec<KeyField>,

    /// Names of the actions this table may invoke
    pub actions: BTreeSet<String>,

    /// Action profile name (indirect tables only)
    pub action_profile: Option<String>,

    /// Action installed when no entry matches
    pub default_action: Option<String>,

    pub with_counters: bool,

    /// Name of the meter array bound to this table's entries
    pub direct_meters: Option<String>,

    pub support_timeout: bool,
}

impl Table {
    pub fn new(name: impl Into<String>, id: i64, match_type: MatchType, table_type: TableType) -> Self {
        Self {
            identity: Identity::new(name, id),
            match_type,
            table_type,
            key: Vec::new(),
            actions: BTreeSet::new(),
            action_profile: None,
            default_action: None,
            with_counters: false,
            direct_meters: None,
            support_timeout: false,
        }
    }

    #[inline]
    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    #[inline]
    pub fn num_key_fields(&self) -> usize {
        self.key.len()
    }

    #[inline]
    pub fn is_indirect(&self) -> bool {
        self.table_type.is_indirect()
    }
}

impl NamedEntity for Table {
    const CATEGORY: &'static str = "table";

    fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self
            .key
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",\t");
        write!(f, "{:30} [{}]", self.name(), key)
    }
}

/// Action profile, possibly shared by several indirect tables
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionProfile {
    #[serde(flatten)]
    pub identity: Identity,

    /// Whether members can be grouped behind a selector
    pub with_selection: bool,

    /// Union of the action sets of every attached table
    pub actions: BTreeSet<String>,

    /// Number of tables attached to this profile
    pub ref_cnt: u32,
}

impl ActionProfile {
    pub fn new(name: impl Into<String>, id: i64, with_selection: bool) -> Self {
        Self {
            identity: Identity::new(name, id),
            with_selection,
            actions: BTreeSet::new(),
            ref_cnt: 0,
        }
    }

    /// Attach a table: merge its actions into this profile and count it
    ///
    /// Actions accumulate across tables; nothing already in the profile is
    /// removed.
    pub fn attach(&mut self, table: &Table) {
        self.actions.extend(table.actions.iter().cloned());
        self.ref_cnt += 1;
    }
}

impl NamedEntity for ActionProfile {
    const CATEGORY: &'static str = "action profile";

    fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl fmt::Display for ActionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:30} [{}]", self.name(), self.with_selection)
    }
}
