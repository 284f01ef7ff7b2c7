//! # Name-keyed Entity Registry
//!
//! Entities are inserted explicitly after construction. Inserting an entity
//! whose name is already present replaces the earlier one (last write
//! wins); the displaced entity is handed back so callers can report it.
//! Iteration is always in name order.

use crate::entity::NamedEntity;
use crate::error::{ModelError, Result};
use serde::Serialize;
use std::collections::btree_map::{self, BTreeMap};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry<T> {
    entries: BTreeMap<String, T>,
}

impl<T: NamedEntity> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert or replace by name, returning the replaced entity
    pub fn insert(&mut self, entity: T) -> Option<T> {
        self.entries.insert(entity.name().to_string(), entity)
    }

    /// Look up by name
    pub fn get(&self, name: &str) -> Result<&T> {
        self.entries.get(name).ok_or_else(|| ModelError::NotFound {
            registry: T::CATEGORY,
            name: name.to_string(),
        })
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut T> {
        self.entries.get_mut(name).ok_or_else(|| ModelError::NotFound {
            registry: T::CATEGORY,
            name: name.to_string(),
        })
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// First entity (in name order) carrying `id`
    pub fn find_by_id(&self, id: i64) -> Option<&T> {
        self.entries.values().find(|entity| entity.id() == id)
    }

    /// Entries in name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, T> {
        self.entries.iter()
    }

    /// Entities in name order
    pub fn values(&self) -> btree_map::Values<'_, String, T> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: NamedEntity> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = (&'a String, &'a T);
    type IntoIter = btree_map::Iter<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
