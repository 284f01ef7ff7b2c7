//! Complete model of one compiled program

use crate::action::Action;
use crate::arrays::{CounterArray, MeterArray, RegisterArray};
use crate::learn::LearnQuanta;
use crate::registry::Registry;
use crate::table::{ActionProfile, Table};
use serde::Serialize;
use std::fmt;

/// Every registry produced by one load
///
/// A model is built from scratch for each program. Reusing one across
/// programs requires [`Model::clear`], which empties every registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    pub tables: Registry<Table>,
    pub action_profiles: Registry<ActionProfile>,
    pub actions: Registry<Action>,
    pub learn_quantas: Registry<LearnQuanta>,
    pub meter_arrays: Registry<MeterArray>,
    pub counter_arrays: Registry<CounterArray>,
    pub register_arrays: Registry<RegisterArray>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.tables.clear();
        self.action_profiles.clear();
        self.actions.clear();
        self.learn_quantas.clear();
        self.meter_arrays.clear();
        self.counter_arrays.clear();
        self.register_arrays.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
            && self.action_profiles.is_empty()
            && self.actions.is_empty()
            && self.learn_quantas.is_empty()
            && self.meter_arrays.is_empty()
            && self.counter_arrays.is_empty()
            && self.register_arrays.is_empty()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tables:")?;
        for table in self.tables.values() {
            writeln!(f, "  {}", table)?;
        }
        writeln!(f, "Action profiles:")?;
        for profile in self.action_profiles.values() {
            writeln!(f, "  {}", profile)?;
        }
        writeln!(f, "Actions:")?;
        for action in self.actions.values() {
            writeln!(f, "  {}", action)?;
        }
        writeln!(f, "Learn lists:")?;
        for learn_quanta in self.learn_quantas.values() {
            writeln!(f, "  {}", learn_quanta)?;
        }
        writeln!(f, "Meter arrays:")?;
        for meter in self.meter_arrays.values() {
            writeln!(f, "  {}", meter)?;
        }
        writeln!(f, "Counter arrays:")?;
        for counter in self.counter_arrays.values() {
            writeln!(f, "  {}", counter)?;
        }
        writeln!(f, "Register arrays:")?;
        for register in self.register_arrays.values() {
            writeln!(f, "  {}", register)?;
        }
        Ok(())
    }
}
