//! # PD Generator Model
//!
//! In-memory model of a compiled P4 program as needed to generate its
//! program-dependent (PD) control-plane bindings.
//!
//! ## Key Features
//! - Closed enumerations for match, table and meter kinds
//! - Tables, action profiles, actions, learn lists and stateful arrays
//! - Name-keyed registries with deterministic (name-sorted) iteration
//! - Parameter layout derivation for match specs and action specs
//!
//! Entities are plain values: constructing one has no side effects. They
//! become part of a [`Model`] only when inserted into one of its
//! registries.

pub mod error;
pub mod kinds;
pub mod entity;
pub mod table;
pub mod action;
pub mod learn;
pub mod arrays;
pub mod registry;
pub mod model;
pub mod params;
pub mod config;

pub use error::{ModelError, Result};
pub use kinds::{EnumCategory, MatchType, MeterType, TableType};
pub use entity::{c_name, Identity, NamedEntity};
pub use table::{ActionProfile, KeyField, Table};
pub use action::{Action, FieldRef, RuntimeParam};
pub use learn::{LearnField, LearnQuanta};
pub use arrays::{ArrayBinding, CounterArray, MeterArray, RegisterArray};
pub use registry::Registry;
pub use model::Model;
pub use params::{action_params, bits_to_bytes, match_params, CType, Param, ThriftType};
pub use config::{ConfigError, GeneratorConfig};
