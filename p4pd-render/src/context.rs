//! # Rendering Context
//!
//! Read-only view of a loaded [`Model`] handed to the template engine.
//! Every registry is exposed as a list in name order, so identical input
//! always renders identical output.
//!
//! Templates see these top-level keys:
//!
//! | Key | Content |
//! |---|---|
//! | `p4_prefix`, `pd_prefix` | identifier prefixes |
//! | `MatchType`, `TableType`, `MeterType` | `{ name: value }` maps |
//! | `tables` | tables, with their actions resolved |
//! | `action_profs` | action profiles, with their actions resolved |
//! | `actions` | actions |
//! | `learn_quantas` | learn lists |
//! | `meter_arrays`, `counter_arrays` | arrays, with `is_direct`, `size` and `table` flattened |
//! | `register_arrays` | register arrays |

use crate::error::{RenderError, Result};
use p4pd_model::{
    Action, ActionProfile, ArrayBinding, CounterArray, EnumCategory, GeneratorConfig, KeyField,
    LearnQuanta, MatchType, MeterArray, MeterType, Model, NamedEntity, RegisterArray, Registry,
    Table, TableType,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// `{ lowercase name: value }` for one enum category
pub type EnumMap = BTreeMap<&'static str, u8>;

fn enum_map<K: EnumCategory>() -> EnumMap {
    K::pairs().into_iter().collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionView<'a> {
    #[serde(flatten)]
    pub action: &'a Action,
    pub num_params: usize,
}

impl<'a> ActionView<'a> {
    fn new(action: &'a Action) -> Self {
        Self {
            action,
            num_params: action.num_params(),
        }
    }
}

fn resolve_actions<'a, I>(actions: &'a Registry<Action>, names: I) -> Result<Vec<ActionView<'a>>>
where
    I: IntoIterator<Item = &'a String>,
{
    names
        .into_iter()
        .map(|name| {
            actions
                .get(name)
                .map(ActionView::new)
                .map_err(RenderError::from)
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct TableView<'a> {
    pub name: &'a str,
    pub id: i64,
    pub cname: &'a str,
    pub match_type: MatchType,
    pub table_type: TableType,
    pub key: &'a [KeyField],
    pub num_key_fields: usize,
    /// Actions in name order
    pub actions: Vec<ActionView<'a>>,
    pub action_profile: Option<&'a str>,
    pub default_action: Option<&'a str>,
    pub with_counters: bool,
    pub direct_meters: Option<&'a str>,
    pub support_timeout: bool,
}

impl<'a> TableView<'a> {
    fn new(table: &'a Table, actions: &'a Registry<Action>) -> Result<Self> {
        Ok(Self {
            name: table.name(),
            id: table.id(),
            cname: table.cname(),
            match_type: table.match_type(),
            table_type: table.table_type,
            key: &table.key,
            num_key_fields: table.num_key_fields(),
            actions: resolve_actions(actions, &table.actions)?,
            action_profile: table.action_profile.as_deref(),
            default_action: table.default_action.as_deref(),
            with_counters: table.with_counters,
            direct_meters: table.direct_meters.as_deref(),
            support_timeout: table.support_timeout,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionProfileView<'a> {
    pub name: &'a str,
    pub id: i64,
    pub cname: &'a str,
    pub with_selection: bool,
    pub ref_cnt: u32,
    pub actions: Vec<ActionView<'a>>,
}

impl<'a> ActionProfileView<'a> {
    fn new(profile: &'a ActionProfile, actions: &'a Registry<Action>) -> Result<Self> {
        Ok(Self {
            name: profile.name(),
            id: profile.id(),
            cname: profile.cname(),
            with_selection: profile.with_selection,
            ref_cnt: profile.ref_cnt,
            actions: resolve_actions(actions, &profile.actions)?,
        })
    }
}

/// Meter or counter array with its binding flattened for templates
#[derive(Debug, Clone, Serialize)]
pub struct ArrayView<'a, T> {
    #[serde(flatten)]
    pub array: &'a T,
    pub is_direct: bool,
    pub size: Option<u64>,
    pub table: Option<&'a str>,
}

impl<'a, T> ArrayView<'a, T> {
    fn new(array: &'a T, binding: &'a ArrayBinding) -> Self {
        Self {
            array,
            is_direct: binding.is_direct(),
            size: binding.size(),
            table: binding.table(),
        }
    }
}

/// Everything a template can read
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    pub p4_prefix: &'a str,
    pub pd_prefix: String,

    #[serde(rename = "MatchType")]
    pub match_types: EnumMap,
    #[serde(rename = "TableType")]
    pub table_types: EnumMap,
    #[serde(rename = "MeterType")]
    pub meter_types: EnumMap,

    pub tables: Vec<TableView<'a>>,
    pub action_profs: Vec<ActionProfileView<'a>>,
    pub actions: Vec<ActionView<'a>>,
    pub learn_quantas: Vec<&'a LearnQuanta>,
    pub meter_arrays: Vec<ArrayView<'a, MeterArray>>,
    pub counter_arrays: Vec<ArrayView<'a, CounterArray>>,
    pub register_arrays: Vec<&'a RegisterArray>,
}

impl<'a> RenderContext<'a> {
    /// Build the context; fails if the model names an action it does not hold
    pub fn new(model: &'a Model, config: &'a GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let tables = model
            .tables
            .values()
            .map(|table| TableView::new(table, &model.actions))
            .collect::<Result<Vec<_>>>()?;

        let action_profs = model
            .action_profiles
            .values()
            .map(|profile| ActionProfileView::new(profile, &model.actions))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            p4_prefix: &config.p4_prefix,
            pd_prefix: config.pd_prefix(),
            match_types: enum_map::<MatchType>(),
            table_types: enum_map::<TableType>(),
            meter_types: enum_map::<MeterType>(),
            tables,
            action_profs,
            actions: model.actions.values().map(ActionView::new).collect(),
            learn_quantas: model.learn_quantas.values().collect(),
            meter_arrays: model
                .meter_arrays
                .values()
                .map(|meter| ArrayView::new(meter, &meter.binding))
                .collect(),
            counter_arrays: model
                .counter_arrays
                .values()
                .map(|counter| ArrayView::new(counter, &counter.binding))
                .collect(),
            register_arrays: model.register_arrays.values().collect(),
        })
    }

    pub fn to_tera(&self) -> Result<tera::Context> {
        Ok(tera::Context::from_serialize(self)?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
