//! # bmv2 JSON document
//!
//! Typed view of the sections of a compiled program that the generator
//! reads. Unknown sections and fields are ignored; a missing required field
//! fails deserialization.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct IrDocument {
    pub header_types: Vec<IrHeaderType>,
    pub headers: Vec<IrHeader>,
    pub actions: Vec<IrAction>,
    pub pipelines: Vec<IrPipeline>,
    pub learn_lists: Vec<IrLearnList>,
    pub meter_arrays: Vec<IrMeterArray>,
    pub counter_arrays: Vec<IrCounterArray>,
    pub register_arrays: Vec<IrRegisterArray>,
}

impl IrDocument {
    /// Header type declared for header instance `header`
    pub fn header_type_of(&self, header: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name == header)
            .map(|h| h.header_type.as_str())
    }

    pub fn header_type(&self, name: &str) -> Option<&IrHeaderType> {
        self.header_types.iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrHeaderType {
    pub name: String,
    pub fields: Vec<IrHeaderField>,
}

impl IrHeaderType {
    /// Declared width of `field`
    pub fn field_bitwidth(&self, field: &str) -> Option<u32> {
        self.fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.bitwidth)
    }
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing key is `None`
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// `[name, bitwidth]` or `[name, bitwidth, signed]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrHeaderField {
    pub name: String,
    pub bitwidth: u32,
}

impl<'de> Deserialize<'de> for IrHeaderField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<Value>::deserialize(deserializer)?;
        let name = items
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| de::Error::custom("header field must start with its name"))?;
        let bitwidth = items
            .get(1)
            .and_then(Value::as_u64)
            .and_then(|bw| u32::try_from(bw).ok())
            .ok_or_else(|| {
                de::Error::custom(format!("header field '{}' has no integer bitwidth", name))
            })?;
        Ok(Self {
            name: name.to_string(),
            bitwidth,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrHeader {
    pub name: String,
    pub header_type: String,
}

/// `[header, field]` reference
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IrFieldRef(pub String, pub String);

#[derive(Debug, Clone, Deserialize)]
pub struct IrAction {
    pub name: String,
    pub id: i64,
    pub runtime_data: Vec<IrRuntimeData>,
    pub primitives: Vec<IrPrimitive>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrRuntimeData {
    pub name: String,
    pub bitwidth: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrPrimitive {
    pub op: String,
    #[serde(default)]
    pub parameters: Vec<IrOperand>,
}

/// Typed operand; `value` depends on `type`
#[derive(Debug, Clone, Deserialize)]
pub struct IrOperand {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
}

impl IrOperand {
    /// Field reference carried by a `field` operand
    pub fn field_ref(&self) -> Option<IrFieldRef> {
        if self.kind != "field" {
            return None;
        }
        serde_json::from_value(self.value.clone()).ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrPipeline {
    pub name: String,
    #[serde(default)]
    pub action_profiles: Vec<IrActionProfile>,
    pub tables: Vec<IrTable>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrActionProfile {
    pub name: String,
    pub id: i64,
    /// Present (even as `null`) when members can be grouped
    #[serde(default, deserialize_with = "present")]
    pub selector: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrTable {
    pub name: String,
    pub id: i64,
    pub match_type: String,
    #[serde(rename = "type")]
    pub table_type: String,
    pub with_counters: bool,
    pub direct_meters: Option<String>,
    pub support_timeout: bool,
    pub actions: Vec<String>,
    pub key: Vec<IrKeyField>,
    #[serde(default)]
    pub default_entry: Option<IrDefaultEntry>,

    /// Explicit action profile reference
    #[serde(default)]
    pub action_profile: Option<String>,

    /// Older compilers: profile named inline on the table
    #[serde(default)]
    pub act_prof_name: Option<String>,

    /// Older compilers: selector declared inline on the table
    #[serde(default, deserialize_with = "present")]
    pub selector: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrKeyField {
    pub match_type: String,
    pub name: String,
    /// `[header, field]`, or a bare header for validity keys
    #[serde(default)]
    pub target: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrDefaultEntry {
    pub action_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrLearnList {
    pub name: String,
    pub id: i64,
    pub elements: Vec<IrOperand>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrMeterArray {
    pub name: String,
    pub id: i64,
    pub is_direct: bool,
    #[serde(default)]
    pub binding: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(rename = "type")]
    pub meter_type: String,
    pub rate_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrCounterArray {
    pub name: String,
    pub id: i64,
    pub is_direct: bool,
    #[serde(default)]
    pub binding: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IrRegisterArray {
    pub name: String,
    pub id: i64,
    pub bitwidth: u32,
    pub size: u64,
}
