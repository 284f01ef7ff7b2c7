//! # IR Loader
//!
//! Builds a [`Model`] from a bmv2 JSON document in a single pass.
//!
//! ## Algorithm
//!
//! 1. Recover readable metadata names from the `scalars_0` header type
//! 2. Build actions, keeping the field operands of `assign` primitives
//! 3. Per pipeline: build action profiles, then tables (key widths are
//!    resolved through `headers` and `header_types`; indirect tables are
//!    attached to their profile)
//! 4. Build learn lists, naming each field after the metadata an action
//!    copies into it
//! 5. Build meter, counter and register arrays
//!
//! Later steps look up entities built by earlier ones, so the order is
//! fixed. Any dangling reference aborts the load; a partially built model
//! is never returned.

use crate::error::{LoaderError, Result};
use crate::ir::{IrDocument, IrFieldRef, IrKeyField, IrOperand, IrTable};
use crate::legacy;
use crate::metadata::MetadataNames;
use p4pd_model::{
    Action, ActionProfile, ArrayBinding, CounterArray, EnumCategory, FieldRef, KeyField,
    LearnField, LearnQuanta, MatchType, MeterArray, MeterType, Model, NamedEntity, Registry,
    RegisterArray, RuntimeParam, Table, TableType,
};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Marker the compiler puts in the name of header validity keys
pub const VALID_MARKER: &str = "$valid$";

/// Primitive whose field operands are kept for learn field recovery
const ASSIGN_OP: &str = "assign";

/// Load a model from JSON text
pub fn load(source: &str) -> Result<Model> {
    let document: IrDocument = serde_json::from_str(source)?;
    load_document(&document)
}

/// Load a model from an already parsed JSON value
pub fn load_value(value: Value) -> Result<Model> {
    let document: IrDocument = serde_json::from_value(value)?;
    load_document(&document)
}

/// Load a model from a JSON file
pub fn load_file(path: impl AsRef<Path>) -> Result<Model> {
    let path = path.as_ref();
    tracing::debug!("reading IR from {}", path.display());
    let source = std::fs::read_to_string(path)?;
    load(&source)
}

/// Load a model from a typed document
pub fn load_document(document: &IrDocument) -> Result<Model> {
    let mut loader = Loader::new(document);

    loader.load_actions();
    loader.load_pipelines()?;
    loader.load_learn_lists()?;
    loader.load_meter_arrays()?;
    loader.load_counter_arrays()?;
    loader.load_register_arrays();

    let model = loader.model;
    tracing::info!(
        tables = model.tables.len(),
        action_profiles = model.action_profiles.len(),
        actions = model.actions.len(),
        learn_lists = model.learn_quantas.len(),
        meter_arrays = model.meter_arrays.len(),
        counter_arrays = model.counter_arrays.len(),
        register_arrays = model.register_arrays.len(),
        "IR loaded"
    );
    Ok(model)
}

/// Insert with last-write-wins, reporting the displaced entity
fn insert<T: NamedEntity>(registry: &mut Registry<T>, entity: T) {
    if let Some(previous) = registry.insert(entity) {
        tracing::warn!(
            "{} '{}' (id {}) declared more than once; keeping the later declaration",
            T::CATEGORY,
            previous.name(),
            previous.id()
        );
    }
}

fn parse_kind<K: EnumCategory>(entity: &str, text: &str) -> Result<K> {
    K::parse(text).map_err(|source| LoaderError::InvalidKind {
        entity: entity.to_string(),
        source,
    })
}

fn field_ref(entity: &str, value: &Value) -> Result<IrFieldRef> {
    serde_json::from_value(value.clone()).map_err(|_| LoaderError::MalformedFieldRef {
        entity: entity.to_string(),
        value: value.to_string(),
    })
}

struct Loader<'a> {
    document: &'a IrDocument,
    metadata: MetadataNames,
    model: Model,
}

impl<'a> Loader<'a> {
    fn new(document: &'a IrDocument) -> Self {
        let metadata = MetadataNames::from_header_types(&document.header_types);
        tracing::debug!("recovered {} metadata field names", metadata.len());
        Self {
            document,
            metadata,
            model: Model::new(),
        }
    }

    /// Width of `header.field`, looked up through the header's type
    fn field_bitwidth(&self, entity: &str, header: &str, field: &str) -> Result<u32> {
        let header_type =
            self.document
                .header_type_of(header)
                .ok_or_else(|| LoaderError::UnknownHeader {
                    entity: entity.to_string(),
                    header: header.to_string(),
                })?;

        self.document
            .header_type(header_type)
            .ok_or_else(|| LoaderError::UnknownHeaderType {
                entity: entity.to_string(),
                header_type: header_type.to_string(),
            })?
            .field_bitwidth(field)
            .ok_or_else(|| LoaderError::UnknownField {
                entity: entity.to_string(),
                header_type: header_type.to_string(),
                field: field.to_string(),
            })
    }

    // ========================================================================
    // Actions
    // ========================================================================

    fn load_actions(&mut self) {
        let document = self.document;
        for ir in &document.actions {
            let mut action = Action::new(ir.name.as_str(), ir.id);

            action.runtime_data = ir
                .runtime_data
                .iter()
                .map(|p| RuntimeParam::new(p.name.as_str(), p.bitwidth))
                .collect();

            action.primitives = ir
                .primitives
                .iter()
                .filter(|p| p.op == ASSIGN_OP)
                .flat_map(|p| p.parameters.iter())
                .filter_map(IrOperand::field_ref)
                .map(|IrFieldRef(header, field)| FieldRef::new(header, field))
                .collect();

            tracing::debug!("action {}", action);
            insert(&mut self.model.actions, action);
        }
    }

    // ========================================================================
    // Pipelines: action profiles and tables
    // ========================================================================

    fn load_pipelines(&mut self) -> Result<()> {
        let document = self.document;
        for pipeline in &document.pipelines {
            tracing::debug!("pipeline {}", pipeline.name);

            for ir in &pipeline.action_profiles {
                let profile = ActionProfile::new(ir.name.as_str(), ir.id, ir.selector.is_some());
                tracing::debug!("action profile {}", profile);
                insert(&mut self.model.action_profiles, profile);
            }

            for ir in &pipeline.tables {
                let table = self.build_table(ir)?;
                tracing::debug!("table {}", table);
                insert(&mut self.model.tables, table);
            }
        }
        Ok(())
    }

    fn build_table(&mut self, ir: &IrTable) -> Result<Table> {
        let match_type: MatchType = parse_kind(&ir.name, &ir.match_type)?;
        let table_type: TableType = parse_kind(&ir.name, &ir.table_type)?;

        let mut table = Table::new(ir.name.as_str(), ir.id, match_type, table_type);
        table.with_counters = ir.with_counters;
        table.direct_meters = ir.direct_meters.clone();
        table.support_timeout = ir.support_timeout;

        for action in &ir.actions {
            if !self.model.actions.contains(action) {
                return Err(LoaderError::UnknownAction {
                    table: ir.name.clone(),
                    action: action.clone(),
                });
            }
            table.actions.insert(action.clone());
        }

        for key in &ir.key {
            let field = self.key_field(&ir.name, key)?;
            table.key.push(field);
        }

        if let Some(entry) = &ir.default_entry {
            let action = self
                .model
                .actions
                .find_by_id(entry.action_id)
                .ok_or_else(|| LoaderError::UnknownActionId {
                    table: ir.name.clone(),
                    id: entry.action_id,
                })?;
            table.default_action = Some(action.name().to_string());
        }

        if table.is_indirect() {
            self.attach_action_profile(ir, &mut table)?;
        }

        Ok(table)
    }

    fn key_field(&self, table: &str, key: &IrKeyField) -> Result<KeyField> {
        let match_type: MatchType = parse_kind(table, &key.match_type)?;

        // Validity keys have no field to look up: always one bit
        if key.name.find(VALID_MARKER).is_some_and(|pos| pos > 0) {
            return Ok(KeyField::new(key.name.replace('$', ""), match_type, 1));
        }

        let IrFieldRef(header, field) = field_ref(table, &key.target)?;
        let bitwidth = self.field_bitwidth(table, &header, &field)?;
        Ok(KeyField::new(key.name.as_str(), match_type, bitwidth))
    }

    fn attach_action_profile(&mut self, ir: &IrTable, table: &mut Table) -> Result<()> {
        let profile_name = match &ir.action_profile {
            Some(name) => name.clone(),
            None => {
                let profile = legacy::synthesize_action_profile(ir)?;
                let name = profile.name().to_string();
                insert(&mut self.model.action_profiles, profile);
                name
            }
        };

        let profile = self
            .model
            .action_profiles
            .get_mut(&profile_name)
            .map_err(|_| LoaderError::UnknownActionProfile {
                table: ir.name.clone(),
                profile: profile_name.clone(),
            })?;

        profile.attach(table);
        table.action_profile = Some(profile_name);
        Ok(())
    }

    // ========================================================================
    // Learn lists
    // ========================================================================

    fn load_learn_lists(&mut self) -> Result<()> {
        let document = self.document;
        for ir in &document.learn_lists {
            let mut learn_quanta = LearnQuanta::new(ir.name.as_str(), ir.id);

            for element in &ir.elements {
                if element.kind != "field" {
                    return Err(LoaderError::UnsupportedLearnElement {
                        learn_list: ir.name.clone(),
                        kind: element.kind.clone(),
                    });
                }

                let IrFieldRef(header, field) = field_ref(&ir.name, &element.value)?;
                let bitwidth = self.field_bitwidth(&ir.name, &header, &field)?;
                let name = self.learn_field_name(&ir.name, &header, &field)?;
                learn_quanta.fields.push(LearnField { name, bitwidth });
            }

            tracing::debug!("learn list {}", learn_quanta);
            insert(&mut self.model.learn_quantas, learn_quanta);
        }
        Ok(())
    }

    /// Name of the metadata that some action copies into `header.field`
    ///
    /// Actions are scanned in declaration order, each name at the position
    /// of its first declaration but with the body that survived loading.
    /// The first one with an `assign` targeting `header.field` decides, and
    /// the operand right after the target is the copied metadata.
    fn learn_field_name(&self, learn_list: &str, header: &str, field: &str) -> Result<String> {
        let unresolved = || LoaderError::UnresolvedLearnField {
            learn_list: learn_list.to_string(),
            header: header.to_string(),
            field: field.to_string(),
        };

        let mut seen = BTreeSet::new();
        let declared = self
            .document
            .actions
            .iter()
            .filter(|ir| seen.insert(ir.name.as_str()))
            .filter_map(|ir| self.model.actions.get(&ir.name).ok());

        for action in declared {
            let Some(next) = action.operand_after(header, field) else {
                continue;
            };
            let source = next.ok_or_else(unresolved)?;
            return self
                .metadata
                .resolve(&source.field)
                .map(str::to_string)
                .ok_or_else(|| LoaderError::UnknownMetadata {
                    learn_list: learn_list.to_string(),
                    field: source.field.clone(),
                });
        }

        Err(unresolved())
    }

    // ========================================================================
    // Stateful arrays
    // ========================================================================

    fn binding(
        &self,
        array: &str,
        is_direct: bool,
        table: Option<&str>,
        size: Option<u64>,
    ) -> Result<ArrayBinding> {
        if is_direct {
            let table = table.ok_or_else(|| LoaderError::MissingBinding {
                array: array.to_string(),
            })?;
            if !self.model.tables.contains(table) {
                return Err(LoaderError::UnknownBinding {
                    array: array.to_string(),
                    table: table.to_string(),
                });
            }
            Ok(ArrayBinding::Direct {
                table: table.to_string(),
            })
        } else {
            let size = size.ok_or_else(|| LoaderError::MissingSize {
                array: array.to_string(),
            })?;
            Ok(ArrayBinding::Indexed { size })
        }
    }

    fn load_meter_arrays(&mut self) -> Result<()> {
        let document = self.document;
        for ir in &document.meter_arrays {
            let binding = self.binding(&ir.name, ir.is_direct, ir.binding.as_deref(), ir.size)?;
            let meter_type: MeterType = parse_kind(&ir.name, &ir.meter_type)?;
            let meter = MeterArray::new(ir.name.as_str(), ir.id, binding, meter_type, ir.rate_count);
            tracing::debug!("meter array {}", meter);
            insert(&mut self.model.meter_arrays, meter);
        }
        Ok(())
    }

    fn load_counter_arrays(&mut self) -> Result<()> {
        let document = self.document;
        for ir in &document.counter_arrays {
            let binding = self.binding(&ir.name, ir.is_direct, ir.binding.as_deref(), ir.size)?;
            let counter = CounterArray::new(ir.name.as_str(), ir.id, binding);
            tracing::debug!("counter array {}", counter);
            insert(&mut self.model.counter_arrays, counter);
        }
        Ok(())
    }

    fn load_register_arrays(&mut self) {
        let document = self.document;
        for ir in &document.register_arrays {
            let register = RegisterArray::new(ir.name.as_str(), ir.id, ir.bitwidth, ir.size);
            tracing::debug!("register array {}", register);
            insert(&mut self.model.register_arrays, register);
        }
    }
}
