//! # Inline Action Profiles (older compilers)
//!
//! Before action profiles became a pipeline-level section, an indirect
//! table named its profile inline (`act_prof_name`) and declared its
//! selector on the table itself. Such a profile has no id of its own; it
//! takes the id of the table that declares it.
//!
//! This path is only taken when a table has no `action_profile` reference.

use crate::error::{LoaderError, Result};
use crate::ir::IrTable;
use p4pd_model::ActionProfile;

/// Build the action profile declared inline on `table`
pub fn synthesize_action_profile(table: &IrTable) -> Result<ActionProfile> {
    let name = table
        .act_prof_name
        .as_deref()
        .ok_or_else(|| LoaderError::MissingActionProfile {
            table: table.name.clone(),
        })?;

    tracing::warn!(
        "table '{}' uses inline action profile '{}' (pre-reference IR format)",
        table.name,
        name
    );

    Ok(ActionProfile::new(name, table.id, table.selector.is_some()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use p4pd_model::NamedEntity;
    use serde_json::json;

    fn table(value: serde_json::Value) -> IrTable {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_synthesized_profile_takes_table_id() {
        let ir = table(json!({
            "name": "ecmp_group", "id": 4, "match_type": "exact", "type": "indirect_ws",
            "with_counters": false, "direct_meters": null, "support_timeout": false,
            "actions": [], "key": [],
            "act_prof_name": "ecmp_selector",
            "selector": {"algo": "crc16", "input": []}
        }));

        let profile = synthesize_action_profile(&ir).unwrap();
        assert_eq!(profile.name(), "ecmp_selector");
        assert_eq!(profile.id(), 4);
        assert!(profile.with_selection);
        assert_eq!(profile.ref_cnt, 0);
    }

    #[test]
    fn test_without_selector() {
        let ir = table(json!({
            "name": "t", "id": 1, "match_type": "exact", "type": "indirect",
            "with_counters": false, "direct_meters": null, "support_timeout": false,
            "actions": [], "key": [], "act_prof_name": "t_profile"
        }));
        assert!(!synthesize_action_profile(&ir).unwrap().with_selection);
    }

    #[test]
    fn test_null_selector_is_present() {
        let ir = table(json!({
            "name": "t", "id": 1, "match_type": "exact", "type": "indirect_ws",
            "with_counters": false, "direct_meters": null, "support_timeout": false,
            "actions": [], "key": [], "act_prof_name": "t_profile", "selector": null
        }));
        assert!(synthesize_action_profile(&ir).unwrap().with_selection);
    }

    #[test]
    fn test_missing_inline_name() {
        let ir = table(json!({
            "name": "t", "id": 1, "match_type": "exact", "type": "indirect",
            "with_counters": false, "direct_meters": null, "support_timeout": false,
            "actions": [], "key": []
        }));
        assert!(matches!(
            synthesize_action_profile(&ir),
            Err(LoaderError::MissingActionProfile { table }) if table == "t"
        ));
    }
}
