//! Integration tests for template emission
//!
//! Loads a small program, renders a template directory into a temporary
//! destination and checks the generated files.

use p4pd_model::GeneratorConfig;
use p4pd_render::{generate, RenderContext, RenderError, TemplateSet};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn program() -> p4pd_model::Model {
    p4pd_loader::load_value(json!({
        "header_types": [{"name": "ipv4_t", "fields": [["dstAddr", 32, false], ["ttl", 8, false]]}],
        "headers": [{"name": "ipv4", "header_type": "ipv4_t"}],
        "actions": [
            {"name": "set_nhop", "id": 0, "runtime_data": [{"name": "nhop_ipv4", "bitwidth": 32}, {"name": "port", "bitwidth": 9}], "primitives": []},
            {"name": "_drop", "id": 1, "runtime_data": [], "primitives": []}
        ],
        "pipelines": [{"name": "ingress", "tables": [{
            "name": "ipv4_lpm", "id": 0, "match_type": "lpm", "type": "simple",
            "with_counters": true, "direct_meters": null, "support_timeout": false,
            "actions": ["set_nhop", "_drop"],
            "key": [{"match_type": "lpm", "name": "ipv4.dstAddr", "target": ["ipv4", "dstAddr"]}],
            "default_entry": {"action_id": 1, "action_const": false}
        }]}],
        "learn_lists": [],
        "meter_arrays": [],
        "counter_arrays": [{"name": "ipv4_lpm_counter", "id": 0, "is_direct": true, "binding": "ipv4_lpm"}],
        "register_arrays": []
    }))
    .unwrap()
}

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

const TABLE_TEMPLATE: &str = r#"{% for t in tables %}{% set name = pd_prefix ~ t.cname %}
{{ name }}_add({% for p in gen_match_params(key=t.key) %}{{ get_c_type(byte_width=p.byte_width) }} {{ p.name | replace(from=".", to="_") }}{% if not loop.last %}, {% endif %}{% endfor %});
default: {{ t.default_action }}
{% endfor %}"#;

#[test]
fn test_generate_renders_tree() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    write(templates.path(), "pd/pd_tables.c", TABLE_TEMPLATE);
    write(
        templates.path(),
        "thrift/p4_pd_rpc.thrift",
        "{% for a in actions %}{{ a.name }}:{{ a.num_params }};{% endfor %}",
    );
    write(templates.path(), ".hidden", "{{ broken");
    write(templates.path(), "pd/pd_tables.c~", "{{ broken");
    write(templates.path(), "pd/tables.cache", "{{ broken");

    let config = GeneratorConfig::new("router").unwrap();
    let written = generate(&program(), &config, templates.path(), dest.path()).unwrap();
    assert_eq!(written.len(), 2);

    let tables = fs::read_to_string(dest.path().join("pd/pd_tables.c")).unwrap();
    assert!(tables.contains(
        "p4_pd_router_ipv4_lpm_add(uint32_t ipv4_dstAddr, uint16_t ipv4_dstAddr_prefix_length);"
    ));
    assert!(tables.contains("default: _drop"));

    let thrift = fs::read_to_string(dest.path().join("thrift/p4_pd_rpc.thrift")).unwrap();
    assert_eq!(thrift, "_drop:0;set_nhop:2;");

    assert!(!dest.path().join(".hidden").exists());
    assert!(!dest.path().join("pd/tables.cache").exists());
}

#[test]
fn test_output_is_deterministic() {
    let templates = TempDir::new().unwrap();
    write(
        templates.path(),
        "summary.txt",
        "{% for t in tables %}{{ t.name }}{% for a in t.actions %} {{ a.name }}{% endfor %}\n{% endfor %}\
         {% for c in counter_arrays %}{{ c.name }} direct={{ c.is_direct }} table={{ c.table }}\n{% endfor %}",
    );

    let config = GeneratorConfig::default();
    let mut outputs = Vec::new();
    for _ in 0..2 {
        let dest = TempDir::new().unwrap();
        generate(&program(), &config, templates.path(), dest.path()).unwrap();
        outputs.push(fs::read_to_string(dest.path().join("summary.txt")).unwrap());
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(
        outputs[0],
        "ipv4_lpm _drop set_nhop\nipv4_lpm_counter direct=true table=ipv4_lpm\n"
    );
}

#[test]
fn test_no_html_escaping() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(templates.path(), "pd.html", "{{ pd_prefix }}<{{ p4_prefix }}>");

    let config = GeneratorConfig::new("a_b").unwrap();
    generate(&program(), &config, templates.path(), dest.path()).unwrap();
    let out = fs::read_to_string(dest.path().join("pd.html")).unwrap();
    assert_eq!(out, "p4_pd_a_b_<a_b>");
}

#[test]
fn test_destination_must_exist() {
    let templates = TempDir::new().unwrap();
    write(templates.path(), "a.txt", "x");
    let dest = templates.path().join("missing");

    let config = GeneratorConfig::default();
    let result = generate(&program(), &config, templates.path(), &dest);
    let err = result.unwrap_err();
    assert!(matches!(err, RenderError::InvalidPath { .. }));
    assert!(err.to_string().ends_with("is not a valid directory"));
}

#[test]
fn test_template_error_is_reported() {
    let templates = TempDir::new().unwrap();
    write(templates.path(), "bad.c", "{{ get_c_type() }}");
    let dest = TempDir::new().unwrap();

    let config = GeneratorConfig::default();
    let result = generate(&program(), &config, templates.path(), dest.path());
    assert!(matches!(result, Err(RenderError::Template(_))));
}

#[test]
fn test_template_names_are_relative() {
    let templates = TempDir::new().unwrap();
    write(templates.path(), "b/two.h", "");
    write(templates.path(), "a/one.h", "");

    let set = TemplateSet::from_dir(templates.path()).unwrap();
    let mut names = set.names().to_vec();
    names.sort();
    assert_eq!(names, vec!["a/one.h".to_string(), "b/two.h".to_string()]);
}

#[test]
fn test_context_value_lists_entities() {
    let model = program();
    let config = GeneratorConfig::default();
    let value = RenderContext::new(&model, &config).unwrap().to_value().unwrap();

    assert_eq!(value["tables"][0]["default_action"], "_drop");
    assert_eq!(value["tables"][0]["with_counters"], true);
    assert_eq!(value["actions"][1]["runtime_data"][1]["bitwidth"], 9);
    assert_eq!(value["counter_arrays"][0]["table"], "ipv4_lpm");
}
