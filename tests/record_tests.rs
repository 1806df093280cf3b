//! JSON record chains loaded from disk, driven by YAML config.

use std::borrow::Cow;
use std::fs;

use pretty_assertions::assert_eq as pa_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

use chainwalk::chain::Termination;
use chainwalk::config::{self, ChainConfig, IdMatch};
use chainwalk::error::ChainWalkError;
use chainwalk::record::{self, JsonChain};

fn overlay(farther: Cow<'_, Value>, nearer: &Value) -> Value {
    let mut out = farther.into_owned();
    match (out.as_object_mut(), nearer.as_object()) {
        (Some(base), Some(over)) => {
            for (k, v) in over {
                base.insert(k.clone(), v.clone());
            }
        }
        _ => return nearer.clone(),
    }
    out
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn configured_field_names_drive_the_walk() {
    let tmp = TempDir::new().unwrap();
    let config_path = write(
        &tmp,
        "chain.yaml",
        "link: extends\nid: name\nmerge_property: settings\nid_match: loose\n",
    );
    let nodes_path = write(
        &tmp,
        "themes.json",
        r#"[
            {"name": 1, "settings": {"font": "mono", "size": 12}},
            {"name": "dark", "extends": "1", "settings": {"bg": "black"}},
            {"name": "midnight", "extends": "dark", "settings": {"size": 14}}
        ]"#,
    );

    let config = config::load_config(Some(&config_path)).unwrap();
    assert_eq!(config.id_match, IdMatch::Loose);

    let document = record::read_json(&nodes_path).unwrap();
    let nodes = record::as_collection(&document).unwrap();
    let chain = JsonChain::by_id(&config, nodes);
    let start = chain.find(&json!("midnight")).unwrap();

    let lineage = chain.lineage(start);
    let names: Vec<Value> = lineage
        .nodes
        .iter()
        .filter_map(|n| chain.id_of(*n).cloned())
        .collect();
    pa_eq!(names, vec![json!("midnight"), json!("dark"), json!(1)]);
    assert!(matches!(lineage.termination, Termination::EndOfChain));

    let merged = chain.merge(start, overlay).map(Cow::into_owned);
    pa_eq!(
        merged,
        Some(json!({"font": "mono", "size": 14, "bg": "black"}))
    );
}

#[test]
fn strict_matching_stops_at_type_mismatch() {
    let config = ChainConfig::default();
    let document = json!([
        {"id": 1, "properties": {"a": 1}},
        {"id": 2, "parent": "1", "properties": {"b": 2}}
    ]);
    let nodes = record::as_collection(&document).unwrap();
    let chain = JsonChain::by_id(&config, nodes);

    let merged = chain.merge(&nodes[1], overlay).unwrap();
    assert!(matches!(merged, Cow::Borrowed(_)));
    pa_eq!(merged.into_owned(), json!({"b": 2}));
}

#[test]
fn null_link_and_null_property_are_absent() {
    let config = ChainConfig::default();
    let document = json!([
        {"id": "root", "parent": null, "properties": {"k": "root"}},
        {"id": "mid", "parent": "root", "properties": null},
        {"id": "leaf", "parent": "mid"}
    ]);
    let nodes = record::as_collection(&document).unwrap();
    let chain = JsonChain::by_id(&config, nodes);

    let mut merges = 0;
    let merged = chain.merge(&nodes[2], |farther, nearer| {
        merges += 1;
        overlay(farther, nearer)
    });
    assert_eq!(merges, 0);
    pa_eq!(merged.map(Cow::into_owned), Some(json!({"k": "root"})));
    assert_eq!(chain.lineage(&nodes[2]).len(), 3);
}

#[test]
fn direct_document_walks_nested_parents() {
    let tmp = TempDir::new().unwrap();
    let path = write(
        &tmp,
        "nested.json",
        r#"{"id": "leaf", "properties": {"x": 1},
            "parent": {"id": "base", "properties": {"x": 0, "y": 0}}}"#,
    );
    let document = record::read_json(&path).unwrap();
    let config = ChainConfig::default();
    let chain = JsonChain::direct(&config);

    let path_ids = chain.call(&document, ">", |n, acc: Option<String>, sep| {
        let id = chain.id_of(n).and_then(Value::as_str).unwrap_or_default();
        acc.map_or_else(|| id.to_string(), |acc| format!("{acc}{sep}{id}"))
    });
    pa_eq!(path_ids, "leaf>base");
    pa_eq!(
        chain.merge(&document, overlay).map(Cow::into_owned),
        Some(json!({"x": 1, "y": 0}))
    );
}

#[test]
fn read_json_reports_io_and_parse_errors() {
    let tmp = TempDir::new().unwrap();
    let missing = record::read_json(&tmp.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, ChainWalkError::Io { .. }));

    let broken = write(&tmp, "broken.json", "[{\"id\": ");
    let parse = record::read_json(&broken).unwrap_err();
    assert!(matches!(parse, ChainWalkError::Json(_)));
}

#[test]
fn load_config_rejects_invalid_file() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "bad.yaml", "merge_property: \"\"\n");
    let err = config::load_config(Some(&path)).unwrap_err();
    assert!(matches!(err, ChainWalkError::InvalidConfig { .. }));
}

#[test]
fn default_config_path_is_yaml() {
    if let Some(path) = config::default_config_path() {
        assert!(path.ends_with("config.yaml"));
    }
}
