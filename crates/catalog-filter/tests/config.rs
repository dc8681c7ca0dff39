use std::fs;

use catalog_filter::{ConfigError, FilterConfig, FilterSession};
use catalog_model::{FlatRecord, Level};

#[test]
fn loads_config_from_json_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("filter.json");
    fs::write(
        &path,
        r#"{"levels":["category","class","product"],"debounce_ms":150,"auto_expand_on_search":false}"#,
    )
    .expect("write config");

    let config = FilterConfig::load(&path).expect("load config");
    assert_eq!(config.debounce_ms, 150);
    assert!(!config.auto_expand_on_search);
    assert!(config.levels.contains(Level::Class));
    assert!(!config.levels.contains(Level::Subcategory));
}

#[test]
fn rejects_malformed_config() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("filter.json");
    fs::write(&path, r#"{"levels":["brand"]}"#).expect("write config");

    let err = FilterConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("filter.json"));
}

#[test]
fn configured_levels_shape_the_session_tree() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("filter.json");
    fs::write(&path, r#"{"levels":["category"],"auto_expand_on_search":false}"#)
        .expect("write config");
    let config = FilterConfig::load(&path).expect("load config");

    let records = vec![
        FlatRecord::new("P1", "Cola", "Beverages").with_subcategory("Soda"),
        FlatRecord::new("P3", "Chips", "Snacks"),
    ];
    let mut session = FilterSession::with_records(config, records);
    assert!(session.forest().iter().all(|root| root.is_leaf()));

    session.apply_query("chips");
    assert!(session.is_searching());
    assert!(session.expanded().is_empty());
}
