use presetter::config::{load_config, parse_config, ConfigError, ConfigFormat};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_json() {
    let config = parse_config(r#"{"port": "8080", "Name": "server"}"#, ConfigFormat::Json).unwrap();

    assert_eq!(config.len(), 2);
    assert_eq!(config.get("port"), Some("8080"));
    assert_eq!(config.get("name"), Some("server"));
    assert_eq!(config.get("NAME"), Some("server"));
    assert_eq!(config.get("missing"), None);
}

#[test]
fn test_parse_yaml() {
    let config = parse_config("port: '8080'\ntrack: spa\n", ConfigFormat::Yaml).unwrap();

    assert_eq!(config.get("port"), Some("8080"));
    assert_eq!(config.get("track"), Some("spa"));
}

#[test]
fn test_parse_keeps_document_order() {
    let config = parse_config(r#"{"b": "2", "a": "1", "c": "3"}"#, ConfigFormat::Json).unwrap();
    let keys: Vec<&str> = config.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn test_parse_rejects_non_flat_documents() {
    assert!(parse_config(r#"{"port": 8080}"#, ConfigFormat::Json).is_err());
    assert!(parse_config(r#"{"nested": {"a": "b"}}"#, ConfigFormat::Json).is_err());
    assert!(parse_config(r#"["a", "b"]"#, ConfigFormat::Json).is_err());
    assert!(parse_config(r#"{"port": "8080""#, ConfigFormat::Json).is_err());
}

#[test]
fn test_load_missing_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("template_cfg.json");

    match load_config(&path) {
        Err(ConfigError::Missing { path: missing }) => assert_eq!(missing, path),
        other => panic!("Expected ConfigError::Missing, got {other:?}"),
    }
}

#[test]
fn test_load_malformed_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("template_cfg.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(load_config(&path), Err(ConfigError::Malformed { .. })));
}

#[test]
fn test_load_yaml_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("template_cfg.yaml");
    fs::write(&path, "server_name: Test Server\n").unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.get("server_name"), Some("Test Server"));
}

#[test]
fn test_load_unreadable_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("template_cfg.json");
    fs::create_dir(&path).unwrap();

    assert!(matches!(load_config(&path), Err(ConfigError::Unreadable { .. })));
}
