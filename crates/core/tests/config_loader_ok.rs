use fmcheck_core::config::loader::ConfigLoader;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_json_config_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.json");
    let json = r#"{
  "valueInsertion": {
    "status": "draft",
    "created": "{{date}}",
    "ignored": null
  },
  "idKey": "uid",
  "extensions": [".MD", "markdown"],
  "excludedFolders": ["archive", "drafts/old"],
  "logging": { "level": "debug" }
}"#;

    write_file(&cfg_path, json);

    let rc = ConfigLoader::load(Some(&cfg_path)).expect("should load");
    assert_eq!(rc.source.as_deref(), Some(cfg_path.as_path()));
    assert_eq!(rc.id_key, "uid");
    assert_eq!(rc.extensions, vec!["md", "markdown"]);
    assert_eq!(
        rc.excluded_folders,
        vec![PathBuf::from("archive"), PathBuf::from("drafts/old")]
    );
    assert_eq!(rc.logging.level, "debug");
    assert_eq!(rc.value_insertion.len(), 2);
    assert_eq!(rc.value_insertion["status"].value(), &Value::String("draft".into()));
    assert!(rc.value_insertion["created"].is_generator());
    assert!(!rc.value_insertion.contains_key("ignored"));
}

#[test]
fn load_toml_config_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("fmcheck/config.toml");
    let toml = r#"
idKey = "slug"
excludedFolders = ["templates"]

[valueInsertion]
tags = []

[logging]
level = "warn"
fileLevel = "trace"
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path)).expect("should load");
    assert_eq!(rc.id_key, "slug");
    assert_eq!(rc.extensions, vec!["md"]);
    assert_eq!(rc.excluded_folders, vec![PathBuf::from("templates")]);
    assert_eq!(rc.logging.level, "warn");
    assert_eq!(rc.logging.file_level.as_deref(), Some("trace"));
    assert_eq!(rc.value_insertion["tags"].value(), &Value::Sequence(vec![]));
}

#[test]
fn empty_object_gives_defaults() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.json");
    write_file(&cfg_path, "{}");

    let rc = ConfigLoader::load(Some(&cfg_path)).expect("should load");
    assert_eq!(rc.id_key, "id");
    assert_eq!(rc.extensions, vec!["md"]);
    assert!(rc.value_insertion.is_empty());
    assert!(rc.excluded_folders.is_empty());
    assert_eq!(rc.logging.level, "info");
    assert!(rc.logging.file.is_none());
}

#[test]
fn log_file_tilde_is_expanded() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.json");
    write_file(&cfg_path, r#"{ "logging": { "file": "~/fmcheck.log" } }"#);

    let rc = ConfigLoader::load(Some(&cfg_path)).expect("should load");
    let file = rc.logging.file.expect("file set");
    assert!(!file.to_string_lossy().starts_with('~'));
    assert!(file.ends_with("fmcheck.log"));
}

#[test]
fn parse_picks_format_by_extension() {
    let json = ConfigLoader::parse(r#"{ "idKey": "a" }"#, Path::new("c.json")).unwrap();
    assert_eq!(json.id_key.as_deref(), Some("a"));

    let toml = ConfigLoader::parse("idKey = \"b\"\n", Path::new("c.toml")).unwrap();
    assert_eq!(toml.id_key.as_deref(), Some("b"));
}
