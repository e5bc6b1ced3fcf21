use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write(path: &PathBuf, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn fmc(xdg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fmc"));
    cmd.env("XDG_CONFIG_HOME", xdg);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_template_exits_two() {
    let tmp = tempdir().unwrap();
    let note = tmp.path().join("a.md");
    write(&note, "---\ntitle: A\n---\n");

    fmc(tmp.path())
        .arg("--template")
        .arg(tmp.path().join("nope.json"))
        .arg("--files")
        .arg(&note)
        .arg("--analyze")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to load template"));
}

#[test]
fn template_without_keys_exits_two() {
    let tmp = tempdir().unwrap();
    let template = tmp.path().join("template.json");
    write(&template, "{}");
    let note = tmp.path().join("a.md");
    write(&note, "---\ntitle: A\n---\n");

    fmc(tmp.path())
        .arg("--template")
        .arg(&template)
        .arg("--files")
        .arg(&note)
        .arg("--analyze")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not define any keys"));
}

#[test]
fn empty_directory_exits_two() {
    let tmp = tempdir().unwrap();
    let template = tmp.path().join("template.json");
    write(&template, r#"{ "title": null }"#);
    let notes = tmp.path().join("notes");
    fs::create_dir_all(&notes).unwrap();

    fmc(tmp.path())
        .arg("--template")
        .arg(&template)
        .arg("--dir")
        .arg(&notes)
        .arg("--analyze")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no files to process"));
}

#[test]
fn no_inputs_exits_two() {
    let tmp = tempdir().unwrap();
    let template = tmp.path().join("template.json");
    write(&template, r#"{ "title": null }"#);

    fmc(tmp.path())
        .arg("--template")
        .arg(&template)
        .arg("--analyze")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no files to process"));
}

#[test]
fn invalid_config_exits_two() {
    let tmp = tempdir().unwrap();
    let template = tmp.path().join("template.json");
    write(&template, r#"{ "title": null }"#);
    let cfg_path = tmp.path().join("config.json");
    write(&cfg_path, r#"{ "unknownField": true }"#);
    let note = tmp.path().join("a.md");
    write(&note, "---\ntitle: A\n---\n");

    fmc(tmp.path())
        .arg("--template")
        .arg(&template)
        .arg("--config")
        .arg(&cfg_path)
        .arg("--files")
        .arg(&note)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to load config"));

    assert_eq!(fs::read_to_string(&note).unwrap(), "---\ntitle: A\n---\n");
}

#[test]
fn missing_template_flag_is_usage_error() {
    let tmp = tempdir().unwrap();
    fmc(tmp.path())
        .arg("--analyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--template"));
}

#[test]
fn unterminated_file_is_not_written() {
    let tmp = tempdir().unwrap();
    let template = tmp.path().join("template.json");
    write(&template, r#"{ "title": null, "id": null }"#);
    let note = tmp.path().join("a.md");
    write(&note, "---\ntitle: A\nBody");

    fmc(tmp.path())
        .arg("--template")
        .arg(&template)
        .arg("--files")
        .arg(&note)
        .arg("--full-conform")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not terminated"));

    assert_eq!(fs::read_to_string(&note).unwrap(), "---\ntitle: A\nBody");
}
