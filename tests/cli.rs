use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const DOCUMENT: &str = r#"<speak version="1.0">
    <s>Hello <emphasis level="strong">world</emphasis></s>
</speak>
"#;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn list_formats() {
    let mut cmd = cargo_bin_cmd!("ssml");
    cmd.arg("--list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("Available formats:")
            .and(predicate::str::contains("token-simple"))
            .and(predicate::str::contains("One token per line"))
            .and(predicate::str::contains("ast-treeviz"))
            .and(predicate::str::contains("ast-yaml")),
    );
}

#[test]
fn default_format_is_treeviz() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "doc.ssml", DOCUMENT);

    let mut cmd = cargo_bin_cmd!("ssml");
    cmd.arg(&path);

    cmd.assert().success().stdout(
        predicate::str::starts_with("⧉ speak [version=1.0]")
            .and(predicate::str::contains("◇ emphasis [level=strong]")),
    );
}

#[test]
fn tag_format() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "doc.ssml", DOCUMENT);

    let mut cmd = cargo_bin_cmd!("ssml");
    cmd.arg(&path).arg("--format").arg("ast-tag");

    cmd.assert().success().stdout(
        r#"<speak version="1.0"><s>Hello<emphasis level="strong">world</emphasis></s></speak>"#,
    );
}

#[test]
fn token_format() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "doc.ssml", "<speak>hi</speak>");

    let mut cmd = cargo_bin_cmd!("ssml");
    cmd.arg(&path).arg("-f").arg("token-simple");

    cmd.assert()
        .success()
        .stdout("opening-tag \"<speak>\"\ntext \"hi\"\nclosing-tag \"</speak>\"\n");
}

#[test]
fn json_format_is_valid_json() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "doc.ssml", DOCUMENT);

    let mut cmd = cargo_bin_cmd!("ssml");
    cmd.arg(&path).arg("--format").arg("ast-json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["value"], "speak");
}

#[test]
fn warnings_go_to_stderr_when_requested() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.ssml", "<speak><s>open</speak>");

    let mut quiet = cargo_bin_cmd!("ssml");
    quiet.arg(&path).arg("--format").arg("ast-tag");
    quiet.assert().success().stderr(predicate::str::is_empty());

    let mut loud = cargo_bin_cmd!("ssml");
    loud.arg(&path).arg("--format").arg("ast-tag").arg("--warnings");
    loud.assert().success().stderr(
        predicate::str::contains("warning: closing tag </speak> closes <s>")
            .and(predicate::str::contains("warning: tag <speak> is never closed")),
    );
}

#[test]
fn builder_choice_gives_the_same_output() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "doc.ssml", DOCUMENT);

    let stack = cargo_bin_cmd!("ssml")
        .arg(&path)
        .arg("--builder")
        .arg("stack")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let recursive = cargo_bin_cmd!("ssml")
        .arg(&path)
        .arg("--builder")
        .arg("recursive")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(stack, recursive);
}

#[test]
fn config_file_sets_the_format() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "doc.ssml", "<speak>hi</speak>");
    let config = write_file(&dir, "ssml.toml", "[output]\nformat = \"ast-tag\"\n");

    let mut cmd = cargo_bin_cmd!("ssml");
    cmd.arg(&path).arg("--config").arg(&config);

    cmd.assert().success().stdout("<speak>hi</speak>");
}

#[test]
fn unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "doc.ssml", DOCUMENT);

    let mut cmd = cargo_bin_cmd!("ssml");
    cmd.arg(&path).arg("--format").arg("ast-xml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format type"));
}

#[test]
fn missing_file_fails() {
    let mut cmd = cargo_bin_cmd!("ssml");
    cmd.arg("/no/such/document.ssml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Processing error"));
}
