//! Integration tests for the datapact CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

const AGE_SCHEMA: &str = r#"{
    "fields": {
        "age": {
            "type": "Int64",
            "constraints": [{"type": "maximum_value", "max_value": 120}]
        }
    }
}"#;

#[test]
fn validate_passes_on_good_data() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_file(&dir, "schema.json", AGE_SCHEMA);
    let data = write_file(&dir, "data.json", r#"{"age": [25, 30]}"#);

    Command::cargo_bin("datapact")
        .unwrap()
        .arg("validate")
        .arg(&schema)
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"));
}

#[test]
fn validate_fails_on_bad_data_with_exit_code_one() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_file(&dir, "schema.json", AGE_SCHEMA);
    let data = write_file(&dir, "data.json", r#"{"age": [25, 150]}"#);

    Command::cargo_bin("datapact")
        .unwrap()
        .arg("validate")
        .arg(&schema)
        .arg(&data)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("Maximum value 150 exceeds limit 120"));
}

#[test]
fn validate_json_format_emits_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_file(&dir, "schema.json", AGE_SCHEMA);
    let data = write_file(&dir, "data.json", r#"{"age": [25, 150]}"#);

    Command::cargo_bin("datapact")
        .unwrap()
        .arg("validate")
        .arg(&schema)
        .arg(&data)
        .arg("--format")
        .arg("json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"passed\": false"))
        .stdout(predicate::str::contains("maximum_value(age)"));
}

#[test]
fn check_accepts_well_formed_schema() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_file(&dir, "schema.json", AGE_SCHEMA);

    Command::cargo_bin("datapact")
        .unwrap()
        .arg("check")
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema OK: 1 field(s), 1 constraint(s)"));
}

#[test]
fn check_rejects_schema_without_fields_key() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_file(&dir, "schema.json", r#"{"columns": {}}"#);

    Command::cargo_bin("datapact")
        .unwrap()
        .arg("check")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Schema must contain a 'fields' key"));
}

#[test]
fn check_rejects_unknown_constraint_kind() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_file(
        &dir,
        "schema.json",
        r#"{
            "fields": {
                "age": {
                    "type": "Int64",
                    "constraints": [{"type": "sum_of_squares"}]
                }
            }
        }"#,
    );

    Command::cargo_bin("datapact")
        .unwrap()
        .arg("check")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown constraint type: sum_of_squares"));
}

#[test]
fn validate_reports_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_file(&dir, "schema.json", AGE_SCHEMA);
    let data = write_file(&dir, "data.json", r#"{"other": [1, 2]}"#);

    Command::cargo_bin("datapact")
        .unwrap()
        .arg("validate")
        .arg(&schema)
        .arg(&data)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Column 'age' not found in dataset"));
}
