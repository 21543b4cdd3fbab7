//! CLI integration tests for schema-introspect.
//!
//! These tests verify command-line argument parsing, output formats,
//! and exit codes against metadata fixtures written to temp files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get a command for the schema-introspect binary.
fn cmd() -> Command {
    Command::cargo_bin("schema-introspect").unwrap()
}

const DERBY_FIXTURE: &str = r#"
product:
  name: Apache Derby
  version: 10.14.2.0
tables:
  - table: { TABLE_SCHEM: APP, TABLE_NAME: ORDERS }
    columns:
      - { COLUMN_NAME: ID, DATA_TYPE: 4, NULLABLE: 0, ORDINAL_POSITION: 1, COLUMN_DEF: GENERATED_BY_DEFAULT }
      - { COLUMN_NAME: STATUS, DATA_TYPE: 12, TYPE_NAME: VARCHAR, ORDINAL_POSITION: 2, COLUMN_DEF: "'NEW'" }
    primary_keys:
      - { COLUMN_NAME: ID, KEY_SEQ: 1 }
    indexes:
      - { INDEX_NAME: SQL000000000012345, COLUMN_NAME: ID, NON_UNIQUE: false, TYPE: 3 }
      - { INDEX_NAME: IDX_STATUS, COLUMN_NAME: STATUS, NON_UNIQUE: true, TYPE: 3 }
"#;

const BROKEN_TABLE: &str = r#"
  - table: { TABLE_SCHEM: APP, TABLE_NAME: BROKEN }
    columns:
      - { COLUMN_NAME: ID }
"#;

fn write_fixture(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("dialects"))
        .stdout(predicate::str::contains("normalize-default"));
}

#[test]
fn test_inspect_subcommand_help() {
    cmd()
        .args(["inspect", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--schema"))
        .stdout(predicate::str::contains("--dialect"))
        .stdout(predicate::str::contains("--table"))
        .stdout(predicate::str::contains("--exclude"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("schema-introspect"));
}

#[test]
fn test_missing_subcommand() {
    cmd().assert().failure().code(2);
}

// =============================================================================
// Inspect Tests
// =============================================================================

#[test]
fn test_inspect_derby_fixture() {
    let fixture = write_fixture(DERBY_FIXTURE);

    cmd()
        .arg("--fixture")
        .arg(fixture.path())
        .arg("inspect")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dialect: derby"))
        .stdout(predicate::str::contains("default 'NEW'"))
        .stdout(predicate::str::contains("auto-increment"))
        .stdout(predicate::str::contains("IDX_STATUS"))
        .stdout(predicate::str::contains("SQL000000000012345").not());
}

#[test]
fn test_inspect_json_output() {
    let fixture = write_fixture(DERBY_FIXTURE);

    let output = cmd()
        .arg("--fixture")
        .arg(fixture.path())
        .arg("--output-json")
        .arg("inspect")
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["dialect"], "derby");
    assert_eq!(snapshot["tables"][0]["name"], "ORDERS");
    assert_eq!(snapshot["tables"][0]["columns"][1]["default_value"], "NEW");
}

#[test]
fn test_inspect_dialect_override() {
    let fixture = write_fixture(DERBY_FIXTURE);

    cmd()
        .arg("--fixture")
        .arg(fixture.path())
        .args(["inspect", "--dialect", "generic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dialect: generic"))
        .stdout(predicate::str::contains("default ''NEW''"))
        .stdout(predicate::str::contains("SQL000000000012345"));
}

#[test]
fn test_inspect_partial_failure_exit_code() {
    let fixture = write_fixture(&format!("{}{}", DERBY_FIXTURE, BROKEN_TABLE));

    cmd()
        .arg("--fixture")
        .arg(fixture.path())
        .arg("inspect")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("APP.ORDERS"))
        .stdout(predicate::str::contains("Failed tables:"))
        .stdout(predicate::str::contains("BROKEN"));
}

#[test]
fn test_inspect_exclude_broken_table() {
    let fixture = write_fixture(&format!("{}{}", DERBY_FIXTURE, BROKEN_TABLE));

    cmd()
        .arg("--fixture")
        .arg(fixture.path())
        .args(["inspect", "--exclude", "broken"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 read, 0 failed"));
}

#[test]
fn test_inspect_fixture_from_config() {
    let fixture = write_fixture(DERBY_FIXTURE);
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "schema: APP").unwrap();
    writeln!(config, "fixture: {}", fixture.path().display()).unwrap();

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("inspect")
        .assert()
        .success()
        .stdout(predicate::str::contains("APP.ORDERS"));
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[test]
fn test_inspect_without_fixture() {
    cmd()
        .arg("inspect")
        .assert()
        .code(2) // configuration error
        .stderr(predicate::str::contains("no metadata fixture"));
}

#[test]
fn test_inspect_missing_fixture_file() {
    cmd()
        .args(["--fixture", "/nonexistent/dump.yaml", "inspect"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_inspect_malformed_yaml_fixture() {
    let fixture = write_fixture("product: [not, a, product\n");

    cmd()
        .arg("--fixture")
        .arg(fixture.path())
        .arg("inspect")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Fixture error"));
}

#[test]
fn test_inspect_malformed_json_fixture() {
    let mut fixture = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(fixture, "{{\"product\": ").unwrap();

    cmd()
        .arg("--fixture")
        .arg(fixture.path())
        .arg("inspect")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Fixture error"));
}

#[test]
fn test_inspect_unknown_dialect() {
    let fixture = write_fixture(DERBY_FIXTURE);

    cmd()
        .arg("--fixture")
        .arg(fixture.path())
        .args(["inspect", "--dialect", "oracle"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown dialect 'oracle'"));
}

#[test]
fn test_invalid_config_yaml() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "invalid: yaml: content: [").unwrap();

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("inspect")
        .assert()
        .code(2);
}

#[test]
fn test_config_with_empty_table_types() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "table_types: []").unwrap();

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("inspect")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("table_types"));
}

// =============================================================================
// Dialects and Normalize-Default Tests
// =============================================================================

#[test]
fn test_dialects_lists_builtins() {
    cmd()
        .arg("dialects")
        .assert()
        .success()
        .stdout(predicate::str::contains("derby"))
        .stdout(predicate::str::contains("generic"));
}

#[test]
fn test_normalize_default_unescapes_literal() {
    cmd()
        .args(["normalize-default", "'it''s'"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default: it's"))
        .stdout(predicate::str::contains("Auto-increment: no"));
}

#[test]
fn test_normalize_default_identity_marker() {
    cmd()
        .args([
            "normalize-default",
            "--type-code",
            "4",
            "AUTOINCREMENT: start 1 increment 1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default: (none)"))
        .stdout(predicate::str::contains("Auto-increment: yes"));
}

#[test]
fn test_normalize_default_numeric_column_untouched() {
    cmd()
        .args(["--output-json", "normalize-default", "--type-code", "4", "'5'"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"default_value\": \"'5'\""));
}

#[test]
fn test_normalize_default_unknown_dialect() {
    cmd()
        .args(["normalize-default", "--dialect", "oracle", "'x'"])
        .assert()
        .code(2);
}
