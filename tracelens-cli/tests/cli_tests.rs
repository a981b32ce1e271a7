//! Integration tests for the tracelens CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const CIRCUIT: &str = r#"{
    "components": [
        { "reference": "R1", "value": "1k", "position": [0.0, 0.0],
          "pins": ["1", "2"], "nets": ["SIG1"] },
        { "reference": "C1", "value": "100n", "position": [10.0, 0.0],
          "pins": ["1", "2"], "nets": ["SIG1", "SIG2"] },
        { "reference": "OPA1", "value": "TL072", "position": [20.0, 0.0],
          "pins": ["IN+", "OUT", "VCC", "GND"], "nets": ["SIG2", "VCC", "GND"] }
    ]
}"#;

fn fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

#[test]
fn test_analyze_human_output() {
    let file = fixture(CIRCUIT);

    Command::cargo_bin("tracelens-cli")
        .unwrap()
        .args(["analyze", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analysis score"))
        .stdout(predicate::str::contains("3 components"));
}

#[test]
fn test_analyze_json_output_is_parseable() {
    let file = fixture(CIRCUIT);

    let output = Command::cargo_bin("tracelens-cli")
        .unwrap()
        .args(["analyze", file.path().to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["components"]["R1"]["component_type"], "resistor");
    assert!(value["analysis_score"].as_f64().unwrap() <= 100.0);
}

#[test]
fn test_fail_under_gates_exit_code() {
    let file = fixture(CIRCUIT);

    // A clean little circuit scores well above 20.
    Command::cargo_bin("tracelens-cli")
        .unwrap()
        .args([
            "analyze",
            file.path().to_str().unwrap(),
            "--fail-under",
            "20",
        ])
        .assert()
        .success();

    Command::cargo_bin("tracelens-cli")
        .unwrap()
        .args([
            "analyze",
            file.path().to_str().unwrap(),
            "--fail-under",
            "101",
        ])
        .assert()
        .code(1);
}

#[test]
fn test_malformed_input_reports_typed_error() {
    let file = fixture(r#"{ "components": 42 }"#);

    Command::cargo_bin("tracelens-cli")
        .unwrap()
        .args(["analyze", file.path().to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("malformed circuit description"));
}

#[test]
fn test_missing_file_reports_error() {
    Command::cargo_bin("tracelens-cli")
        .unwrap()
        .args(["analyze", "/nonexistent/circuit.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_recommendations_subcommand() {
    let file = fixture(CIRCUIT);

    Command::cargo_bin("tracelens-cli")
        .unwrap()
        .args(["recommendations", file.path().to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn test_loops_subcommand() {
    let file = fixture(CIRCUIT);

    Command::cargo_bin("tracelens-cli")
        .unwrap()
        .args(["loops", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No ground loops"));
}
