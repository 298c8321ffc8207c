#![allow(deprecated)] // TODO: migrate cargo_bin to cargo_bin_cmd!

mod common;

use assert_cmd::Command;
use common::TestProject;
use predicates::prelude::*;

const PASSING_SCENARIO: &str = r#"
title: Greeting
steps:
  - name: Say hello
    code_blocks:
      - content: echo hi
        language: bash
        expected_output: hi
  - name: Say goodbye
    code_blocks:
      - content: echo "bye $NAME"
        language: bash
        expected_regex: '^bye \w+$'
variables:
  NAME: world
"#;

const FAILING_SCENARIO: &str = r#"
title: Broken
steps:
  - name: Fails
    code_blocks:
      - content: echo oops >&2; exit 4
        language: bash
  - name: Never runs
    code_blocks:
      - content: echo unreachable
"#;

/// Top-level help lists every subcommand
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("scenarioflow").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("test"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("scenarioflow").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("scenarioflow"));
}

#[test]
fn test_test_help() {
    let mut cmd = Command::cargo_bin("scenarioflow").unwrap();
    cmd.arg("test")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--subscription"))
        .stdout(predicate::str::contains("--var"))
        .stdout(predicate::str::contains("--status-file"));
}

#[test]
fn test_validate_scenario() {
    let project = TestProject::new();
    let path = project.write_scenario("scenario.yaml", PASSING_SCENARIO);

    project
        .command()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Scenario is valid"))
        .stdout(predicate::str::contains("Steps: 2 (2 code blocks)"))
        .stdout(predicate::str::contains("[pattern]"));
}

#[test]
fn test_validate_invalid_scenario() {
    let project = TestProject::new();
    let path = project.write_scenario("scenario.yaml", "title: [unclosed");

    project
        .command()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid scenario"));
}

#[test]
fn test_compare_match() {
    let mut cmd = Command::cargo_bin("scenarioflow").unwrap();
    cmd.args(["compare", "--actual", "hello world", "--expected", "hello world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Output matches"));
}

#[test]
fn test_compare_json_ignores_formatting() {
    let mut cmd = Command::cargo_bin("scenarioflow").unwrap();
    cmd.args([
        "compare",
        "--actual",
        r#"{"a": 1, "b": [1, 2]}"#,
        "--expected",
        r#"{"b":[1,2],"a":1}"#,
        "--language",
        "json",
    ])
    .assert()
    .success();
}

#[test]
fn test_compare_mismatch() {
    let mut cmd = Command::cargo_bin("scenarioflow").unwrap();
    cmd.args(["compare", "--actual", "goodbye", "--expected", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected score"));
}

#[test]
fn test_run_passing_scenario() {
    let project = TestProject::new();
    let path = project.write_scenario("scenario.yaml", PASSING_SCENARIO);

    project
        .command()
        .arg("test")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("bash $ echo hi"))
        .stdout(predicate::str::contains("bye world"))
        .stdout(predicate::str::contains("All code blocks passed"))
        .stdout(predicate::str::contains("ie_us").not());
}

#[test]
fn test_run_with_var_override() {
    let project = TestProject::new();
    let path = project.write_scenario("scenario.yaml", PASSING_SCENARIO);

    project
        .command()
        .args(["test", "--var", "NAME=cli"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("bye cli"));
}

#[test]
fn test_run_uses_project_config() {
    let project = TestProject::new();
    let path = project.write_scenario("scenario.yaml", PASSING_SCENARIO);
    std::fs::write(
        project.path().join("scenarioflow.yaml"),
        "variables:\n  NAME: config\n",
    )
    .unwrap();

    project
        .command()
        .arg("test")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("bye config"));
}

#[test]
fn test_run_failing_scenario() {
    let project = TestProject::new();
    let path = project.write_scenario("scenario.yaml", FAILING_SCENARIO);

    project
        .command()
        .arg("test")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("oops"))
        .stderr(predicate::str::contains("Command exited with status 4"))
        .stdout(predicate::str::contains("unreachable").not());
}

#[test]
fn test_run_azure_reports_status() {
    let project = TestProject::new();
    let path = project.write_scenario("scenario.yaml", PASSING_SCENARIO);

    project
        .command()
        .args(["test", "--environment", "azure"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ie_us"))
        .stdout(predicate::str::contains("\"status\":\"Succeeded\""))
        .stdout(predicate::str::contains("ie_ue"));
}

#[test]
fn test_run_writes_status_file() {
    let project = TestProject::new();
    let path = project.write_scenario("scenario.yaml", FAILING_SCENARIO);
    let status_file = project.path().join("state").join("status.json");

    project
        .command()
        .arg("test")
        .arg(&path)
        .arg("--status-file")
        .arg(&status_file)
        .assert()
        .failure();

    let content = std::fs::read_to_string(&status_file).unwrap();
    assert!(content.contains("\"Failed\""));
    assert!(content.contains("1. Fails"));
}

#[test]
fn test_run_missing_scenario() {
    let project = TestProject::new();

    project
        .command()
        .args(["test", "missing.yaml"])
        .assert()
        .failure();
}

/// Unknown subcommands are rejected
#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("scenarioflow").unwrap();
    cmd.arg("invalid-command").assert().failure();
}
