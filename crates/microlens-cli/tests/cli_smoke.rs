// SPDX-License-Identifier: MIT OR Apache-2.0
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("microlens-validate").unwrap();
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

fn write_json(dir: &Path, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn clean_submission() -> Value {
    json!({
        "team_name": "Team Alpha",
        "tier": "experienced",
        "repo_url": "https://github.com/alpha/fits",
        "events": [{
            "event_id": "rmdc26_0001",
            "solutions": [
                {"solution_id": "a", "model_type": "1S1L",
                 "parameters": {"t0": 2459123.5, "u0": 0.1, "tE": 20.0}},
                {"solution_id": "b", "model_type": "1S1L",
                 "parameters": {"t0": 2459124.0, "u0": 0.2, "tE": 25.0}}
            ]
        }]
    })
}

#[test]
fn help_works() {
    bin().arg("--help").assert().success();
}

#[test]
fn version_works() {
    bin().arg("--version").assert().success();
}

#[test]
fn help_mentions_core_subcommands() {
    let out = bin().arg("--help").assert().success().get_output().stdout.clone();
    let s = String::from_utf8(out).unwrap();
    for needle in ["validate", "tiers", "--config", "--format"] {
        assert!(s.contains(needle), "help missing `{needle}`");
    }
}

#[test]
fn invalid_command_fails_with_usage_code() {
    bin().arg("nonexistent-command").assert().code(2);
}

#[test]
fn clean_submission_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(dir.path(), "submission.json", &clean_submission());
    bin()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 error(s), 0 warning(s)"))
        .stdout(predicate::str::contains("rmdc26_0001"));
}

#[test]
fn errors_exit_one_and_json_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let mut sub = clean_submission();
    sub["events"][0]["solutions"][0]["parameters"]
        .as_object_mut()
        .unwrap()
        .remove("tE");
    let path = write_json(dir.path(), "submission.json", &sub);

    let out = bin()
        .args(["--format", "json", "validate"])
        .arg(&path)
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let report: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["findings"][0]["code"], "missing_parameter");
    assert_eq!(report["findings"][0]["severity"], "error");
    assert_eq!(report["findings"][0]["solution_id"], "a");
    assert_eq!(report["probabilities"][0]["estimates"][0]["probability"], 0.5);
}

#[test]
fn deny_warnings_turns_warnings_into_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut sub = clean_submission();
    sub["events"][0]["event_id"] = json!("rmdc26_9999");
    let path = write_json(dir.path(), "submission.json", &sub);

    bin().arg("validate").arg(&path).assert().success();
    bin()
        .args(["validate", "--deny-warnings"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("event_id_not_in_tier"));
}

#[test]
fn missing_file_exits_two() {
    bin()
        .args(["validate", "/nonexistent/submission.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read submission"));
}

#[test]
fn malformed_json_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    bin().arg("validate").arg(&path).assert().code(2).stderr(predicate::str::contains("invalid submission json"));
}

#[test]
fn wrong_typed_fields_are_reported_not_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut sub = clean_submission();
    let sol = &mut sub["events"][0]["solutions"][0];
    sol["higher_order_effects"] = json!(["wobble"]);
    sol["physical_parameters"] = json!({"Mtot": "1.0"});
    sol["log_likelihood"] = json!("-120.5");
    sol["n_data_points"] = json!(1250.5);
    let path = write_json(dir.path(), "submission.json", &sub);

    let out = bin().args(["--format", "json", "validate"]).arg(&path).assert().code(1).get_output().stdout.clone();
    let report: Value = serde_json::from_slice(&out).unwrap();
    let codes: Vec<&str> =
        report["findings"].as_array().unwrap().iter().filter_map(|f| f["code"].as_str()).collect();
    assert!(codes.contains(&"unknown_effect"), "{codes:?}");
    assert_eq!(codes.iter().filter(|c| **c == "non_numeric_parameter").count(), 3, "{codes:?}");
}

#[test]
fn config_file_changes_thresholds() {
    let dir = tempfile::tempdir().unwrap();
    let mut sub = clean_submission();
    sub["events"][0]["solutions"][0]["physical_parameters"] = json!({"D_L": 28.0, "D_S": 29.0});
    let path = write_json(dir.path(), "submission.json", &sub);

    bin()
        .args(["validate", "--deny-warnings"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("implausible_distance"));

    let config = dir.path().join("validation.yaml");
    std::fs::write(&config, "version: 1\nvalidation:\n  max_plausible_distance_kpc: 40.0\n").unwrap();
    bin().arg("--config").arg(&config).args(["validate", "--deny-warnings"]).arg(&path).assert().success();
}

#[test]
fn tier_file_replaces_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let tiers = dir.path().join("tiers.yaml");
    std::fs::write(
        &tiers,
        "version: 1\ntiers:\n  practice:\n    description: Practice round\n    events: {kind: list, ids: [p1, p2]}\n",
    )
    .unwrap();
    bin()
        .arg("--tiers")
        .arg(&tiers)
        .arg("tiers")
        .assert()
        .success()
        .stdout(predicate::str::contains("practice"))
        .stdout(predicate::str::contains("one of [p1, p2]"))
        .stdout(predicate::str::contains("beginner").not());
}

#[test]
fn fill_probabilities_writes_computed_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(dir.path(), "submission.json", &clean_submission());
    let out = dir.path().join("filled.json");
    bin().arg("validate").arg(&path).arg("--fill-probabilities").arg(&out).assert().success();

    let filled: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(filled["events"][0]["solutions"][0]["relative_probability"], 0.5);
    assert_eq!(filled["events"][0]["solutions"][1]["relative_probability"], 0.5);
}
