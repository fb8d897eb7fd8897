use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;

const EXAMPLE: &str = "[[1,0,0],[1,1,0],[0,1,1]]";

fn run_json(args: &[&str], input: &str) -> Value {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("matrix.json");
    fs::write(&path, input).expect("write input");

    let exe = assert_cmd::cargo_bin!("crossmin-cli");
    let output = Command::new(exe)
        .args(args)
        .arg(path.to_string_lossy().as_ref())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

#[test]
fn cli_solves_with_try_all_by_default() {
    let out = run_json(&["--seed", "3"], EXAMPLE);
    assert_eq!(out["order"], serde_json::json!([0, 1, 2]));
    assert_eq!(out["crossings"].as_f64(), Some(0.0));
    assert_eq!(out["strategy"], "barycenter");
}

#[test]
fn cli_accepts_an_options_document_and_flag_overrides() {
    let doc = r#"{ "matrix": [[true, false], [false, true]], "options": { "strategy": "binopt" } }"#;
    let out = run_json(&[], doc);
    assert_eq!(out["strategy"], "binary-lp");

    let out = run_json(&["solve", "--strategy", "median"], doc);
    assert_eq!(out["strategy"], "median");
    assert_eq!(out["order"], serde_json::json!([0, 1]));
}

#[test]
fn cli_prints_the_cost_matrix() {
    let out = run_json(&["costs"], EXAMPLE);
    assert_eq!(out["lower"], 3);
    assert_eq!(out["upper"], 3);
    assert_eq!(
        out["costs"],
        serde_json::json!([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 3.0, 0.0]])
    );
}

#[test]
fn cli_counts_crossings_of_a_given_order() {
    let out = run_json(&["count", "--order", "2,1,0"], EXAMPLE);
    assert_eq!(out["crossings"].as_f64(), Some(6.0));
}

#[test]
fn cli_reads_stdin_and_reports_with_verbose() {
    let exe = assert_cmd::cargo_bin!("crossmin-cli");
    let assert = assert_cmd::Command::new(exe)
        .args(["--verbose", "--seed", "1", "-"])
        .write_stdin(EXAMPLE)
        .assert()
        .success();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("barycenter 0"), "{stderr}");
    assert!(stderr.contains("binary-lp 0"), "{stderr}");
}

#[test]
fn cli_rejects_unknown_strategies_and_bad_orders() {
    let exe = assert_cmd::cargo_bin!("crossmin-cli");
    assert_cmd::Command::new(exe)
        .args(["--strategy", "annealing", "-"])
        .write_stdin(EXAMPLE)
        .assert()
        .code(2);

    let exe = assert_cmd::cargo_bin!("crossmin-cli");
    assert_cmd::Command::new(exe)
        .args(["count", "--order", "0,1", "-"])
        .write_stdin(EXAMPLE)
        .assert()
        .code(1);
}

#[test]
fn cli_reads_strategy_names_in_documents_like_the_flag() {
    let doc = format!(r#"{{ "matrix": {EXAMPLE}, "options": {{ "strategy": "Median" }} }}"#);
    let from_doc = run_json(&[], &doc);
    let from_flag = run_json(&["--strategy", "Median"], EXAMPLE);
    assert_eq!(from_doc["strategy"], "median");
    assert_eq!(from_doc, from_flag);
}

#[test]
fn cli_rejects_unknown_strategies_in_documents() {
    let doc = format!(r#"{{ "matrix": {EXAMPLE}, "options": {{ "strategy": "annealing" }} }}"#);
    let exe = assert_cmd::cargo_bin!("crossmin-cli");
    let assert = assert_cmd::Command::new(exe)
        .arg("-")
        .write_stdin(doc)
        .assert()
        .code(2);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("invalid argument: unknown strategy: annealing"), "{stderr}");
}

#[test]
fn cli_rejects_misspelled_option_keys() {
    let doc = format!(r#"{{ "matrix": {EXAMPLE}, "options": {{ "strategey": "median" }} }}"#);
    let exe = assert_cmd::cargo_bin!("crossmin-cli");
    let assert = assert_cmd::Command::new(exe)
        .arg("-")
        .write_stdin(doc)
        .assert()
        .code(2);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("unknown field `strategey`"), "{stderr}");
}

#[test]
fn cli_prints_its_version() {
    let exe = assert_cmd::cargo_bin!("crossmin-cli");
    let assert = assert_cmd::Command::new(exe)
        .arg("--version")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert_eq!(stdout.trim(), format!("crossmin-cli {}", env!("CARGO_PKG_VERSION")));
}
