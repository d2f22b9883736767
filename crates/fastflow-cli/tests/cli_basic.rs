//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "fastflow-cli", "--"])
        .args(args)
        .env("FASTFLOW_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("FastFlow CLI"));
    assert!(stdout.contains("fast"));
    assert!(stdout.contains("journal"));
}

#[test]
fn test_fast_status_is_json_snapshot() {
    let (stdout, _, code) = run_cli(&["fast", "status"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("status output should be JSON");
    assert_eq!(parsed["type"], "StateSnapshot");
    assert!(parsed.get("progress_pct").is_some());
}

#[test]
fn test_config_list_shows_sections() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("coach").is_some());
    assert!(parsed.get("fasting").is_some());
    assert!(parsed.get("journal").is_some());
}

#[test]
fn test_config_get_known_key() {
    let (stdout, _, code) = run_cli(&["config", "get", "fasting.default_fasting_hours"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "16");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_stats_is_json() {
    let (stdout, _, code) = run_cli(&["stats"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("total_sessions").is_some());
    assert!(parsed.get("mood_trend").is_some());
}

#[test]
fn test_journal_list_is_json_array() {
    let (stdout, _, code) = run_cli(&["journal", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.is_array());
}

#[test]
fn test_onboard_requires_arguments() {
    let (_, _, code) = run_cli(&["onboard"]);
    assert_ne!(code, 0);
}

#[test]
fn test_reset_requires_confirmation() {
    let (_, stderr, code) = run_cli(&["reset"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--yes"));
}
