//! Basic CLI E2E tests.
//!
//! Each test runs the binary against its own temporary data directory.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli_in(dir: &Path, args: &[&str], stdin: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomotick"))
        .args(args)
        .env("POMOTICK_DATA_DIR", dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn run_cli(dir: &Path, args: &[&str]) -> (i32, String, String) {
    run_cli_in(dir, args, "")
}

fn stats_json(dir: &Path) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(dir, &["stats", "show", "--json"]);
    assert_eq!(code, 0, "stats show failed: {stderr}");
    serde_json::from_str(&stdout).expect("stats output is JSON")
}

fn seed_stats(dir: &Path, count: &str, minutes: &str) {
    let db = pomotick_db(dir);
    db.execute(
        "INSERT OR REPLACE INTO kv (key, value) VALUES ('pomodoroCount', ?1), ('totalMinutes', ?2)",
        [count, minutes],
    )
    .expect("seed stats");
}

fn pomotick_db(dir: &Path) -> rusqlite::Connection {
    // Creates the schema on first use.
    let (code, _, stderr) = run_cli(dir, &["stats", "show"]);
    assert_eq!(code, 0, "stats show failed: {stderr}");
    rusqlite::Connection::open(dir.join("pomotick.db")).expect("open db")
}

#[test]
fn test_stats_show_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let stats = stats_json(dir.path());
    assert_eq!(stats["completed_sessions"], 0);
    assert_eq!(stats["whole_minutes"], 0);

    let (code, stdout, _) = run_cli(dir.path(), &["stats", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Pomodoros: 0"));
    assert!(stdout.contains("Study minutes: 0"));
}

#[test]
fn test_stats_show_reads_existing_values() {
    let dir = tempfile::tempdir().unwrap();
    seed_stats(dir.path(), "3", "80.7");
    let stats = stats_json(dir.path());
    assert_eq!(stats["completed_sessions"], 3);
    assert_eq!(stats["whole_minutes"], 80);
}

#[test]
fn test_stats_reset_yes() {
    let dir = tempfile::tempdir().unwrap();
    seed_stats(dir.path(), "5", "125");

    let (code, stdout, _) = run_cli(dir.path(), &["stats", "reset", "--yes"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("statistics reset"));
    assert_eq!(stats_json(dir.path())["completed_sessions"], 0);
}

#[test]
fn test_stats_reset_prompt() {
    let dir = tempfile::tempdir().unwrap();
    seed_stats(dir.path(), "2", "50");

    let (code, stdout, stderr) = run_cli_in(dir.path(), &["stats", "reset"], "n\n");
    assert_eq!(code, 0);
    assert!(stderr.contains("Are you sure you want to reset your stats?"));
    assert!(stdout.contains("statistics kept"));
    assert_eq!(stats_json(dir.path())["completed_sessions"], 2);

    let (code, stdout, _) = run_cli_in(dir.path(), &["stats", "reset"], "y\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("statistics reset"));
    assert_eq!(stats_json(dir.path())["whole_minutes"], 0);
}

#[test]
fn test_config_set_get() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "ui.monochrome"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "false");

    let (code, _, stderr) = run_cli(dir.path(), &["config", "set", "ui.monochrome", "true"]);
    assert_eq!(code, 0, "config set failed: {stderr}");

    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "ui.monochrome"]);
    assert_eq!(stdout.trim(), "true");

    let (code, stdout, _) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("monochrome = true"));
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "no.such.key", "1"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_reset_repairs_broken_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "this is [not toml").unwrap();

    let (code, _, _) = run_cli(dir.path(), &["stats", "show"]);
    assert_eq!(code, 1);

    let (code, _, stderr) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0, "config reset failed: {stderr}");
    let (code, _, _) = run_cli(dir.path(), &["stats", "show"]);
    assert_eq!(code, 0);
}

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("pomotick"));
}
