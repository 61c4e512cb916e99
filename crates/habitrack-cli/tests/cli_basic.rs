//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with `HABITRACK_HOME` pointing at a fresh
//! temporary directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `home` and return (stdout, stderr, code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_habitrack"))
        .env("HABITRACK_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

fn add_activity(home: &Path, args: &[&str]) -> String {
    let mut full = vec!["activity", "add"];
    full.extend_from_slice(args);
    let out = run_ok(home, &full);
    out.trim()
        .strip_prefix("Activity created: ")
        .expect("create output")
        .to_string()
}

#[test]
fn test_activity_add_and_list() {
    let home = tempfile::tempdir().unwrap();
    let id = add_activity(home.path(), &["Read", "--schedule", "weekdays"]);

    let out = run_ok(home.path(), &["activity", "list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], id.as_str());
    assert_eq!(items[0]["schedule"]["type"], "weekdays");
    assert!(home.path().join("activities.json").exists());
    assert!(home.path().join("config.toml").exists());
}

#[test]
fn test_activity_add_rejects_invalid_weekday() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["activity", "add", "Bad", "--schedule", "custom:2,8"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("invalid weekday 8"), "{stderr}");
}

#[test]
fn test_weekday_streak_scenario() {
    let home = tempfile::tempdir().unwrap();
    add_activity(
        home.path(),
        &["Bike", "--schedule", "weekdays", "--created", "2024-01-01"],
    );
    for d in ["2024-01-08", "2024-01-09", "2024-01-10", "2024-01-11", "2024-01-12"] {
        run_ok(home.path(), &["mark", "done", "bike", "--date", d]);
    }

    for (as_of, expected) in [("2024-01-12", 5), ("2024-01-13", 5), ("2024-01-15", 0)] {
        let out = run_ok(home.path(), &["streak", "Bike", "--as-of", as_of, "--json"]);
        let report: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["current_streak"], expected, "as of {as_of}");
        assert_eq!(report["longest_streak"], 5);
    }
}

#[test]
fn test_skip_breaks_streak() {
    let home = tempfile::tempdir().unwrap();
    add_activity(home.path(), &["Floss", "--created", "2024-03-01"]);
    run_ok(home.path(), &["mark", "done", "Floss", "--date", "2024-03-04"]);
    run_ok(home.path(), &["mark", "skip", "Floss", "--date", "2024-03-05"]);

    let out = run_ok(home.path(), &["streak", "Floss", "--as-of", "2024-03-05", "--json"]);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["current_streak"], 0);

    run_ok(home.path(), &["mark", "clear", "Floss", "--date", "2024-03-05"]);
    let out = run_ok(home.path(), &["week", "Floss", "--as-of", "2024-03-05", "--json"]);
    let strip: serde_json::Value = serde_json::from_str(&out).unwrap();
    let cells = strip.as_array().unwrap();
    assert_eq!(cells.len(), 7);
    assert_eq!(cells[6]["status"], "pending");
    assert_eq!(cells[5]["status"], "completed");
    assert_eq!(cells[0]["status"], "not_due");
}

#[test]
fn test_remind_lists_due_activities() {
    let home = tempfile::tempdir().unwrap();
    add_activity(
        home.path(),
        &["Gym", "--schedule", "weekends", "--created", "2024-01-01", "--remind", "07:30"],
    );
    add_activity(
        home.path(),
        &["Plants", "--created", "2024-01-01", "--remind"],
    );

    let out = run_ok(home.path(), &["remind", "--date", "2024-01-13"]);
    assert!(out.contains("07:30  Gym"), "{out}");
    assert!(out.contains("09:00  Plants"), "{out}");
    assert!(out.contains("2 reminder(s) armed"), "{out}");

    let out = run_ok(home.path(), &["remind", "--date", "2024-01-10"]);
    assert!(out.contains("1 reminder(s) armed"), "{out}");
}

#[test]
fn test_remind_respects_disabled_config() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["config", "set", "reminders.enabled", "false"]);
    let out = run_ok(home.path(), &["remind"]);
    assert!(out.contains("disabled"));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(home.path(), &["config", "get", "display.strip_days"]).trim(), "7");
    run_ok(home.path(), &["config", "set", "calendar.day_policy", "+09:00"]);
    assert_eq!(
        run_ok(home.path(), &["config", "get", "calendar.day_policy"]).trim(),
        "+09:00"
    );

    let (_, _, code) = run_cli(home.path(), &["config", "set", "display.strip_days", "0"]);
    assert_ne!(code, 0);
    let (_, _, code) = run_cli(home.path(), &["config", "get", "ui.dark_mode"]);
    assert_ne!(code, 0);
}

#[test]
fn test_activity_remove() {
    let home = tempfile::tempdir().unwrap();
    let id = add_activity(home.path(), &["Temp"]);
    let out = run_ok(home.path(), &["activity", "remove", &id[..8]]);
    assert!(out.contains(&id));

    let (_, stderr, code) = run_cli(home.path(), &["activity", "show", "Temp"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("No activity matches"));
}

#[test]
fn test_week_days_bounds() {
    let home = tempfile::tempdir().unwrap();
    add_activity(home.path(), &["Walk", "--created", "2024-01-01"]);

    let out = run_ok(
        home.path(),
        &["week", "Walk", "--as-of", "2024-01-10", "--days", "3", "--json"],
    );
    let strip: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(strip.as_array().unwrap().len(), 3);

    for days in ["0", "1000000"] {
        let (_, stderr, code) = run_cli(home.path(), &["week", "Walk", "--days", days]);
        assert_ne!(code, 0, "--days {days} accepted");
        assert!(stderr.contains("outside 1..=31"), "{stderr}");
    }
}

#[test]
fn test_not_due_warning_only_when_marking() {
    let home = tempfile::tempdir().unwrap();
    add_activity(
        home.path(),
        &["Gym", "--schedule", "weekends", "--created", "2024-01-01"],
    );

    // 2024-01-10 is a Wednesday
    let (_, stderr, code) = run_cli(home.path(), &["mark", "done", "Gym", "--date", "2024-01-10"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("not due"), "{stderr}");

    let (stdout, stderr, code) =
        run_cli(home.path(), &["mark", "clear", "Gym", "--date", "2024-01-10"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("cleared"), "{stdout}");
    assert!(!stderr.contains("not due"), "{stderr}");
}

#[test]
fn test_remind_survives_broken_config() {
    let home = tempfile::tempdir().unwrap();
    add_activity(
        home.path(),
        &["Plants", "--created", "2024-01-01", "--remind", "18:00"],
    );
    std::fs::write(home.path().join("config.toml"), "[display]\nstrip_days = 400\n").unwrap();

    let out = run_ok(home.path(), &["remind", "--date", "2024-01-10"]);
    assert!(out.contains("18:00  Plants"), "{out}");

    let (_, _, code) = run_cli(home.path(), &["activity", "list"]);
    assert_ne!(code, 0);
}
