//! Integration tests for the rules-service binary

use super::test_utils::{write_config, IsolatedHome};
use std::process::{Command, Output};

fn run(home: &IsolatedHome, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rules-service"))
        .env_clear()
        .env("HOME", home.home())
        .env("XDG_CONFIG_HOME", home.config_home())
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_check_without_storage_path_fails() {
    let home = IsolatedHome::new();
    let output = run(&home, &["check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no storage path specified"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_check_prints_json() {
    let home = IsolatedHome::new();
    let output = run(
        &home,
        &[
            "check",
            "--format",
            "json",
            "--storage-path",
            "/var/data",
            "--admin-ip",
            "10.0.0.1",
            "--admin-ip",
            "10.0.0.2",
            "--log-level",
            "warn",
        ],
    );

    assert!(
        output.status.success(),
        "stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["storage_path"], "/var/data");
    assert_eq!(value["admin_ips"], serde_json::json!(["10.0.0.1", "10.0.0.2"]));
    assert_eq!(value["periodic_pruning"], false);
    assert_eq!(value["log_level"], "warn");
}

#[test]
fn test_flags_override_config_file() {
    let home = IsolatedHome::new();
    let config_file = write_config(
        home.path(),
        "rules.toml",
        "storage_path = \"/from/file\"\nperiodic_pruning = true\n",
    );

    let output = run(
        &home,
        &[
            "--config",
            config_file.to_str().unwrap(),
            "check",
            "--format",
            "json",
            "--storage-path",
            "/from/flag",
        ],
    );

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["storage_path"], "/from/flag");
    assert_eq!(value["periodic_pruning"], true);
}

#[test]
fn test_global_config_file_is_read() {
    let home = IsolatedHome::new();
    let global_dir = home.config_home().join("rules-service");
    std::fs::create_dir_all(&global_dir).unwrap();
    write_config(&global_dir, "config.toml", "storage_path = \"/from/global\"\n");

    let output = run(&home, &["check", "--format", "toml"]);

    assert!(
        output.status.success(),
        "stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("storage_path = \"/from/global\""), "stdout={}", stdout);
}

#[test]
fn test_start_creates_store() {
    let home = IsolatedHome::new();
    let store_path = home.path().join("store");

    let output = run(
        &home,
        &["start", "--storage-path", store_path.to_str().unwrap()],
    );

    assert!(
        output.status.success(),
        "stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(store_path.exists());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Rules store ready"));
}

#[test]
fn test_check_reports_log_filter_level() {
    let home = IsolatedHome::new();
    let output = Command::new(env!("CARGO_BIN_EXE_rules-service"))
        .env_clear()
        .env("HOME", home.home())
        .env("XDG_CONFIG_HOME", home.config_home())
        .env("RULES_LOG", "debug")
        .args(["check", "--format", "json", "--storage-path", "/var/data"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["log_level"], "debug");
}
