//! Integration tests for `wpenv check` and its exit codes.

mod common;

use common::wpenv_cmd_in;
use predicates::prelude::*;
use tempfile::TempDir;

const SECRET_VARS: &[&str] = &[
    "AUTH_KEY",
    "SECURE_AUTH_KEY",
    "LOGGED_IN_KEY",
    "NONCE_KEY",
    "AUTH_SALT",
    "SECURE_AUTH_SALT",
    "LOGGED_IN_SALT",
    "NONCE_SALT",
];

#[test]
fn test_check_defaults_exit_code_3() {
    let temp_dir = TempDir::new().unwrap();
    wpenv_cmd_in(temp_dir.path())
        .arg("check")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Status: missing"))
        .stdout(predicate::str::contains("Default database password: yes"))
        .stdout(predicate::str::contains("Result: FAIL"));
}

#[test]
fn test_check_configured_site_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = wpenv_cmd_in(temp_dir.path());
    cmd.env("WORDPRESS_DB_PASSWORD", "s3cret");
    for (i, name) in SECRET_VARS.iter().enumerate() {
        cmd.env(format!("WORDPRESS_{}", name), format!("unique-{}", i));
    }

    cmd.arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Placeholder keys: none"))
        .stdout(predicate::str::contains("Result: PASS"));
}

#[test]
fn test_check_json_lists_placeholders() {
    let temp_dir = TempDir::new().unwrap();
    let output = wpenv_cmd_in(temp_dir.path())
        .env("WORDPRESS_AUTH_KEY", "unique")
        .args(["check", "-o", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let placeholders = value["placeholder_secrets"].as_array().unwrap();
    assert_eq!(placeholders.len(), 7);
    assert!(!placeholders.iter().any(|p| p == "AUTH_KEY"));
    assert_eq!(value["default_db_password"], true);
}
