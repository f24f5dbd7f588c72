//! Smoke tests to verify command module wiring

use assert_cmd::Command;
use predicates::prelude::*;

// === Serve Command Tests ===

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("todoctl").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

// === Migrate Command Tests ===

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("todoctl").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Apply all pending migrations"));
}

#[test]
fn test_migrate_up_and_status() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("todos.db").display());

    let mut up = Command::cargo_bin("todoctl").unwrap();
    up.arg("migrate").arg("--database-url").arg(&url).arg("up");
    up.assert()
        .success()
        .stdout(predicate::str::contains("Applied 3 migration(s)"));

    let mut status = Command::cargo_bin("todoctl").unwrap();
    status
        .arg("migrate")
        .arg("--database-url")
        .arg(&url)
        .arg("status");
    status
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] 0003_create_todo_lists"));
}

#[test]
fn test_migrate_down_reverts_latest() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("todos.db").display());

    Command::cargo_bin("todoctl")
        .unwrap()
        .arg("migrate")
        .arg("--database-url")
        .arg(&url)
        .arg("up")
        .assert()
        .success();

    Command::cargo_bin("todoctl")
        .unwrap()
        .arg("migrate")
        .arg("--database-url")
        .arg(&url)
        .arg("down")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reverted 0003_create_todo_lists"));
}
