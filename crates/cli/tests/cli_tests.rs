use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("reelsync").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Film catalog with scheduled SWAPI reconciliation"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("reelsync").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_cli_sync_help() {
    let mut cmd = Command::cargo_bin("reelsync").unwrap();
    cmd.arg("sync").arg("--help").assert().success().stdout(predicate::str::contains("JSON"));
}

#[test]
fn test_sync_with_bad_feed_url_fails() {
    let mut cmd = Command::cargo_bin("reelsync").unwrap();
    cmd.arg("sync")
        .env_remove("DATABASE_URL")
        .env("REELSYNC_FEED_URL", "ftp://example.invalid/films")
        .assert()
        .failure()
        .stderr(predicate::str::contains("REELSYNC_FEED_URL"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("reelsync").unwrap();
    cmd.arg("nope").assert().failure();
}
