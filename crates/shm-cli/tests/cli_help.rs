use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    cargo_bin_cmd!("shm")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("session"))
        .stdout(predicate::str::contains("highlight"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_generate_help_shows_options() {
    cargo_bin_cmd!("shm")
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--set"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--layout"));
}

#[test]
fn test_missing_command_fails() {
    cargo_bin_cmd!("shm").assert().failure();
}
