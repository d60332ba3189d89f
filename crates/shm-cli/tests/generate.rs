use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_generate_prints_classic_block() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("shm")
        .env("SHM_HOME", dir.path())
        .args(["generate", "--set", "Name=beacon", "--set", "Texture File=a.png"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("SpriteType = {\n"))
        .stdout(predicate::str::contains("name = \"beacon_shine\""))
        .stdout(predicate::str::contains("texturefile = \"a.png\""))
        .stdout(predicate::str::contains("legacy_lazy_load = no"));
}

#[test]
fn test_generate_repeats_blocks() {
    let dir = tempdir().unwrap();

    let output = cargo_bin_cmd!("shm")
        .env("SHM_HOME", dir.path())
        .args(["generate", "--count", "3"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("SpriteType = {").count(), 3);
}

#[test]
fn test_generate_rejects_malformed_count() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("shm")
        .env("SHM_HOME", dir.path())
        .args(["generate", "--count", "abc"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("positive whole number"));
}

#[test]
fn test_generate_rejects_huge_count() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("shm")
        .env("SHM_HOME", dir.path())
        .args(["generate", "--count", "4294967295"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("at most 1000"));
}

#[test]
fn test_generate_tabbed_layout() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("shm")
        .env("SHM_HOME", dir.path())
        .args(["generate", "--layout", "tabbed", "--set", "name=beacon"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("SpriteType =\n{\n"))
        .stdout(predicate::str::contains("name = \"beacon\""))
        .stdout(predicate::str::contains("legacy_lazy_load").not());
}

#[test]
fn test_generate_unknown_field_fails() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("shm")
        .env("SHM_HOME", dir.path())
        .args(["generate", "--set", "Colour=red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn test_generate_saves_wrapped_file_with_default_extension() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("shines");

    cargo_bin_cmd!("shm")
        .env("SHM_HOME", dir.path())
        .args(["generate", "--set", "Name=beacon", "--output"])
        .arg(&target)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved to"));

    let saved = fs::read_to_string(dir.path().join("shines.txt")).unwrap();
    assert!(saved.starts_with("spriteTypes = {\n    SpriteType = {\n"));
    assert!(saved.ends_with("}\n"));
}

#[test]
fn test_generate_remember_persists_fields() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("shm")
        .env("SHM_HOME", dir.path())
        .args(["generate", "--set", "Name=beacon", "--remember"])
        .assert()
        .success();

    let config = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(config.contains("Name = \"beacon\""));

    cargo_bin_cmd!("shm")
        .env("SHM_HOME", dir.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("name = \"beacon_shine\""));
}

#[test]
fn test_generate_without_remember_leaves_config_alone() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("shm")
        .env("SHM_HOME", dir.path())
        .args(["generate", "--set", "Name=beacon"])
        .assert()
        .success();

    assert!(!dir.path().join("config.toml").exists());
}
