//! End-to-end tests that run the `sshcm` binary against temporary configs.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = "Host foo\n  HostName 1.2.3.4\n  Port 22\n\nHost bar\n  User root\n";

fn sshcm(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sshcm").expect("Failed to find sshcm binary");
    cmd.env_remove("SSHCM_CONFIG").arg("--config").arg(config);
    cmd
}

fn setup() -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config");
    fs::write(&config, CONFIG).unwrap();
    (temp, config)
}

#[test]
fn test_help_exits_zero() {
    Command::cargo_bin("sshcm")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_list_prints_names_in_order() {
    let (_temp, config) = setup();

    sshcm(&config)
        .arg("list")
        .assert()
        .success()
        .stdout("foo\nbar\n");
}

#[test]
fn test_print_is_default_command() {
    let (_temp, config) = setup();

    sshcm(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("========== foo ==========").and(
            predicate::str::contains("  HostName 1.2.3.4"),
        ));
}

#[test]
fn test_export_is_json() {
    let (_temp, config) = setup();

    let output = sshcm(&config).arg("export").output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[1]["name"], "bar");
    assert_eq!(json[1]["user"], "root");
    assert_eq!(json[0]["id"].as_str().unwrap().len(), 64);
}

#[test]
fn test_set_writes_backup_and_updates() {
    let (temp, config) = setup();

    sshcm(&config)
        .args(["set", "foo", "--port", "2222", "--user", "admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    let written = fs::read_to_string(&config).unwrap();
    assert!(written.contains("Host foo\n  HostName 1.2.3.4\n  Port 2222\n  User admin\n"));

    let backups: Vec<_> = fs::read_dir(temp.path().join("sshcm_backups"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), CONFIG);
}

#[test]
fn test_add_and_remove() {
    let (_temp, config) = setup();

    sshcm(&config)
        .args(["add", "git", "--hostname", "github.com", "--user", "git"])
        .assert()
        .success();
    sshcm(&config).args(["remove", "bar"]).assert().success();

    sshcm(&config)
        .arg("list")
        .assert()
        .success()
        .stdout("foo\ngit\n");
}

#[test]
fn test_unknown_host_fails() {
    let (_temp, config) = setup();

    sshcm(&config)
        .args(["remove", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_missing_config_reports_path() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("absent");

    sshcm(&config)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent"));
}
