use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("olympiad")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("call"))
        .stdout(predicate::str::contains("actions"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_call_help_shows_field_option() {
    cargo_bin_cmd!("olympiad")
        .args(["call", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--field"))
        .stdout(predicate::str::contains("--id"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("olympiad")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("olympiad"));
}

#[test]
fn test_actions_lists_modules() {
    cargo_bin_cmd!("olympiad")
        .arg("actions")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exams (exams)"))
        .stdout(predicate::str::contains("by-topic"))
        .stdout(predicate::str::contains("[subtopic]"));
}

#[test]
fn test_actions_rejects_unknown_module() {
    cargo_bin_cmd!("olympiad")
        .args(["actions", "grades"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown module 'grades'"));
}
