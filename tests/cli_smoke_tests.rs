mod common;

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

const BIN_NAME: &str = "expense_cli";

fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("EXPENSE_CATEGORIZER_CLI_SCRIPT", "1")
        .env("EXPENSE_CATEGORIZER_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_workflow_commands() {
    let (home, _) = common::setup_home();
    script_command(&home)
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("Available commands").and(contains("suggest")));
}

#[test]
fn suggest_then_accept_records_an_expense() {
    let (home, _) = common::setup_home();
    script_command(&home)
        .write_stdin("suggest Swiggy food order\naccept 450\nrecent\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Suggested category: Food")
                .and(contains("Recorded expense"))
                .and(contains("Swiggy food order")),
        );

    let ledger = fs::read_to_string(home.join("ledger.json")).expect("ledger written");
    assert!(ledger.contains("\"owner\": \"asha\""));
    assert!(ledger.contains("\"category\": \"Food\""));
}

#[test]
fn invalid_confirmation_reports_violations_and_writes_nothing() {
    let (home, _) = common::setup_home();
    script_command(&home)
        .write_stdin("confirm -10 Transport taxi\nexit\n")
        .assert()
        .success()
        .stdout(contains("amount: must be a positive integer"));
    assert!(!home.join("ledger.json").exists());
}

#[test]
fn punctuation_only_text_gets_no_suggestion() {
    let (home, _) = common::setup_home();
    script_command(&home)
        .write_stdin("suggest !!!###\nexit\n")
        .assert()
        .success()
        .stdout(contains("Nothing left to categorize"));
}

#[test]
fn unknown_command_gets_a_hint() {
    let (home, _) = common::setup_home();
    script_command(&home)
        .write_stdin("sugest uber\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command").and(contains("`suggest`")));
}

#[test]
fn missing_model_aborts_startup() {
    let (home, _) = common::setup_home();
    fs::remove_file(home.join("models").join("classifier.json")).unwrap();
    script_command(&home)
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(contains("cannot start"));
}

#[test]
fn suggest_can_show_every_category_score() {
    let (home, _) = common::setup_home();
    script_command(&home)
        .write_stdin("suggest --scores Uber cab ride\ndiscard\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Suggested category: Transport")
                .and(contains("Score"))
                .and(contains("Miscellaneous"))
                .and(contains("Suggestion discarded")),
        );
}
