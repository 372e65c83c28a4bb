use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn budget(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("budget-buddy").unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn init(home: &Path) -> std::path::PathBuf {
    let data_dir = home.join("data");
    budget(home)
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded"));
    data_dir.join("SQLite").join("budget.db")
}

#[test]
fn init_seeds_once() {
    let home = tempfile::tempdir().unwrap();
    let db_path = init(home.path());
    assert!(db_path.exists());

    budget(home.path())
        .args(["add", "--amount", "3", "--category", "Groceries"])
        .assert()
        .success();
    budget(home.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already present"));
    budget(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions:  15"));
}

#[test]
fn init_with_missing_seed_fails() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");
    budget(home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap(), "--seed"])
        .arg(home.path().join("nope.db"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Seed database not found"));
}

#[test]
fn first_launch_without_init_uses_bundled_seed() {
    let home = tempfile::tempdir().unwrap();
    budget(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Running shoes"));
    assert!(home
        .path()
        .join("Documents/budget-buddy/SQLite/budget.db")
        .exists());
}

#[test]
fn categories_lists_seed() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    budget(home.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries").and(predicate::str::contains("Salary")));
}

#[test]
fn fresh_month_summary_is_zero() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    budget(home.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Summary for")
                .and(predicate::str::contains("Income:          $0.00"))
                .and(predicate::str::contains("Savings:         $0.00")),
        );
}

#[test]
fn add_updates_summary_and_delete_reverts_it() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());

    budget(home.path())
        .args(["add", "--amount", "12.50", "--category", "Dining Out", "--description", "Tacos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense $12.50 (Dining Out) as #15"));

    budget(home.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Total Expenses:  $12.50")
                .and(predicate::str::contains("Savings:         -$12.50")),
        );

    budget(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tacos"));

    budget(home.path())
        .args(["delete", "15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction #15"));

    budget(home.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Expenses:  $0.00"));
}

#[test]
fn add_income_by_category_id() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    budget(home.path())
        .args(["add", "--amount", "250", "--category", "10", "--type", "income"])
        .assert()
        .success();
    budget(home.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Savings:         $250.00"));
}

#[test]
fn add_in_another_month_leaves_summary_alone() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    budget(home.path())
        .args(["add", "--amount", "40", "--category", "Rent", "--date", "2020-01-15"])
        .assert()
        .success();
    budget(home.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Expenses:  $0.00"));
}

#[test]
fn add_rejects_bad_input() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    budget(home.path())
        .args(["add", "--amount", "5", "--category", "Groceries", "--type", "transfer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid transaction type"));
    budget(home.path())
        .args(["add", "--amount", "5", "--category", "Yachts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category: Yachts"));
    budget(home.path())
        .args(["add", "--amount", "5", "--category", "Rent", "--date", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn add_rejects_non_positive_amounts() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    budget(home.path())
        .args(["add", "--amount", "-5", "--category", "Groceries"])
        .assert()
        .failure()
        .stderr("Error: Invalid amount: -5 (expected a number greater than zero)\n");
    budget(home.path())
        .args(["add", "--amount", "0", "--category", "Groceries", "--type", "income"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount: 0"));
    budget(home.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Expenses:  $0.00"))
        .stdout(predicate::str::contains("Savings:         $0.00"));
    budget(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions:  14"));
}

#[test]
fn delete_unknown_id_fails() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    budget(home.path())
        .args(["delete", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No transaction with id 999"));
}

#[test]
fn demo_is_loaded_once() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    budget(home.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 10 sample transactions"));
    budget(home.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("already loaded"));
    budget(home.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Income:          $4000.00"));
}

#[test]
fn status_reports_counts() {
    let home = tempfile::tempdir().unwrap();
    budget(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database not found"));
    init(home.path());
    budget(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Categories:    12")
                .and(predicate::str::contains("Transactions:  14")),
        );
}
