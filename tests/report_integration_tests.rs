//! Integration tests for the `report` subcommand.

mod common;

use common::{MIXED_TASKS, TWO_USERS, TestFixture};
use predicates::prelude::*;

#[test]
fn report_writes_both_overview_files() {
    let fixture = TestFixture::new();
    fixture.seed_users(TWO_USERS);
    fixture.seed_tasks(MIXED_TASKS);

    taskman!()
        .args(["--data-dir", &fixture.data_dir_arg(), "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Reports generated: task_overview.txt, user_overview.txt",
        ));

    assert!(fixture.has_file("task_overview.txt"));
    assert!(fixture.has_file("user_overview.txt"));
}

#[test]
fn task_overview_counts_match_the_records() {
    let fixture = TestFixture::new();
    fixture.seed_users(TWO_USERS);
    fixture.seed_tasks(MIXED_TASKS);

    taskman!()
        .args(["--data-dir", &fixture.data_dir_arg(), "report"])
        .assert()
        .success();

    let doc = fixture.read_file("task_overview.txt");
    assert!(doc.contains("Total tasks: 4"));
    assert!(doc.contains("Completed tasks: 1"));
    assert!(doc.contains("Uncompleted tasks: 3"));
    // Two uncompleted tasks are past due (one of them charlie's orphan).
    assert!(doc.contains("Overdue uncompleted tasks: 2"));
    assert!(doc.contains("Incomplete percentage: 75.00%"));
    assert!(doc.contains("Overdue percentage: 50.00%"));
}

#[test]
fn user_overview_covers_registered_users_only() {
    let fixture = TestFixture::new();
    fixture.seed_users(TWO_USERS);
    fixture.seed_tasks(MIXED_TASKS);

    taskman!()
        .args(["--data-dir", &fixture.data_dir_arg(), "report"])
        .assert()
        .success();

    let doc = fixture.read_file("user_overview.txt");
    assert!(doc.contains("Total users: 2"));
    assert!(doc.contains("Total tasks: 4"));
    assert!(doc.contains("User: admin"));
    assert!(doc.contains("User: bob"));
    assert!(!doc.contains("User: charlie"));
}

#[test]
fn report_with_missing_files_seeds_storage_and_succeeds() {
    let fixture = TestFixture::new();

    taskman!()
        .args(["--data-dir", &fixture.data_dir_arg(), "report"])
        .assert()
        .success();

    // Storage was bootstrapped: seeded admin account, empty task file.
    assert_eq!(fixture.read_file("user.txt"), "admin, adm1n\n");
    assert_eq!(fixture.read_file("tasks.txt"), "");

    let doc = fixture.read_file("task_overview.txt");
    assert!(doc.contains("Total tasks: 0"));
    assert!(doc.contains("Incomplete percentage: 0.00%"));
}

#[test]
fn malformed_task_lines_are_skipped_with_a_warning() {
    let fixture = TestFixture::new();
    fixture.seed_users(TWO_USERS);
    fixture.seed_tasks("bob, Fix bug, d, 2024-01-01, 2020-01-01, No\nnot a record\n");

    taskman!()
        .args(["--data-dir", &fixture.data_dir_arg(), "report"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping invalid line"));

    let doc = fixture.read_file("task_overview.txt");
    assert!(doc.contains("Total tasks: 1"));
}

#[test]
fn quiet_suppresses_the_success_notice() {
    let fixture = TestFixture::new();
    fixture.seed_users(TWO_USERS);
    fixture.seed_tasks("");

    taskman!()
        .args(["--data-dir", &fixture.data_dir_arg(), "--quiet", "report"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
