use std::fs;

use chrono::NaiveDate;
use indexmap::IndexMap;
use tempfile::TempDir;

use crate::stats::{task_stats, user_stats};
use crate::store::{Completed, Task};

use super::*;

fn noon() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn task(username: &str, due_date: &str, completed: Completed) -> Task {
    Task {
        username: username.to_string(),
        title: "t".to_string(),
        description: "d".to_string(),
        assigned_date: "2024-01-01".to_string(),
        due_date: due_date.to_string(),
        completed,
    }
}

fn users(names: &[&str]) -> IndexMap<String, String> {
    names
        .iter()
        .map(|n| ((*n).to_string(), "pw".to_string()))
        .collect()
}

#[test]
fn task_overview_layout_is_exact() {
    let tasks = vec![
        task("alice", "2024-05-01", Completed::Yes),
        task("alice", "2024-05-01", Completed::No),
        task("bob", "2024-08-01", Completed::No),
        task("charlie", "2024-05-01", Completed::Yes),
    ];
    let rendered = render_task_overview(&task_stats(&tasks, noon()));

    assert_eq!(
        rendered,
        "Task Overview\n\
         Total tasks: 4\n\
         Completed tasks: 2\n\
         Uncompleted tasks: 2\n\
         Overdue uncompleted tasks: 1\n\
         Incomplete percentage: 50.00%\n\
         Overdue percentage: 25.00%\n"
    );
}

#[test]
fn task_overview_for_empty_collection_is_all_zero() {
    let rendered = render_task_overview(&task_stats(&[], noon()));
    assert_eq!(
        rendered,
        "Task Overview\n\
         Total tasks: 0\n\
         Completed tasks: 0\n\
         Uncompleted tasks: 0\n\
         Overdue uncompleted tasks: 0\n\
         Incomplete percentage: 0.00%\n\
         Overdue percentage: 0.00%\n"
    );
}

#[test]
fn user_overview_layout_is_exact() {
    let registered = users(&["alice", "bob"]);
    let tasks = vec![
        task("alice", "2024-05-01", Completed::Yes),
        task("alice", "2024-05-01", Completed::No),
    ];
    let rendered = render_user_overview(&user_stats(&tasks, &registered, noon()));

    assert_eq!(
        rendered,
        "User Overview\n\
         Total users: 2\n\
         Total tasks: 2\n\
         \n\
         User: alice\n\
         Tasks assigned: 2\n\
         Percentage of total tasks: 100.00%\n\
         Percentage completed: 50.00%\n\
         Percentage incomplete: 50.00%\n\
         Percentage overdue: 50.00%\n\
         \n\
         User: bob\n\
         Tasks assigned: 0\n\
         Percentage of total tasks: 0.00%\n\
         Percentage completed: 0.00%\n\
         Percentage incomplete: 0.00%\n\
         Percentage overdue: 0.00%\n"
    );
}

#[test]
fn user_blocks_follow_user_file_order() {
    let registered = users(&["zoe", "admin", "alice"]);
    let rendered = render_user_overview(&user_stats(&[], &registered, noon()));

    let zoe = rendered.find("User: zoe").unwrap();
    let admin = rendered.find("User: admin").unwrap();
    let alice = rendered.find("User: alice").unwrap();
    assert!(zoe < admin && admin < alice);
}

#[test]
fn write_reports_creates_both_files() {
    let temp = TempDir::new().unwrap();
    let writer = ReportWriter::new(temp.path());
    let registered = users(&["alice"]);
    let tasks = vec![task("alice", "2024-05-01", Completed::No)];

    let outcome = writer.write_reports(
        &task_stats(&tasks, noon()),
        &user_stats(&tasks, &registered, noon()),
    );

    assert!(outcome.all_ok());
    let task_doc = fs::read_to_string(writer.task_overview_path()).unwrap();
    assert!(task_doc.starts_with("Task Overview\n"));
    let user_doc = fs::read_to_string(writer.user_overview_path()).unwrap();
    assert!(user_doc.starts_with("User Overview\n"));
}

#[test]
fn one_failed_write_does_not_block_the_other() {
    let temp = TempDir::new().unwrap();
    let writer = ReportWriter::new(temp.path());
    // A directory squatting on the task overview path forces that write to
    // fail while the user overview write stays healthy.
    fs::create_dir(writer.task_overview_path()).unwrap();

    let outcome = writer.write_reports(
        &task_stats(&[], noon()),
        &user_stats(&[], &users(&["alice"]), noon()),
    );

    assert!(outcome.task_overview.is_err());
    assert!(outcome.user_overview.is_ok());
    assert!(writer.user_overview_path().is_file());
}
