//! Report writer: renders the statistics engine's output into two fixed
//! layout text documents and persists them next to the record files.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskmanError};
use crate::stats::{TaskStats, UserStats};

pub const TASK_OVERVIEW_FILENAME: &str = "task_overview.txt";
pub const USER_OVERVIEW_FILENAME: &str = "user_overview.txt";

fn fmt_percent(value: f64) -> String {
    format!("{value:.2}")
}

/// Render the task overview document.
#[must_use]
pub fn render_task_overview(stats: &TaskStats) -> String {
    let mut out = String::new();
    out.push_str("Task Overview\n");
    let _ = writeln!(out, "Total tasks: {}", stats.total);
    let _ = writeln!(out, "Completed tasks: {}", stats.completed);
    let _ = writeln!(out, "Uncompleted tasks: {}", stats.uncompleted);
    let _ = writeln!(
        out,
        "Overdue uncompleted tasks: {}",
        stats.overdue_uncompleted
    );
    let _ = writeln!(
        out,
        "Incomplete percentage: {}%",
        fmt_percent(stats.incomplete_percent)
    );
    let _ = writeln!(
        out,
        "Overdue percentage: {}%",
        fmt_percent(stats.overdue_percent)
    );
    out
}

/// Render the user overview document, one block per registered user in
/// user-file order.
#[must_use]
pub fn render_user_overview(stats: &UserStats) -> String {
    let mut out = String::new();
    out.push_str("User Overview\n");
    let _ = writeln!(out, "Total users: {}", stats.total_users);
    let _ = writeln!(out, "Total tasks: {}", stats.total_tasks);
    for (username, tally) in &stats.per_user {
        out.push('\n');
        let _ = writeln!(out, "User: {username}");
        let _ = writeln!(out, "Tasks assigned: {}", tally.tasks);
        let _ = writeln!(
            out,
            "Percentage of total tasks: {}%",
            fmt_percent(tally.percent_total)
        );
        let _ = writeln!(
            out,
            "Percentage completed: {}%",
            fmt_percent(tally.percent_completed)
        );
        let _ = writeln!(
            out,
            "Percentage incomplete: {}%",
            fmt_percent(tally.percent_incomplete)
        );
        let _ = writeln!(
            out,
            "Percentage overdue: {}%",
            fmt_percent(tally.percent_overdue)
        );
    }
    out
}

/// Per-file result of a report generation run. Each file's write is
/// attempted independently; one failure never blocks the other.
#[derive(Debug)]
pub struct ReportOutcome {
    pub task_overview: Result<PathBuf>,
    pub user_overview: Result<PathBuf>,
}

impl ReportOutcome {
    #[must_use]
    pub const fn all_ok(&self) -> bool {
        self.task_overview.is_ok() && self.user_overview.is_ok()
    }
}

/// Writes report documents into a data directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    data_dir: PathBuf,
}

impl ReportWriter {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn task_overview_path(&self) -> PathBuf {
        self.data_dir.join(TASK_OVERVIEW_FILENAME)
    }

    #[must_use]
    pub fn user_overview_path(&self) -> PathBuf {
        self.data_dir.join(USER_OVERVIEW_FILENAME)
    }

    /// Render and write both report documents, returning the per-file
    /// outcome.
    pub fn write_reports(&self, task_stats: &TaskStats, user_stats: &UserStats) -> ReportOutcome {
        ReportOutcome {
            task_overview: write_document(
                &self.task_overview_path(),
                &render_task_overview(task_stats),
            ),
            user_overview: write_document(
                &self.user_overview_path(),
                &render_user_overview(user_stats),
            ),
        }
    }
}

fn write_document(path: &Path, content: &str) -> Result<PathBuf> {
    fs::write(path, content).map_err(|e| TaskmanError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
