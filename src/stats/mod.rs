//! Statistics engine: overdue classification plus aggregate and per-user
//! metrics over an already-loaded task collection.
//!
//! Everything here is pure. Callers supply the current moment, so report
//! generation stays deterministic under test.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use serde::Serialize;

use crate::store::Task;

/// Date format used for assigned and due dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns true iff `due_date` parses as a calendar date and that date,
/// interpreted at midnight, is strictly earlier than `now`.
///
/// An unparseable date is treated as not overdue. This silently hides
/// malformed dates, which is the storage format's long-standing behavior.
#[must_use]
pub fn is_overdue(due_date: &str, now: NaiveDateTime) -> bool {
    NaiveDate::parse_from_str(due_date, DATE_FORMAT)
        .is_ok_and(|due| due.and_time(NaiveTime::MIN) < now)
}

/// Aggregate metrics over the whole task collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub uncompleted: usize,
    pub overdue_uncompleted: usize,
    pub incomplete_percent: f64,
    pub overdue_percent: f64,
}

/// Per-user tallies and percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserTally {
    pub tasks: usize,
    pub completed: usize,
    pub overdue: usize,
    pub percent_total: f64,
    pub percent_completed: f64,
    pub percent_incomplete: f64,
    pub percent_overdue: f64,
}

/// Per-user metrics for every registered user, in user-file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub total_users: usize,
    pub total_tasks: usize,
    pub per_user: IndexMap<String, UserTally>,
}

/// Round to two decimal places, half away from zero. Percentages are
/// user-visible, so the rounding rule is fixed here and nowhere else.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[allow(clippy::cast_precision_loss)]
fn percent(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        round2(numerator as f64 / denominator as f64 * 100.0)
    }
}

/// Compute aggregate task statistics.
///
/// `incomplete_percent` and `overdue_percent` are exactly 0 for an empty
/// collection.
#[must_use]
pub fn task_stats(tasks: &[Task], now: NaiveDateTime) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed.is_yes()).count();
    let uncompleted = total - completed;
    let overdue_uncompleted = tasks
        .iter()
        .filter(|t| !t.completed.is_yes() && is_overdue(&t.due_date, now))
        .count();

    TaskStats {
        total,
        completed,
        uncompleted,
        overdue_uncompleted,
        incomplete_percent: percent(uncompleted, total),
        overdue_percent: percent(overdue_uncompleted, total),
    }
}

/// Compute per-user statistics for every registered user.
///
/// A task counts as completed or overdue for its user, never both: an
/// uncompleted task that is not yet overdue increments neither tally. Tasks
/// assigned to unregistered usernames are excluded from per-user tallies but
/// still count toward `total_tasks`.
#[must_use]
pub fn user_stats(
    tasks: &[Task],
    users: &IndexMap<String, String>,
    now: NaiveDateTime,
) -> UserStats {
    let total_tasks = tasks.len();
    let total_users = users.len();

    let mut per_user: IndexMap<String, UserTally> = users
        .keys()
        .map(|name| (name.clone(), UserTally::default()))
        .collect();

    for task in tasks {
        let Some(tally) = per_user.get_mut(&task.username) else {
            continue;
        };
        tally.tasks += 1;
        if task.completed.is_yes() {
            tally.completed += 1;
        } else if is_overdue(&task.due_date, now) {
            tally.overdue += 1;
        }
    }

    for tally in per_user.values_mut() {
        tally.percent_total = percent(tally.tasks, total_tasks);
        tally.percent_completed = percent(tally.completed, tally.tasks);
        tally.percent_incomplete = percent(tally.tasks - tally.completed, tally.tasks);
        tally.percent_overdue = percent(tally.overdue, tally.tasks);
    }

    UserStats {
        total_users,
        total_tasks,
        per_user,
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
