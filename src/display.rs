//! Terminal rendering of task records as bordered text boxes.

use crate::store::Task;

const LABEL_WIDTH: usize = 18;

/// A rendered task box plus its width, used by list views to draw a
/// demarcation rule as wide as the widest box.
#[derive(Debug, Clone)]
pub struct TaskBox {
    pub text: String,
    pub width: usize,
}

/// Render a task as a bordered box with aligned field labels.
#[must_use]
pub fn render_task_box(task: &Task) -> TaskBox {
    let lines = [
        format!("{:<LABEL_WIDTH$}{}", "Task", task.title),
        format!("{:<LABEL_WIDTH$}{}", "Assigned to", task.username),
        format!("{:<LABEL_WIDTH$}{}", "Description", task.description),
        format!("{:<LABEL_WIDTH$}{}", "Assigned on", task.assigned_date),
        format!("{:<LABEL_WIDTH$}{}", "Due by", task.due_date),
        format!("{:<LABEL_WIDTH$}{}", "Completed", task.completed),
    ];
    let max_length = lines.iter().map(String::len).max().unwrap_or(0);
    let width = max_length + 4;

    let border = format!("+{}+", "-".repeat(width - 2));
    let mut text = String::new();
    text.push_str(&border);
    text.push('\n');
    for line in &lines {
        text.push_str(&format!("| {line:<max_length$} |"));
        text.push('\n');
    }
    text.push_str(&border);
    text.push('\n');

    TaskBox { text, width }
}

/// Render a numbered list of task boxes followed by a dash rule matching the
/// widest box. Returns `None` for an empty list.
#[must_use]
pub fn render_task_list(tasks: &[Task]) -> Option<String> {
    if tasks.is_empty() {
        return None;
    }
    let mut out = String::new();
    let mut max_width = 0;
    for (idx, task) in tasks.iter().enumerate() {
        let task_box = render_task_box(task);
        out.push_str(&format!("\nTask {}:\n", idx + 1));
        out.push_str(&task_box.text);
        out.push('\n');
        max_width = max_width.max(task_box.width);
    }
    out.push_str(&"-".repeat(max_width));
    out.push('\n');
    Some(out)
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
