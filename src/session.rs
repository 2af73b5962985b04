//! Interactive session: the login prompt loop and menu dispatch.
//!
//! The session is generic over its input and output streams so menu flows
//! can be driven by scripted input in tests. EOF on the input stream ends
//! the session cleanly wherever it occurs.

use std::io::{BufRead, Write};

use chrono::{Local, NaiveDateTime};

use crate::display::render_task_list;
use crate::error::Result;
use crate::report::ReportWriter;
use crate::stats::{DATE_FORMAT, task_stats, user_stats};
use crate::store::{Completed, Store, Task};

const ADMIN_USERNAME: &str = "admin";

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub struct Session<R, W> {
    input: R,
    out: W,
    store: Store,
    reports: ReportWriter,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, store: Store, reports: ReportWriter) -> Self {
        Self {
            input,
            out,
            store,
            reports,
        }
    }

    /// Authenticate, then run the menu loop until exit or EOF.
    ///
    /// # Errors
    /// Returns an error on store I/O failures or if the output stream fails.
    pub fn run(&mut self) -> Result<()> {
        let Some(current_user) = self.login()? else {
            return Ok(());
        };
        let is_admin = current_user == ADMIN_USERNAME;

        loop {
            self.print_menu(is_admin)?;
            let Some(choice) = self.prompt(": ")? else {
                break;
            };
            match choice.to_lowercase().as_str() {
                "r" if is_admin => self.register_user()?,
                "a" => self.add_task()?,
                "va" => self.view_all_tasks()?,
                "vm" => self.manage_my_tasks(&current_user)?,
                "vc" if is_admin => self.view_completed_tasks()?,
                "del" if is_admin => self.delete_task()?,
                "ds" if is_admin => {
                    self.generate_reports()?;
                    self.display_statistics()?;
                }
                "gr" if is_admin => self.generate_reports()?,
                "e" => {
                    writeln!(self.out, "\nGoodbye, {current_user}. See you next time.")?;
                    break;
                }
                _ => writeln!(self.out, "Invalid option. Please select a valid option.")?,
            }
        }
        Ok(())
    }

    /// Prompt for credentials until they match a registered user.
    /// Returns `None` if the input stream ends first.
    fn login(&mut self) -> Result<Option<String>> {
        let users = self.store.load_users()?;
        writeln!(self.out, "Welcome to the Task Manager. Please log in.")?;
        loop {
            let Some(username) = self.prompt("Enter your username: ")? else {
                return Ok(None);
            };
            let Some(password) = self.prompt("Enter your password: ")? else {
                return Ok(None);
            };
            match users.get(&username) {
                None => writeln!(
                    self.out,
                    "Username '{username}' does not exist. Try again."
                )?,
                Some(stored) if *stored != password => {
                    writeln!(self.out, "Incorrect password. Try again.")?;
                }
                Some(_) => {
                    writeln!(self.out, "Login successful. Welcome, {username}.")?;
                    return Ok(Some(username));
                }
            }
        }
    }

    fn print_menu(&mut self, is_admin: bool) -> Result<()> {
        writeln!(self.out, "\nPlease select one of the following options:")?;
        if is_admin {
            writeln!(self.out, "r - register user")?;
        }
        writeln!(self.out, "a - add task")?;
        writeln!(self.out, "va - view all tasks")?;
        writeln!(self.out, "vm - view my tasks")?;
        if is_admin {
            writeln!(self.out, "vc - view completed tasks")?;
            writeln!(self.out, "del - delete a task")?;
            writeln!(self.out, "ds - display statistics")?;
            writeln!(self.out, "gr - generate reports")?;
        }
        writeln!(self.out, "e - exit")?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.out, "{message}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn register_user(&mut self) -> Result<()> {
        let users = self.store.load_users()?;
        loop {
            let Some(new_username) = self.prompt("Enter new username (blank to cancel): ")? else {
                return Ok(());
            };
            if new_username.is_empty() {
                writeln!(self.out, "Registration cancelled.")?;
                return Ok(());
            }
            if users.contains_key(&new_username) {
                writeln!(
                    self.out,
                    "Username '{new_username}' already exists. Try another."
                )?;
                continue;
            }
            let Some(new_password) = self.prompt("Enter new password: ")? else {
                return Ok(());
            };
            let Some(confirm_password) = self.prompt("Confirm password: ")? else {
                return Ok(());
            };
            if new_password != confirm_password {
                writeln!(self.out, "Passwords do not match. Try again.")?;
                continue;
            }
            self.store.save_user(&new_username, &new_password)?;
            writeln!(self.out, "User '{new_username}' registered successfully.")?;
            return Ok(());
        }
    }

    fn add_task(&mut self) -> Result<()> {
        let Some(username) = self.prompt("Enter username to assign task: ")? else {
            return Ok(());
        };
        if !self.store.load_users()?.contains_key(&username) {
            writeln!(self.out, "User '{username}' does not exist. Try again.")?;
            return Ok(());
        }
        let Some(title) = self.prompt("Enter task title: ")? else {
            return Ok(());
        };
        let Some(description) = self.prompt("Enter task description: ")? else {
            return Ok(());
        };
        let Some(due_date) = self.prompt("Enter due date (YYYY-MM-DD): ")? else {
            return Ok(());
        };
        if chrono::NaiveDate::parse_from_str(&due_date, DATE_FORMAT).is_err() {
            writeln!(self.out, "Invalid date format. Use YYYY-MM-DD. Try again.")?;
            return Ok(());
        }
        let assigned_date = now().format(DATE_FORMAT).to_string();
        let task = Task {
            username: username.clone(),
            title: title.clone(),
            description,
            assigned_date,
            due_date,
            completed: Completed::No,
        };
        self.store.append_task(&task)?;
        writeln!(self.out, "Task '{title}' added for {username}.")?;
        Ok(())
    }

    fn view_all_tasks(&mut self) -> Result<()> {
        let tasks = self.store.load_tasks()?;
        match render_task_list(&tasks) {
            None => writeln!(self.out, "No tasks to display.")?,
            Some(listing) => {
                writeln!(self.out, "\nAll Tasks")?;
                write!(self.out, "{listing}")?;
            }
        }
        Ok(())
    }

    fn view_completed_tasks(&mut self) -> Result<()> {
        let tasks = self.store.load_tasks()?;
        let completed: Vec<Task> = tasks
            .into_iter()
            .filter(|t| t.completed.is_yes())
            .collect();
        match render_task_list(&completed) {
            None => writeln!(self.out, "No completed tasks to display.")?,
            Some(listing) => {
                writeln!(self.out, "\nCompleted Tasks")?;
                write!(self.out, "{listing}")?;
            }
        }
        Ok(())
    }

    /// List the current user's tasks and let them mark one complete or edit
    /// its assignee and due date.
    fn manage_my_tasks(&mut self, current_user: &str) -> Result<()> {
        let mut tasks = self.store.load_tasks()?;
        let my_indices: Vec<usize> = tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.username == current_user)
            .map(|(i, _)| i)
            .collect();
        if my_indices.is_empty() {
            writeln!(self.out, "No tasks assigned to you, {current_user}.")?;
            return Ok(());
        }

        writeln!(self.out, "\nMy Tasks ({current_user})")?;
        let my_tasks: Vec<Task> = my_indices.iter().map(|&i| tasks[i].clone()).collect();
        if let Some(listing) = render_task_list(&my_tasks) {
            write!(self.out, "{listing}")?;
        }

        let Some(choice) = self.read_task_number(my_indices.len())? else {
            return Ok(());
        };
        let task_index = my_indices[choice - 1];
        let title = tasks[task_index].title.clone();

        writeln!(self.out, "\nSelect an action:")?;
        writeln!(self.out, "c - mark as complete")?;
        writeln!(self.out, "e - edit task")?;
        let Some(action) = self.prompt(": ")? else {
            return Ok(());
        };
        match action.to_lowercase().as_str() {
            "c" => {
                tasks[task_index].completed = Completed::Yes;
                self.store.save_tasks(&tasks)?;
                writeln!(self.out, "Task '{title}' marked complete.")?;
            }
            "e" => self.edit_task(&mut tasks, task_index)?,
            _ => writeln!(self.out, "Invalid action. Choose 'c' or 'e'.")?,
        }
        Ok(())
    }

    fn edit_task(&mut self, tasks: &mut [Task], task_index: usize) -> Result<()> {
        if tasks[task_index].completed.is_yes() {
            writeln!(self.out, "Cannot edit completed task.")?;
            return Ok(());
        }
        let title = tasks[task_index].title.clone();

        writeln!(self.out, "\nSelect edit option:")?;
        writeln!(self.out, "1 - edit username")?;
        writeln!(self.out, "2 - edit due date")?;
        writeln!(self.out, "3 - edit both")?;
        let Some(edit_choice) = self.prompt(": ")? else {
            return Ok(());
        };

        if matches!(edit_choice.as_str(), "1" | "3") {
            let Some(new_username) = self.prompt("Enter new username: ")? else {
                return Ok(());
            };
            if !self.store.load_users()?.contains_key(&new_username) {
                writeln!(self.out, "User '{new_username}' does not exist.")?;
                return Ok(());
            }
            tasks[task_index].username = new_username;
        }
        if matches!(edit_choice.as_str(), "2" | "3") {
            let Some(new_due_date) = self.prompt("Enter new due date (YYYY-MM-DD): ")? else {
                return Ok(());
            };
            if chrono::NaiveDate::parse_from_str(&new_due_date, DATE_FORMAT).is_err() {
                writeln!(self.out, "Invalid date format. Use YYYY-MM-DD.")?;
                return Ok(());
            }
            tasks[task_index].due_date = new_due_date;
        }
        if matches!(edit_choice.as_str(), "1" | "2" | "3") {
            self.store.save_tasks(tasks)?;
            writeln!(self.out, "Task '{title}' updated.")?;
        } else {
            writeln!(self.out, "Invalid edit option.")?;
        }
        Ok(())
    }

    /// Iterative task-number prompt with `-1` as the back-to-menu sentinel.
    /// Returns a 1-based task number, or `None` to return to the menu.
    fn read_task_number(&mut self, task_count: usize) -> Result<Option<usize>> {
        loop {
            let Some(raw) = self.prompt("Enter task number (-1 to main menu): ")? else {
                return Ok(None);
            };
            match raw.parse::<i64>() {
                Err(_) => writeln!(self.out, "Please enter a valid number.")?,
                Ok(-1) => return Ok(None),
                Ok(n) => match usize::try_from(n) {
                    Ok(i) if (1..=task_count).contains(&i) => return Ok(Some(i)),
                    _ => writeln!(self.out, "Invalid task number. Try again.")?,
                },
            }
        }
    }

    fn delete_task(&mut self) -> Result<()> {
        let mut tasks = self.store.load_tasks()?;
        let Some(listing) = render_task_list(&tasks) else {
            writeln!(self.out, "No tasks to delete.")?;
            return Ok(());
        };
        writeln!(self.out, "\nSelect a task to delete:")?;
        write!(self.out, "{listing}")?;

        let Some(raw) = self.prompt("Enter task number to delete (0 to cancel): ")? else {
            return Ok(());
        };
        match raw.parse::<i64>() {
            Err(_) => writeln!(self.out, "Please enter a valid number.")?,
            Ok(0) => writeln!(self.out, "Deletion cancelled.")?,
            Ok(n) => match usize::try_from(n) {
                Ok(i) if (1..=tasks.len()).contains(&i) => {
                    let deleted = tasks.remove(i - 1);
                    self.store.save_tasks(&tasks)?;
                    writeln!(self.out, "Task '{}' deleted successfully.", deleted.title)?;
                }
                _ => writeln!(self.out, "Invalid task number. Try again.")?,
            },
        }
        Ok(())
    }

    /// Recompute both stat sets from freshly loaded records and write both
    /// report files. A failed write is reported and abandons only that file.
    fn generate_reports(&mut self) -> Result<()> {
        let tasks = self.store.load_tasks()?;
        let users = self.store.load_users()?;
        let moment = now();
        let outcome = self.reports.write_reports(
            &task_stats(&tasks, moment),
            &user_stats(&tasks, &users, moment),
        );

        if let Err(e) = &outcome.task_overview {
            writeln!(self.out, "Error: Could not write to task_overview.txt ({e})")?;
        }
        if let Err(e) = &outcome.user_overview {
            writeln!(self.out, "Error: Could not write to user_overview.txt ({e})")?;
        }
        if outcome.all_ok() {
            writeln!(
                self.out,
                "Reports generated: task_overview.txt, user_overview.txt"
            )?;
        }
        Ok(())
    }

    /// Print both report files, generating them first if either is missing.
    fn display_statistics(&mut self) -> Result<()> {
        if !self.reports.task_overview_path().exists()
            || !self.reports.user_overview_path().exists()
        {
            writeln!(self.out, "Reports not found. Generating reports first.")?;
            self.generate_reports()?;
        }

        writeln!(self.out, "\n=== Task Overview ===")?;
        match std::fs::read_to_string(self.reports.task_overview_path()) {
            Ok(content) => writeln!(self.out, "{content}")?,
            Err(_) => writeln!(self.out, "Error: Could not read task_overview.txt")?,
        }

        writeln!(self.out, "\n=== User Overview ===")?;
        match std::fs::read_to_string(self.reports.user_overview_path()) {
            Ok(content) => writeln!(self.out, "{content}")?,
            Err(_) => writeln!(self.out, "Error: Could not read user_overview.txt")?,
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
