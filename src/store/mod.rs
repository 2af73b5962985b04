//! Flat-file record store for users and tasks.
//!
//! Records are stored one per line with fields joined by `", "`. There is no
//! delimiter escaping: a field containing `", "` corrupts parsing, and the
//! store recovers by skipping the malformed line with a warning. Every
//! operation is a full read or full rewrite of the backing file.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{Result, TaskmanError};

pub const USERS_FILENAME: &str = "user.txt";
pub const TASKS_FILENAME: &str = "tasks.txt";

const FIELD_SEPARATOR: &str = ", ";
const TASK_FIELD_COUNT: usize = 6;
const USER_FIELD_COUNT: usize = 2;

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "adm1n";

/// Completion status of a task, stored as `Yes`/`No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Completed {
    Yes,
    No,
}

impl Completed {
    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl fmt::Display for Completed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}

impl FromStr for Completed {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Self::Yes),
            "No" => Ok(Self::No),
            _ => Err(format!("invalid completion flag: {s}")),
        }
    }
}

/// A single task record. Tasks have no identifier of their own; identity is
/// the record's position in `tasks.txt`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Task {
    pub username: String,
    pub title: String,
    pub description: String,
    pub assigned_date: String,
    pub due_date: String,
    pub completed: Completed,
}

impl Task {
    /// Parse one `tasks.txt` line. Returns `None` for lines that do not split
    /// into exactly six fields or carry an unknown completion flag.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if parts.len() != TASK_FIELD_COUNT {
            return None;
        }
        let completed = parts[5].parse().ok()?;
        Some(Self {
            username: parts[0].to_string(),
            title: parts[1].to_string(),
            description: parts[2].to_string(),
            assigned_date: parts[3].to_string(),
            due_date: parts[4].to_string(),
            completed,
        })
    }

    /// Render the record as a `tasks.txt` line (without trailing newline).
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.username,
            self.title,
            self.description,
            self.assigned_date,
            self.due_date,
            self.completed,
            sep = FIELD_SEPARATOR
        )
    }
}

/// Record store rooted at a data directory holding `user.txt` and `tasks.txt`.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILENAME)
    }

    #[must_use]
    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILENAME)
    }

    /// Load the username -> password mapping, preserving file order.
    ///
    /// Lines that do not split into exactly two fields are skipped with a
    /// warning. A missing file is created seeded with the default admin
    /// account.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, or if the
    /// seeded file cannot be created.
    pub fn load_users(&self) -> Result<IndexMap<String, String>> {
        let path = self.users_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                eprintln!("Error: user.txt not found. Creating new file with admin.");
                return self.seed_default_admin();
            }
            Err(e) => return Err(TaskmanError::FileRead { path, source: e }),
        };

        let mut users = IndexMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            if parts.len() != USER_FIELD_COUNT {
                eprintln!("Warning: Skipping invalid line: '{line}'");
                continue;
            }
            users.insert(parts[0].to_string(), parts[1].to_string());
        }
        Ok(users)
    }

    /// Create `user.txt` containing only the default admin account.
    fn seed_default_admin(&self) -> Result<IndexMap<String, String>> {
        let path = self.users_path();
        let record = format!("{DEFAULT_ADMIN_USERNAME}{FIELD_SEPARATOR}{DEFAULT_ADMIN_PASSWORD}\n");
        fs::write(&path, &record).map_err(|e| TaskmanError::FileWrite { path, source: e })?;
        let mut users = IndexMap::new();
        users.insert(
            DEFAULT_ADMIN_USERNAME.to_string(),
            DEFAULT_ADMIN_PASSWORD.to_string(),
        );
        Ok(users)
    }

    /// Append one user record.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save_user(&self, username: &str, password: &str) -> Result<()> {
        let path = self.users_path();
        self.ensure_trailing_newline(&path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| TaskmanError::FileWrite {
                path: path.clone(),
                source: e,
            })?;
        writeln!(file, "{username}{FIELD_SEPARATOR}{password}")
            .map_err(|e| TaskmanError::FileWrite { path, source: e })?;
        Ok(())
    }

    /// Load all task records in file order.
    ///
    /// Malformed lines are skipped with a warning. A missing file is created
    /// empty.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, or if the
    /// empty file cannot be created.
    pub fn load_tasks(&self) -> Result<Vec<Task>> {
        let path = self.tasks_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                eprintln!("Error: tasks.txt not found. Creating empty file.");
                fs::write(&path, "").map_err(|e| TaskmanError::FileWrite { path, source: e })?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(TaskmanError::FileRead { path, source: e }),
        };

        let mut tasks = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Task::parse_line(line) {
                Some(task) => tasks.push(task),
                None => eprintln!("Warning: Skipping invalid line: '{line}'"),
            }
        }
        Ok(tasks)
    }

    /// Append one task record.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn append_task(&self, task: &Task) -> Result<()> {
        let path = self.tasks_path();
        self.ensure_trailing_newline(&path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| TaskmanError::FileWrite {
                path: path.clone(),
                source: e,
            })?;
        writeln!(file, "{}", task.to_line())
            .map_err(|e| TaskmanError::FileWrite { path, source: e })?;
        Ok(())
    }

    /// Rewrite `tasks.txt` with the given records, replacing its contents.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        let path = self.tasks_path();
        let mut content = String::new();
        for task in tasks {
            content.push_str(&task.to_line());
            content.push('\n');
        }
        fs::write(&path, content).map_err(|e| TaskmanError::FileWrite { path, source: e })?;
        Ok(())
    }

    /// Append a newline to the file if it exists, is non-empty, and does not
    /// already end with one, so that appended records start on a fresh line.
    fn ensure_trailing_newline(&self, path: &Path) -> Result<()> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(TaskmanError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        if !content.is_empty() && !content.ends_with(b"\n") {
            let mut file =
                OpenOptions::new()
                    .append(true)
                    .open(path)
                    .map_err(|e| TaskmanError::FileWrite {
                        path: path.to_path_buf(),
                        source: e,
                    })?;
            file.write_all(b"\n").map_err(|e| TaskmanError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
