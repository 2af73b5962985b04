#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the taskman binary.
#[macro_export]
macro_rules! taskman {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("taskman"))
    };
}

/// Temporary data directory pre-loadable with user and task records.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir_arg(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }

    pub fn seed_users(&self, records: &str) {
        fs::write(self.path().join("user.txt"), records).expect("Failed to write user.txt");
    }

    pub fn seed_tasks(&self, records: &str) {
        fs::write(self.path().join("tasks.txt"), records).expect("Failed to write tasks.txt");
    }

    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).expect("Failed to read file")
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.path().join(name).is_file()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A user file with an admin and one regular account.
pub const TWO_USERS: &str = "admin, adm1n\nbob, hunter2\n";

/// Four tasks covering completed, overdue and future-due cases, one of them
/// assigned to an unregistered user.
pub const MIXED_TASKS: &str = "\
bob, Fix bug, Crash on save, 2024-01-01, 2020-01-01, No\n\
bob, Ship release, Cut the tag, 2024-01-01, 2999-01-01, No\n\
admin, Review PR, Storage layer, 2024-01-01, 2020-01-01, Yes\n\
charlie, Orphan task, No such user, 2024-01-01, 2020-01-01, No\n";
