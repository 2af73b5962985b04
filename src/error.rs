use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskmanError {
    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TaskmanError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
