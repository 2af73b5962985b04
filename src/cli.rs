use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Output format for the `stats` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "taskman")]
#[command(author, version, about = "Team task tracker with flat-file storage")]
#[command(long_about = "A command-line task tracker for small teams.\n\n\
    Tasks and user accounts live in plain text files (tasks.txt, user.txt)\n\
    in the data directory. Run without a subcommand for the interactive\n\
    session.\n\n\
    Exit codes:\n  \
    0 - Success\n  \
    1 - Runtime error")]
pub struct Cli {
    /// Directory holding user.txt, tasks.txt and generated reports
    #[arg(long, default_value = ".", global = true)]
    pub data_dir: PathBuf,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive session (the default)
    Run,

    /// Generate task_overview.txt and user_overview.txt
    Report,

    /// Print task and user statistics without writing report files
    Stats(StatsArgs),
}

#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
