use std::fs;
use std::io;
use std::path::Path;

use chrono::Local;
use clap::Parser;
use serde::Serialize;

use taskman::cli::{Cli, Commands, OutputFormat, StatsArgs};
use taskman::report::ReportWriter;
use taskman::session::Session;
use taskman::stats::{TaskStats, UserStats, task_stats, user_stats};
use taskman::store::Store;
use taskman::{EXIT_ERROR, EXIT_SUCCESS};

fn main() {
    let cli = Cli::parse();

    let exit_code = match &cli.command {
        None | Some(Commands::Run) => run_session(&cli),
        Some(Commands::Report) => run_report(&cli),
        Some(Commands::Stats(args)) => run_stats(args, &cli),
    };

    std::process::exit(exit_code);
}

fn run_session(cli: &Cli) -> i32 {
    match run_session_impl(cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}

fn run_session_impl(cli: &Cli) -> taskman::Result<()> {
    let store = Store::new(&cli.data_dir);
    let reports = ReportWriter::new(&cli.data_dir);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), store, reports);
    session.run()
}

fn run_report(cli: &Cli) -> i32 {
    match run_report_impl(cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}

fn run_report_impl(cli: &Cli) -> taskman::Result<()> {
    let (tasks, users) = compute_stats(&cli.data_dir)?;
    let writer = ReportWriter::new(&cli.data_dir);
    let outcome = writer.write_reports(&tasks, &users);

    if let Err(e) = &outcome.task_overview {
        eprintln!("Error: Could not write to task_overview.txt ({e})");
    }
    if let Err(e) = &outcome.user_overview {
        eprintln!("Error: Could not write to user_overview.txt ({e})");
    }
    if outcome.all_ok() {
        if !cli.quiet {
            println!("Reports generated: task_overview.txt, user_overview.txt");
        }
        Ok(())
    } else {
        // Surface the first failure so the exit code reflects it.
        match outcome.task_overview {
            Err(e) => Err(e),
            Ok(_) => outcome.user_overview.map(|_| ()),
        }
    }
}

fn run_stats(args: &StatsArgs, cli: &Cli) -> i32 {
    match run_stats_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}

#[derive(Serialize)]
struct StatsDocument {
    tasks: TaskStats,
    users: UserStats,
}

fn run_stats_impl(args: &StatsArgs, cli: &Cli) -> taskman::Result<()> {
    let (tasks, users) = compute_stats(&cli.data_dir)?;

    let output = match args.format {
        OutputFormat::Text => format!(
            "{}\n{}",
            taskman::report::render_task_overview(&tasks),
            taskman::report::render_user_overview(&users)
        ),
        OutputFormat::Json => {
            let doc = StatsDocument { tasks, users };
            let json = serde_json::to_string_pretty(&doc)?;
            format!("{json}\n")
        }
    };

    write_output(args.output.as_deref(), &output, cli.quiet)?;
    Ok(())
}

fn compute_stats(data_dir: &Path) -> taskman::Result<(TaskStats, UserStats)> {
    let store = Store::new(data_dir);
    let tasks = store.load_tasks()?;
    let users = store.load_users()?;
    let now = Local::now().naive_local();
    Ok((task_stats(&tasks, now), user_stats(&tasks, &users, now)))
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> taskman::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}
