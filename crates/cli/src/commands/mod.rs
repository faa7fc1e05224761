// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One module per subcommand, dispatched from `main.rs`.

mod clean;
mod dashboard;
mod init_config;
mod kill;
mod list;
mod logs;
mod show;
mod start;
mod stats;
mod stop;
mod submit;
mod workers;

use crate::cli::Cli;
use crate::exit_error::ExitError;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Command {
    /// Copy the config template into the current directory
    InitConfig {
        /// Overwrite an existing klauss.toml without prompting
        #[arg(long)]
        force: bool,
    },
    /// Launch the coordinator with N workers (default 4)
    Start {
        /// Number of workers to supervise
        workers: Option<usize>,
    },
    /// Send TERM to the coordinator and all workers
    Stop,
    /// Send KILL to the coordinator and all workers
    Kill,
    /// Print a table of live workers plus queue stats
    Workers,
    /// Launch the read-only dashboard view
    Dashboard,
    /// Insert one task under a new job
    Submit {
        /// Task description / prompt text
        prompt: String,
        /// Working directory for the task (defaults to the project root)
        #[arg(long)]
        working_dir: Option<String>,
        /// Task priority, higher runs first
        #[arg(long, default_value_t = 0)]
        priority: i64,
    },
    /// Insert many tasks from a JSON submission file
    SubmitFile {
        /// Path to a JSON array of task definitions
        path: PathBuf,
    },
    /// List tasks, optionally filtered by status
    List {
        /// pending | claimed | running | completed | failed
        status: Option<String>,
    },
    /// Print queue statistics
    Stats,
    /// Show one task's full detail
    Show {
        /// Task id
        id: i64,
    },
    /// List per-worker log files, or tail one
    Logs {
        /// Worker id whose log to show; omitted lists all log files
        worker: Option<String>,
        /// Follow the log like `tail -f`
        #[arg(short, long)]
        follow: bool,
    },
    /// Delete the store file and logs after confirmation
    Clean {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn dispatch(cli: Cli) -> Result<(), ExitError> {
    let db_path = cli.db_path;
    let project_root = cli.project_root;
    let json = cli.json;

    match cli.command {
        Command::InitConfig { force } => init_config::run(project_root, force),
        Command::Start { workers } => start::run(db_path, project_root, workers),
        Command::Stop => stop::run(db_path, project_root),
        Command::Kill => kill::run(db_path, project_root),
        Command::Workers => workers::run(db_path, project_root, json),
        Command::Dashboard => dashboard::run(db_path, project_root, json),
        Command::Submit {
            prompt,
            working_dir,
            priority,
        } => submit::run(db_path, project_root, prompt, working_dir, priority),
        Command::SubmitFile { path } => submit::run_file(db_path, project_root, path),
        Command::List { status } => list::run(db_path, project_root, status, json),
        Command::Stats => stats::run(db_path, project_root, json),
        Command::Show { id } => show::run(db_path, project_root, id, json),
        Command::Logs { worker, follow } => logs::run(db_path, project_root, worker, follow),
        Command::Clean { yes } => clean::run(db_path, project_root, yes),
    }
}
