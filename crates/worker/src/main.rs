// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Standalone worker process entry point. The coordinator spawns this
//! binary with `--worker-id`; it can also be run directly for manual
//! single-worker operation.

use clap::Parser;
use klauss_core::config::CliOverrides;
use klauss_core::Config;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "klauss-worker", about = "Claims and executes klauss tasks")]
struct Args {
    /// Unique id for this worker. Defaults to a random `wrk-...` id; the
    /// coordinator passes `worker_N` for supervised workers.
    #[arg(long)]
    worker_id: Option<String>,

    /// Override the resolved store path.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Override the project root used to locate `klauss.toml`.
    #[arg(long)]
    project_root: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let start_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = match Config::resolve(
        CliOverrides {
            db_path: args.db_path,
            project_root: args.project_root,
            ..Default::default()
        },
        &start_dir,
    ) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(phase = "STARTUP", error = %e, "failed to resolve configuration");
            return ExitCode::from(2);
        }
    };
    config.log_resolved();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(phase = "STARTUP", error = %e, "failed to start async runtime");
            return ExitCode::from(2);
        }
    };

    match runtime.block_on(klauss_worker::run(config, args.worker_id)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ klauss_worker::WorkerError::MissingExecutorCommand) => {
            tracing::error!(phase = "STARTUP", error = %e, "fatal configuration error");
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!(error = %e, "worker exited with an error");
            ExitCode::from(1)
        }
    }
}
