// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klaussd`: supervises the worker pool for one klauss store.

use clap::Parser;
use klauss_core::config::CliOverrides;
use klauss_core::Config;
use klauss_queue::Queue;
use klauss_storage::Store;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "klaussd", about = "Supervises the klauss worker pool")]
struct Args {
    /// Number of workers to keep alive. Defaults to the resolved config's
    /// worker count.
    #[arg(long)]
    workers: Option<usize>,

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
            worker_count: args.workers,
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
    let worker_count = config.default_worker_count;

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(phase = "STARTUP", error = %e, "failed to start async runtime");
            return ExitCode::from(2);
        }
    };

    let result = runtime.block_on(run_coordinator(config, worker_count));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "coordinator exited with an error");
            ExitCode::from(1)
        }
    }
}

async fn run_coordinator(
    config: Config,
    worker_count: usize,
) -> Result<(), klauss_coordinator::CoordinatorError> {
    klauss_coordinator::write_pidfile(&config.db_path, std::process::id())?;
    let store = Arc::new(Store::open(&config)?);
    let queue = Arc::new(Queue::new(store, config.clone()));
    let result = klauss_coordinator::run(config.clone(), worker_count, queue).await;
    klauss_coordinator::remove_pidfile(&config.db_path);
    result
}
