// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss stop`: send TERM to the coordinator and let it cascade to its
//! workers, then report whatever is still alive after a grace period.

use crate::context::Context;
use crate::exit_error::ExitError;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const GRACE: Duration = Duration::from_secs(10);

pub fn run(db_path: Option<PathBuf>, project_root: Option<PathBuf>) -> Result<(), ExitError> {
    let ctx = Context::build(db_path, project_root)?;
    let Some(pid) = klauss_coordinator::read_pidfile(&ctx.config.db_path) else {
        println!("No coordinator pid file found; nothing to stop");
        return Ok(());
    };

    if signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM).is_err() {
        println!("Coordinator (pid {pid}) was not running");
        klauss_coordinator::remove_pidfile(&ctx.config.db_path);
        return Ok(());
    }

    println!("Sent TERM to coordinator (pid {pid}), waiting for shutdown...");
    let deadline = Instant::now() + GRACE;
    while Instant::now() < deadline {
        if signal::kill(Pid::from_raw(pid as i32), None).is_err() {
            println!("Coordinator stopped");
            return Ok(());
        }
        std::thread::sleep(Duration::from_millis(200));
    }

    let workers: Vec<_> = ctx
        .queue
        .list_workers()?
        .into_iter()
        .filter(|w| !matches!(w.status, klauss_core::WorkerStatus::Stopped))
        .collect();
    println!(
        "Coordinator (pid {pid}) still running after {}s; {} worker(s) may still be live",
        GRACE.as_secs(),
        workers.len()
    );
    Ok(())
}

#[cfg(test)]
#[path = "stop_tests.rs"]
mod tests;
