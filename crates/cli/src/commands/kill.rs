// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss kill`: SIGKILL the coordinator and every worker it spawned.

use crate::context::Context;
use crate::exit_error::ExitError;
use klauss_core::WorkerStatus;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::path::PathBuf;

pub fn run(db_path: Option<PathBuf>, project_root: Option<PathBuf>) -> Result<(), ExitError> {
    let ctx = Context::build(db_path, project_root)?;
    let mut killed = 0usize;

    if let Some(pid) = klauss_coordinator::read_pidfile(&ctx.config.db_path) {
        if signal::kill(Pid::from_raw(pid as i32), Signal::SIGKILL).is_ok() {
            killed += 1;
        }
        klauss_coordinator::remove_pidfile(&ctx.config.db_path);
    }

    for worker in ctx.queue.list_workers()? {
        if matches!(worker.status, WorkerStatus::Stopped) {
            continue;
        }
        if signal::kill(Pid::from_raw(worker.pid as i32), Signal::SIGKILL).is_ok() {
            killed += 1;
        }
        let _ = ctx.queue.stop_worker(&worker.worker_id);
    }

    println!("Sent KILL to {killed} process(es)");
    Ok(())
}

#[cfg(test)]
#[path = "kill_tests.rs"]
mod tests;
