// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss start`: launch `klaussd` detached with N workers.

use crate::context::Context;
use crate::exit_error::ExitError;
use std::path::PathBuf;
use std::process::Stdio;

/// Resolve the `klaussd` binary, preferring the sibling of this CLI binary.
fn resolve_coordinator_binary() -> PathBuf {
    if let Ok(current) = std::env::current_exe() {
        let sibling = current.with_file_name("klaussd");
        if sibling.is_file() {
            return sibling;
        }
    }
    PathBuf::from("klaussd")
}

pub fn run(
    db_path: Option<PathBuf>,
    project_root: Option<PathBuf>,
    workers: Option<usize>,
) -> Result<(), ExitError> {
    let ctx = Context::build(db_path.clone(), project_root.clone())?;

    if let Some(pid) = klauss_coordinator::read_pidfile(&ctx.config.db_path) {
        if process_is_alive(pid) {
            return Err(ExitError::usage(format!(
                "coordinator already running (pid {pid}); run `klauss stop` first"
            )));
        }
    }

    let mut command = std::process::Command::new(resolve_coordinator_binary());
    command
        .arg("--db-path")
        .arg(&ctx.config.db_path)
        .arg("--project-root")
        .arg(&ctx.config.project_root);
    if let Some(n) = workers {
        command.arg("--workers").arg(n.to_string());
    }
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let child = command.spawn()?;
    println!(
        "Started coordinator (pid {}) with {} worker(s)",
        child.id(),
        workers.unwrap_or(ctx.config.default_worker_count)
    );
    Ok(())
}

#[cfg(target_family = "unix")]
pub(crate) fn process_is_alive(pid: u32) -> bool {
    nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), None).is_ok()
}

#[cfg(test)]
#[path = "start_tests.rs"]
mod tests;
