// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locates and launches the `klauss-worker` binary for a supervision slot.

use crate::error::CoordinatorError;
use klauss_core::Config;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::{Child, Command};

/// Resolve the `klauss-worker` binary, preferring the sibling of the
/// currently running `klaussd` binary (so a packaged install finds its own
/// worker build rather than whatever happens to be on `PATH`).
pub fn resolve_worker_binary() -> PathBuf {
    if let Ok(current) = std::env::current_exe() {
        let sibling = current.with_file_name("klauss-worker");
        if sibling.is_file() {
            return sibling;
        }
    }
    PathBuf::from("klauss-worker")
}

pub fn spawn_worker(
    binary: &Path,
    slot: usize,
    worker_id: &str,
    config: &Config,
    stdout: Stdio,
    stderr: Stdio,
) -> Result<Child, CoordinatorError> {
    Command::new(binary)
        .arg("--worker-id")
        .arg(worker_id)
        .arg("--db-path")
        .arg(&config.db_path)
        .arg("--project-root")
        .arg(&config.project_root)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr)
        .kill_on_drop(false)
        .spawn()
        .map_err(|source| CoordinatorError::Spawn { slot, source })
}
