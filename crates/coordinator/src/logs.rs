// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-worker log files and the coordinator's own supervision log.
//!
//! Each worker slot's stdout/stderr is redirected straight to a file under
//! `logs/`; the coordinator does not parse or forward it. There's no need
//! to multiplex concurrent writers into one ordered stream here, since
//! each slot owns its own file.

use crate::error::CoordinatorError;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::Stdio;

const LOGS_DIR: &str = "logs";

pub fn logs_dir(db_path: &Path) -> PathBuf {
    db_path.join(LOGS_DIR)
}

pub fn ensure_logs_dir(db_path: &Path) -> Result<PathBuf, CoordinatorError> {
    let dir = logs_dir(db_path);
    std::fs::create_dir_all(&dir).map_err(|source| CoordinatorError::LogFile {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Open (truncating) the log file for `worker_id` and return it twice,
/// once for stdout and once for stderr, so both streams interleave into
/// the same file in roughly the order the child writes them.
pub fn worker_log_stdio(dir: &Path, worker_id: &str) -> Result<(Stdio, Stdio), CoordinatorError> {
    let path = dir.join(format!("{worker_id}.log"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| CoordinatorError::LogFile { path: path.clone(), source })?;
    let file_clone = file.try_clone().map_err(|source| CoordinatorError::LogFile { path, source })?;
    Ok((Stdio::from(file), Stdio::from(file_clone)))
}

/// Open `coordinator.log` for append, used by the `tracing` file layer.
pub fn coordinator_log_file(dir: &Path) -> Result<File, CoordinatorError> {
    let path = dir.join("coordinator.log");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| CoordinatorError::LogFile { path, source })
}
