// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The coordinator's pid file, written at startup so `klauss stop`/`klauss
//! kill` can find the right process without a daemon socket to query.

use crate::error::CoordinatorError;
use std::path::{Path, PathBuf};

const PIDFILE_NAME: &str = "klaussd.pid";

pub fn pidfile_path(db_path: &Path) -> PathBuf {
    db_path.join(PIDFILE_NAME)
}

pub fn write_pidfile(db_path: &Path, pid: u32) -> Result<(), CoordinatorError> {
    std::fs::create_dir_all(db_path).map_err(|source| CoordinatorError::LogFile {
        path: db_path.to_path_buf(),
        source,
    })?;
    let path = pidfile_path(db_path);
    std::fs::write(&path, pid.to_string())
        .map_err(|source| CoordinatorError::LogFile { path, source })
}

pub fn remove_pidfile(db_path: &Path) {
    let _ = std::fs::remove_file(pidfile_path(db_path));
}

/// Read the pid from `db_path`'s pid file, if one exists and parses.
pub fn read_pidfile(db_path: &Path) -> Option<u32> {
    std::fs::read_to_string(pidfile_path(db_path))
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
#[path = "pidfile_tests.rs"]
mod tests;
