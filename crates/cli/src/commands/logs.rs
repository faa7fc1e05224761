// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss logs [worker] [-f]`: list or tail supervision log files.
//!
//! With no `worker` argument, lists the files under `logs/`. With one,
//! prints `{worker}.log` (or `coordinator.log` for the special name
//! `coordinator`). `-f` polls for appended bytes instead of exiting,
//! the way `tail -f` does — there's no file-watcher dependency in this
//! crate, so it's a plain sleep-and-reread loop rather than an
//! inotify/kqueue-backed one.

use crate::context::Context;
use crate::exit_error::ExitError;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

pub fn run(
    db_path: Option<PathBuf>,
    project_root: Option<PathBuf>,
    worker: Option<String>,
    follow: bool,
) -> Result<(), ExitError> {
    let ctx = Context::build(db_path, project_root)?;
    let dir = klauss_coordinator::logs_dir(&ctx.config.db_path);

    let path = match worker {
        Some(name) => dir.join(format!("{name}.log")),
        None => {
            list_log_files(&dir)?;
            return Ok(());
        }
    };

    if !path.exists() {
        return Err(ExitError::usage(format!("no such log file: {}", path.display())));
    }

    let mut file = std::fs::File::open(&path)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    std::io::stdout().write_all(&buf)?;

    if !follow {
        return Ok(());
    }

    let mut pos = buf.len() as u64;
    loop {
        std::thread::sleep(POLL_INTERVAL);
        let len = file.metadata()?.len();
        if len < pos {
            // file was truncated or rotated underneath us; start over
            pos = 0;
        }
        if len > pos {
            file.seek(SeekFrom::Start(pos))?;
            let mut chunk = Vec::new();
            file.read_to_end(&mut chunk)?;
            std::io::stdout().write_all(&chunk)?;
            pos = len;
        }
    }
}

fn list_log_files(dir: &std::path::Path) -> Result<(), ExitError> {
    if !dir.exists() {
        println!("No log files yet");
        return Ok(());
    }
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".log"))
        .collect();
    names.sort();
    if names.is_empty() {
        println!("No log files yet");
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
