// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss clean [--yes]`: delete the store file and logs after confirmation.
//!
//! Refuses to run while a coordinator pidfile reports a live process —
//! wiping the store out from under a running coordinator would corrupt
//! its next write, not just lose history.

use crate::context::Context;
use crate::exit_error::ExitError;
use std::io::Write;
use std::path::PathBuf;

pub fn run(db_path: Option<PathBuf>, project_root: Option<PathBuf>, yes: bool) -> Result<(), ExitError> {
    let ctx = Context::build(db_path, project_root)?;
    let store_dir = ctx.config.db_path.clone();

    if let Some(pid) = klauss_coordinator::read_pidfile(&store_dir) {
        if super::start::process_is_alive(pid) {
            return Err(ExitError::usage(
                "coordinator is still running; stop it first with `klauss stop`",
            ));
        }
    }

    if !yes && !confirm(&store_dir)? {
        println!("Aborted.");
        return Ok(());
    }

    let _ = std::fs::remove_file(store_dir.join("state.json"));
    let _ = std::fs::remove_file(store_dir.join("state.json.lock"));
    let _ = std::fs::remove_dir_all(klauss_coordinator::logs_dir(&store_dir));
    klauss_coordinator::remove_pidfile(&store_dir);

    println!("Removed store and logs under {}", store_dir.display());
    Ok(())
}

fn confirm(store_dir: &std::path::Path) -> Result<bool, ExitError> {
    print!("Delete store and logs under {}? [y/N] ", store_dir.display());
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
#[path = "clean_tests.rs"]
mod tests;
