// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss stats`: queue-wide counts by status.

use crate::context::Context;
use crate::exit_error::ExitError;
use std::path::PathBuf;

pub fn run(db_path: Option<PathBuf>, project_root: Option<PathBuf>, json: bool) -> Result<(), ExitError> {
    let ctx = Context::build(db_path, project_root)?;
    let stats = ctx.queue.stats()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("pending:     {}", stats.pending);
    println!("claimed:     {}", stats.claimed);
    println!("in_progress: {}", stats.in_progress);
    println!("completed:   {}", stats.completed);
    println!("failed:      {}", stats.failed);
    Ok(())
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
