// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss dashboard`: a single-shot read-only snapshot of workers and
//! in-progress tasks. A live, auto-refreshing TUI is out of scope; this
//! prints one frame and exits.

use crate::context::Context;
use crate::exit_error::ExitError;
use crate::table::{Column, Table};
use klauss_core::TaskStatus;
use std::path::PathBuf;

pub fn run(db_path: Option<PathBuf>, project_root: Option<PathBuf>, json: bool) -> Result<(), ExitError> {
    let ctx = Context::build(db_path, project_root)?;
    let stats = ctx.queue.stats()?;
    let workers = ctx.queue.list_workers()?;
    let mut in_progress: Vec<_> = ctx.queue.list_by_status(TaskStatus::Claimed)?;
    in_progress.extend(ctx.queue.list_by_status(TaskStatus::InProgress)?);

    if json {
        let obj = serde_json::json!({
            "stats": stats,
            "workers": workers,
            "in_progress": in_progress,
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
        return Ok(());
    }

    println!(
        "{}  pending {}  claimed {}  in_progress {}  completed {}  failed {}",
        crate::color::header("queue:"),
        stats.pending,
        stats.claimed,
        stats.in_progress,
        stats.completed,
        stats.failed
    );
    println!("{} live\n", crate::color::header(&format!("{} workers", workers.len())));

    if in_progress.is_empty() {
        println!("No tasks in progress");
    } else {
        let mut table = Table::new(vec![
            Column::left("TASK"),
            Column::status("STATUS"),
            Column::left("WORKER"),
            Column::left("DESCRIPTION"),
        ]);
        for task in &in_progress {
            table.row(vec![
                task.id.to_string(),
                task.status.to_string(),
                task.claimed_by.as_ref().map(|w| w.to_string()).unwrap_or_else(|| "-".to_string()),
                task.description.clone(),
            ]);
        }
        table.render(&mut std::io::stdout());
    }
    Ok(())
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
