// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss workers`: table of live workers plus queue stats.
//!
//! CPU/MEM aren't tracked anywhere in the store (no process-stats
//! dependency pulled in for it), so those columns report `-`; PID and
//! runtime come straight off the worker record.

use crate::context::Context;
use crate::exit_error::ExitError;
use crate::table::{Column, Table};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn run(db_path: Option<PathBuf>, project_root: Option<PathBuf>, json: bool) -> Result<(), ExitError> {
    let ctx = Context::build(db_path, project_root)?;
    let workers = ctx.queue.list_workers()?;
    let stats = ctx.queue.stats()?;

    if json {
        let obj = serde_json::json!({ "workers": workers, "stats": stats });
        println!("{}", serde_json::to_string_pretty(&obj)?);
        return Ok(());
    }

    if workers.is_empty() {
        println!("No workers registered");
    } else {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        let cols = vec![
            Column::left("WORKER"),
            Column::left("PID"),
            Column::left("CPU"),
            Column::left("MEM"),
            Column::status("STATUS"),
            Column::left("RUNTIME"),
        ];
        let mut table = Table::new(cols);
        for w in &workers {
            table.row(vec![
                w.worker_id.to_string(),
                w.pid.to_string(),
                "-".to_string(),
                "-".to_string(),
                w.status.to_string(),
                format_runtime(now.saturating_sub(w.started_at)),
            ]);
        }
        table.render(&mut std::io::stdout());
    }

    println!(
        "\nqueue: {} pending, {} claimed, {} in_progress, {} completed, {} failed",
        stats.pending, stats.claimed, stats.in_progress, stats.completed, stats.failed
    );
    Ok(())
}

fn format_runtime(secs: i64) -> String {
    let secs = secs.max(0);
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
#[path = "workers_tests.rs"]
mod tests;
