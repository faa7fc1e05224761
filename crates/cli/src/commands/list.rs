// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss list [status]`: read-only task listing.

use crate::context::Context;
use crate::exit_error::ExitError;
use crate::table::{Column, Table};
use klauss_core::{Task, TaskStatus};
use std::path::PathBuf;

fn parse_status(s: &str) -> Result<TaskStatus, ExitError> {
    match s {
        "pending" => Ok(TaskStatus::Pending),
        "claimed" => Ok(TaskStatus::Claimed),
        "in_progress" => Ok(TaskStatus::InProgress),
        "completed" => Ok(TaskStatus::Completed),
        "failed" => Ok(TaskStatus::Failed),
        other => Err(ExitError::usage(format!(
            "unknown status '{other}' (expected pending|claimed|in_progress|completed|failed)"
        ))),
    }
}

pub fn run(
    db_path: Option<PathBuf>,
    project_root: Option<PathBuf>,
    status: Option<String>,
    json: bool,
) -> Result<(), ExitError> {
    let ctx = Context::build(db_path, project_root)?;
    let mut tasks: Vec<Task> = match status {
        Some(s) => ctx.queue.list_by_status(parse_status(&s)?)?,
        None => {
            let mut all = Vec::new();
            for status in [
                TaskStatus::Pending,
                TaskStatus::Claimed,
                TaskStatus::InProgress,
                TaskStatus::Completed,
                TaskStatus::Failed,
            ] {
                all.extend(ctx.queue.list_by_status(status)?);
            }
            all
        }
    };
    tasks.sort_by_key(|t| t.id);

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks found");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::left("ID"),
        Column::left("JOB"),
        Column::status("STATUS"),
        Column::left("PRIORITY"),
        Column::left("DESCRIPTION"),
    ]);
    for task in &tasks {
        table.row(vec![
            task.id.to_string(),
            task.job_id.short(8).to_string(),
            task.status.to_string(),
            task.priority.to_string(),
            task.description.clone(),
        ]);
    }
    table.render(&mut std::io::stdout());
    Ok(())
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
