// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss show <id>`: full detail for one task.

use crate::context::Context;
use crate::exit_error::ExitError;
use klauss_core::TaskId;
use std::path::PathBuf;

pub fn run(db_path: Option<PathBuf>, project_root: Option<PathBuf>, id: i64, json: bool) -> Result<(), ExitError> {
    let ctx = Context::build(db_path, project_root)?;
    let task = ctx
        .queue
        .task(TaskId(id))?
        .ok_or_else(|| ExitError::usage(format!("no such task: {id}")))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
        return Ok(());
    }

    println!("task:        {}", task.id);
    println!("job:         {}", task.job_id);
    println!("status:      {}", task.status);
    println!("priority:    {}", task.priority);
    println!("description: {}", task.description);
    println!("working_dir: {}", task.working_dir);
    if !task.depends_on.is_empty() {
        println!(
            "depends_on:  {}",
            task.depends_on.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ")
        );
    }
    println!("attempt:     {}", task.attempt);
    if let Some(outcome) = &task.outcome {
        println!("exit_code:   {:?}", outcome.executor_exit_code);
        if let Some(msg) = &outcome.error_message {
            println!("error:       {msg}");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
