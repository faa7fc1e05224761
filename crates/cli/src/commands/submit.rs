// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss submit`/`submit-file`: insert tasks under a fresh job each.

use crate::context::Context;
use crate::exit_error::ExitError;
use klauss_orchestrator::{add_subtask, create_job, SubtaskOptions};
use serde::Deserialize;
use std::path::PathBuf;

pub fn run(
    db_path: Option<PathBuf>,
    project_root: Option<PathBuf>,
    prompt: String,
    working_dir: Option<String>,
    priority: i64,
) -> Result<(), ExitError> {
    let ctx = Context::build(db_path, project_root)?;
    let job = create_job(&ctx.queue, prompt.clone())?;
    let working_dir = working_dir.unwrap_or_else(|| ctx.config.project_root.to_string_lossy().into_owned());

    let task_id = add_subtask(
        &ctx.queue,
        job.id,
        prompt,
        SubtaskOptions {
            priority,
            working_dir,
            ..Default::default()
        },
    )?;

    println!("Created job {} with task {}", job.id, task_id);
    Ok(())
}

/// One entry in a `submit-file` JSON array. Mirrors the input fields of a
/// task; everything but `description` and `working_dir` is optional.
#[derive(Debug, Deserialize)]
struct TaskSubmission {
    description: String,
    working_dir: Option<String>,
    #[serde(default)]
    priority: i64,
}

pub fn run_file(
    db_path: Option<PathBuf>,
    project_root: Option<PathBuf>,
    path: PathBuf,
) -> Result<(), ExitError> {
    let ctx = Context::build(db_path, project_root)?;
    let contents = std::fs::read_to_string(&path)?;
    let submissions: Vec<TaskSubmission> = serde_json::from_str(&contents)
        .map_err(|e| ExitError::usage(format!("invalid submission file {}: {e}", path.display())))?;

    if submissions.is_empty() {
        return Err(ExitError::usage("submission file contains no tasks"));
    }

    let job = create_job(&ctx.queue, format!("submitted from {}", path.display()))?;
    let mut count = 0;
    for submission in submissions {
        let working_dir = submission
            .working_dir
            .unwrap_or_else(|| ctx.config.project_root.to_string_lossy().into_owned());
        add_subtask(
            &ctx.queue,
            job.id,
            submission.description,
            SubtaskOptions {
                priority: submission.priority,
                working_dir,
                ..Default::default()
            },
        )?;
        count += 1;
    }

    println!("Created job {} with {} task(s)", job.id, count);
    Ok(())
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
