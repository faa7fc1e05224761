// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use klauss_core::{JobId, Task, TaskStatus};
use klauss_queue::Queue;

use crate::error::OrchestratorError;

pub fn get_failed_tasks(queue: &Queue, job_id: &JobId) -> Result<Vec<Task>, OrchestratorError> {
    Ok(queue
        .list_by_job(job_id)?
        .into_iter()
        .filter(|t| t.status == TaskStatus::Failed)
        .collect())
}

pub fn get_completed_tasks(queue: &Queue, job_id: &JobId) -> Result<Vec<Task>, OrchestratorError> {
    Ok(queue
        .list_by_job(job_id)?
        .into_iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .collect())
}

/// Reset every failed task in `job_id` back to `pending` so the worker
/// pool picks them up again.
pub fn retry_failed_tasks(queue: &Queue, job_id: &JobId) -> Result<usize, OrchestratorError> {
    let failed = get_failed_tasks(queue, job_id)?;
    for task in &failed {
        queue.reset(task.id)?;
    }
    Ok(failed.len())
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
