// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Derived progress snapshot for a job.

use klauss_core::{JobStatus, TaskStatus};
use klauss_queue::Queue;

use crate::error::OrchestratorError;

#[derive(Debug, Clone, PartialEq)]
pub struct JobProgress {
    pub status: JobStatus,
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
    pub progress_pct: f64,
}

pub fn get_job_status(
    queue: &Queue,
    job_id: &klauss_core::JobId,
) -> Result<JobProgress, OrchestratorError> {
    if queue.job(job_id)?.is_none() {
        return Err(OrchestratorError::UnknownJob(*job_id));
    }

    let tasks = queue.list_by_job(job_id)?;
    let total = tasks.len();
    let mut pending = 0;
    let mut in_progress = 0;
    let mut completed = 0;
    let mut failed = 0;

    for task in &tasks {
        match task.status {
            TaskStatus::Pending => pending += 1,
            TaskStatus::Claimed | TaskStatus::InProgress => in_progress += 1,
            TaskStatus::Completed => completed += 1,
            TaskStatus::Failed => failed += 1,
        }
    }

    let status = JobStatus::from_task_statuses(tasks.iter().map(|t| t.status));
    let progress_pct = if total == 0 {
        0.0
    } else {
        (completed + failed) as f64 / total as f64 * 100.0
    };

    Ok(JobProgress {
        status,
        total,
        pending,
        in_progress,
        completed,
        failed,
        progress_pct,
    })
}

#[cfg(test)]
#[path = "job_status_tests.rs"]
mod tests;
