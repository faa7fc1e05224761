// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier and status.
//!
//! A job is a caller-facing grouping of tasks. It has no state machine of
//! its own: its status is derived from the tasks it contains, computed on
//! read rather than stored and mutated.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a job.
    pub struct JobId("job-");
}

/// Derived status of a job, computed from the status of its tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// No task has reached a terminal state yet — this covers a job with
    /// no tasks, a job whose tasks are all still pending, and a job with
    /// tasks actively in flight.
    Running,
    /// Every task completed successfully.
    Completed,
    /// Every task reached a terminal state and at least one failed.
    Failed,
}

crate::simple_display!(JobStatus {
    Running => "running",
    Completed => "completed",
    Failed => "failed",
});

impl JobStatus {
    /// Derive a job's status from the statuses of its tasks.
    ///
    /// A job with no tasks, or with tasks that haven't all reached a
    /// terminal state, is `Running`.
    pub fn from_task_statuses(
        statuses: impl IntoIterator<Item = crate::task::TaskStatus>,
    ) -> JobStatus {
        use crate::task::TaskStatus;

        let mut total = 0usize;
        let mut terminal = 0usize;
        let mut failed = 0usize;

        for status in statuses {
            total += 1;
            if status.is_terminal() {
                terminal += 1;
            }
            if status == TaskStatus::Failed {
                failed += 1;
            }
        }

        if total > 0 && terminal == total {
            if failed > 0 {
                JobStatus::Failed
            } else {
                JobStatus::Completed
            }
        } else {
            JobStatus::Running
        }
    }
}

/// A job: a named unit of work a caller submits, backed by one or more
/// tasks added to it over its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub description: String,
    pub created_at: i64,
    #[serde(default)]
    pub shared_context: std::collections::HashMap<String, String>,
}

impl Job {
    pub fn new(description: impl Into<String>, created_at: i64) -> Self {
        Job {
            id: JobId::new(),
            description: description.into(),
            created_at,
            shared_context: std::collections::HashMap::new(),
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
