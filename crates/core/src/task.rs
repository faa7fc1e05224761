// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The task record and its lifecycle.
//!
//! A task moves through a small linear state machine:
//! `pending -> claimed -> in_progress -> {completed | failed}`, with
//! `failed` tasks eligible for an operator-initiated `reset` back to
//! `pending`.

pub use crate::id::TaskId;
use crate::job::JobId;
use crate::worker::WorkerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Claimed,
    InProgress,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Claimed => "claimed",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }
}

crate::simple_display!(TaskStatus {
    Pending => "pending",
    Claimed => "claimed",
    InProgress => "in_progress",
    Completed => "completed",
    Failed => "failed",
});

/// One verification command to run after a task's executor exits cleanly,
/// paired with the human-readable description surfaced in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationHookSpec {
    pub command: Vec<String>,
    pub description: String,
}

/// Diagnostic for a single step of a task's verification pipeline: either
/// one verification hook, or the output-existence check for one expected
/// path, reported through the same shape so callers see one uniform list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookResult {
    pub hook_description: String,
    pub passed: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// Outcome of a task's full verification pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub hooks: Vec<HookResult>,
    pub passed: bool,
}

impl VerificationReport {
    /// A report for a task that ran no verification at all — either the
    /// executor itself failed, or no hooks applied.
    pub fn skipped(executor_exit_success: bool) -> Self {
        VerificationReport {
            hooks: Vec::new(),
            passed: executor_exit_success,
        }
    }
}

fn default_auto_verify() -> bool {
    true
}

fn default_metadata() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

/// The terminal result recorded against a completed or failed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub verification: VerificationReport,
    pub executor_exit_code: Option<i32>,
    pub error_message: Option<String>,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub job_id: JobId,
    pub description: String,
    pub working_dir: String,
    pub priority: i64,
    pub depends_on: Vec<TaskId>,
    pub parent_task_id: Option<TaskId>,
    #[serde(default)]
    pub context_files: Vec<String>,
    /// Paths that must exist on disk for the task to be considered
    /// verified; checked before any hook runs.
    #[serde(default)]
    pub expected_outputs: Vec<String>,
    #[serde(default)]
    pub verification_hooks: Vec<VerificationHookSpec>,
    /// When `verification_hooks` is empty, auto-detect hooks from the
    /// working directory's project markers. Defaults to `true`.
    #[serde(default = "default_auto_verify")]
    pub auto_verify: bool,
    pub status: TaskStatus,
    pub claimed_by: Option<WorkerId>,
    pub created_at: i64,
    pub claimed_at: Option<i64>,
    pub started_at: Option<i64>,
    pub finished_at: Option<i64>,
    pub attempt: u32,
    pub outcome: Option<TaskOutcome>,
    #[serde(default = "default_metadata")]
    pub metadata: serde_json::Value,
}

impl Task {
    /// True if every entry in `depends_on` is present and completed in
    /// `completed`. An empty `depends_on` is trivially ready.
    pub fn dependencies_satisfied(&self, completed: &std::collections::HashSet<TaskId>) -> bool {
        self.depends_on.iter().all(|dep| completed.contains(dep))
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
