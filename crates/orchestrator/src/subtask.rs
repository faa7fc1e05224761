// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job creation and subtask submission — thin wrappers over `Queue`, the
//! orchestrator's only job here being to carry the richer, optional-field
//! call shape callers expect (`opts` with sensible defaults) down to the
//! queue's flat `NewTask`.

use klauss_core::{Job, JobId, TaskId, VerificationHookSpec};
use klauss_queue::{NewTask, Queue};

use crate::error::OrchestratorError;

#[derive(Debug, Clone, Default)]
pub struct SubtaskOptions {
    pub priority: i64,
    pub working_dir: String,
    pub context_files: Vec<String>,
    pub depends_on: Vec<TaskId>,
    pub parent_task_id: Option<TaskId>,
    pub expected_outputs: Vec<String>,
    pub verification_hooks: Vec<VerificationHookSpec>,
    pub auto_verify: Option<bool>,
    pub metadata: serde_json::Value,
}

pub fn create_job(queue: &Queue, description: impl Into<String>) -> Result<Job, OrchestratorError> {
    Ok(queue.create_job(description)?)
}

pub fn add_subtask(
    queue: &Queue,
    job_id: JobId,
    description: impl Into<String>,
    opts: SubtaskOptions,
) -> Result<TaskId, OrchestratorError> {
    let task_id = queue.add_task(NewTask {
        job_id,
        description: description.into(),
        working_dir: opts.working_dir,
        priority: opts.priority,
        depends_on: opts.depends_on,
        parent_task_id: opts.parent_task_id,
        context_files: opts.context_files,
        expected_outputs: opts.expected_outputs,
        verification_hooks: opts.verification_hooks,
        auto_verify: opts.auto_verify.unwrap_or(true),
        metadata: opts.metadata,
    })?;

    Ok(task_id)
}

pub fn set_shared_context(
    queue: &Queue,
    job_id: Option<&JobId>,
    key: impl Into<String>,
    value: impl Into<String>,
) -> Result<(), OrchestratorError> {
    Ok(queue.set_shared_context(job_id, key, value)?)
}

#[cfg(test)]
#[path = "subtask_tests.rs"]
mod tests;
