// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The materialized state held in `state.json`.
//!
//! Records are kept in flat `Vec`s rather than ID-keyed maps: the whole
//! file is read and rewritten under the transaction lock on every access,
//! so a map buys no real lookup win, and plain arrays keep the on-disk
//! format and its diffs legible.

use klauss_core::{Job, JobId, Task, TaskId, WorkerId, WorkerRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MaterializedState {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub workers: Vec<WorkerRecord>,
    /// Shared-context entries set with no `job_id`, visible to every job.
    #[serde(default)]
    pub global_shared_context: std::collections::HashMap<String, String>,
}

impl MaterializedState {
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn job(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == *id)
    }

    pub fn job_mut(&mut self, id: &JobId) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| j.id == *id)
    }

    pub fn tasks_for_job(&self, id: &JobId) -> impl Iterator<Item = &Task> {
        let id = *id;
        self.tasks.iter().filter(move |t| t.job_id == id)
    }

    pub fn worker(&self, id: &WorkerId) -> Option<&WorkerRecord> {
        self.workers.iter().find(|w| w.worker_id == *id)
    }

    pub fn worker_mut(&mut self, id: &WorkerId) -> Option<&mut WorkerRecord> {
        self.workers.iter_mut().find(|w| w.worker_id == *id)
    }

    pub fn next_task_id(&self) -> TaskId {
        TaskId::next_after(self.tasks.iter().map(|t| t.id))
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
