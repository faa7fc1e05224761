// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The task queue: submission, claiming, and the claimed/running/terminal
//! lifecycle every task moves through.

use crate::cycle;
use crate::error::QueueError;
use klauss_core::{
    Clock, Config, DomainError, Job, JobId, SystemClock, Task, TaskId, TaskOutcome, TaskStatus,
    VerificationHookSpec, WorkerId, WorkerRecord, WorkerStatus,
};
use klauss_storage::Store;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// New task parameters, gathered here rather than threaded through
/// `add_task`'s signature as a growing argument list.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub job_id: JobId,
    pub description: String,
    pub working_dir: String,
    pub priority: i64,
    pub depends_on: Vec<TaskId>,
    pub parent_task_id: Option<TaskId>,
    pub context_files: Vec<String>,
    pub expected_outputs: Vec<String>,
    pub verification_hooks: Vec<VerificationHookSpec>,
    pub auto_verify: bool,
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct QueueStats {
    pub pending: usize,
    pub claimed: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
}

pub struct Queue<C: Clock = SystemClock> {
    store: Arc<Store>,
    config: Config,
    clock: C,
}

impl Queue<SystemClock> {
    pub fn new(store: Arc<Store>, config: Config) -> Self {
        Queue {
            store,
            config,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> Queue<C> {
    pub fn with_clock(store: Arc<Store>, config: Config, clock: C) -> Self {
        Queue {
            store,
            config,
            clock,
        }
    }

    fn now(&self) -> i64 {
        (self.clock.epoch_ms() / 1000) as i64
    }

    pub fn create_job(&self, description: impl Into<String>) -> Result<Job, QueueError> {
        let job = Job::new(description, self.now());
        let to_store = job.clone();
        self.store.transact::<_, _, QueueError>(|state| {
            state.jobs.push(to_store);
            Ok(())
        })?;
        Ok(job)
    }

    pub fn job(&self, job_id: &JobId) -> Result<Option<Job>, QueueError> {
        Ok(self.store.snapshot()?.job(job_id).cloned())
    }

    /// Set a shared-context entry, global if `job_id` is `None` or scoped
    /// to one job otherwise. Last write wins.
    pub fn set_shared_context(
        &self,
        job_id: Option<&JobId>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), QueueError> {
        let key = key.into();
        let value = value.into();
        self.store.transact(|state| match job_id {
            Some(job_id) => {
                let job = state
                    .job_mut(job_id)
                    .ok_or_else(|| QueueError::from(DomainError::UnknownJob(job_id.to_string())))?;
                job.shared_context.insert(key, value);
                Ok(())
            }
            None => {
                state.global_shared_context.insert(key, value);
                Ok(())
            }
        })
    }

    /// The effective shared context for `job_id`: global entries with the
    /// job's own entries layered on top (job wins on key collision).
    pub fn effective_shared_context(
        &self,
        job_id: &JobId,
    ) -> Result<HashMap<String, String>, QueueError> {
        let state = self.store.snapshot()?;
        let mut merged = state.global_shared_context.clone();
        if let Some(job) = state.job(job_id) {
            merged.extend(job.shared_context.clone());
        }
        Ok(merged)
    }

    pub fn add_task(&self, new_task: NewTask) -> Result<TaskId, QueueError> {
        if new_task.priority < 0 {
            return Err(DomainError::NegativePriority(new_task.priority).into());
        }
        self.check_boundary(&new_task.working_dir)?;

        self.store.transact(|state| {
            if state.job(&new_task.job_id).is_none() {
                return Err(QueueError::from(DomainError::UnknownJob(
                    new_task.job_id.to_string(),
                )));
            }

            let mut edges: HashMap<TaskId, Vec<TaskId>> = state
                .tasks
                .iter()
                .map(|t| (t.id, t.depends_on.clone()))
                .collect();

            for dep in &new_task.depends_on {
                if !edges.contains_key(dep) {
                    return Err(DomainError::UnknownDependency(*dep).into());
                }
            }

            let id = state.next_task_id();
            edges.insert(id, new_task.depends_on.clone());
            if let Some(cycle_at) = cycle::find_cycle_from(id, &edges) {
                return Err(DomainError::DependencyCycle(cycle_at).into());
            }

            state.tasks.push(Task {
                id,
                job_id: new_task.job_id.clone(),
                description: new_task.description.clone(),
                working_dir: new_task.working_dir.clone(),
                priority: new_task.priority,
                depends_on: new_task.depends_on.clone(),
                parent_task_id: new_task.parent_task_id,
                context_files: new_task.context_files.clone(),
                expected_outputs: new_task.expected_outputs.clone(),
                verification_hooks: new_task.verification_hooks.clone(),
                auto_verify: new_task.auto_verify,
                status: TaskStatus::Pending,
                claimed_by: None,
                created_at: self.now(),
                claimed_at: None,
                started_at: None,
                finished_at: None,
                attempt: 0,
                outcome: None,
                metadata: new_task.metadata.clone(),
            });
            Ok(id)
        })
    }

    fn check_boundary(&self, working_dir: &str) -> Result<(), QueueError> {
        if self.config.allow_external_dirs {
            return Ok(());
        }
        let dir = Path::new(working_dir);
        if dir.starts_with(&self.config.project_root) {
            return Ok(());
        }
        Err(DomainError::BoundaryViolation {
            working_dir: working_dir.to_string(),
            project_root: self.config.project_root.display().to_string(),
        }
        .into())
    }

    /// Claim the highest-priority ready task for `worker_id`, breaking ties
    /// by lowest id (FIFO). Returns `None` if nothing is ready.
    pub fn claim(&self, worker_id: &WorkerId) -> Result<Option<Task>, QueueError> {
        let now = self.now();
        self.store.transact(|state| {
            if state.worker(worker_id).is_none() {
                return Err(QueueError::UnknownWorker(worker_id.clone()));
            }

            let completed: HashSet<TaskId> = state
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .map(|t| t.id)
                .collect();

            let next_id = state
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Pending && t.dependencies_satisfied(&completed))
                .max_by(|a, b| a.priority.cmp(&b.priority).then(b.id.0.cmp(&a.id.0)))
                .map(|t| t.id);

            let Some(next_id) = next_id else {
                return Ok(None);
            };

            let task = state.task_mut(next_id).expect("id from same scan");
            task.status = TaskStatus::Claimed;
            task.claimed_by = Some(worker_id.clone());
            task.claimed_at = Some(now);
            task.attempt += 1;
            let claimed = task.clone();

            let worker = state.worker_mut(worker_id).expect("checked above");
            worker.current_task_id = Some(next_id);
            worker.status = WorkerStatus::Busy;

            Ok(Some(claimed))
        })
    }

    pub fn start(&self, task_id: TaskId, worker_id: &WorkerId) -> Result<(), QueueError> {
        let now = self.now();
        self.store.transact(|state| {
            let task = state
                .task_mut(task_id)
                .ok_or(QueueError::UnknownTask(task_id))?;
            if task.claimed_by.as_ref() != Some(worker_id) {
                return Err(DomainError::NotOwner(task_id, worker_id.to_string()).into());
            }
            if task.status != TaskStatus::Claimed {
                return Err(DomainError::WrongStatus(task_id, "claimed").into());
            }
            task.status = TaskStatus::InProgress;
            task.started_at = Some(now);
            Ok(())
        })
    }

    pub fn heartbeat(&self, worker_id: &WorkerId) -> Result<(), QueueError> {
        let now = self.now();
        self.store.transact(|state| {
            let worker = state
                .worker_mut(worker_id)
                .ok_or_else(|| QueueError::UnknownWorker(worker_id.clone()))?;
            worker.last_heartbeat = now;
            if worker.status == WorkerStatus::Stale {
                worker.status = if worker.current_task_id.is_some() {
                    WorkerStatus::Busy
                } else {
                    WorkerStatus::Idle
                };
            }
            Ok(())
        })
    }

    pub fn complete(
        &self,
        task_id: TaskId,
        worker_id: &WorkerId,
        outcome: TaskOutcome,
    ) -> Result<(), QueueError> {
        self.finish(task_id, worker_id, TaskStatus::Completed, outcome)
    }

    pub fn fail(
        &self,
        task_id: TaskId,
        worker_id: &WorkerId,
        outcome: TaskOutcome,
    ) -> Result<(), QueueError> {
        self.finish(task_id, worker_id, TaskStatus::Failed, outcome)
    }

    fn finish(
        &self,
        task_id: TaskId,
        worker_id: &WorkerId,
        status: TaskStatus,
        outcome: TaskOutcome,
    ) -> Result<(), QueueError> {
        let now = self.now();
        self.store.transact(|state| {
            let task = state
                .task_mut(task_id)
                .ok_or(QueueError::UnknownTask(task_id))?;
            if task.claimed_by.as_ref() != Some(worker_id) {
                return Err(DomainError::NotOwner(task_id, worker_id.to_string()).into());
            }
            if task.status != TaskStatus::InProgress {
                return Err(DomainError::WrongStatus(task_id, "in_progress").into());
            }
            task.status = status;
            task.finished_at = Some(now);
            task.outcome = Some(outcome);

            if let Some(worker) = state.worker_mut(worker_id) {
                worker.current_task_id = None;
                worker.status = WorkerStatus::Idle;
            }
            Ok(())
        })
    }

    /// Return a failed task to `pending`, clearing its claim and outcome so
    /// it's eligible to be claimed again.
    pub fn reset(&self, task_id: TaskId) -> Result<(), QueueError> {
        self.store.transact(|state| {
            let task = state
                .task_mut(task_id)
                .ok_or(QueueError::UnknownTask(task_id))?;
            if task.status != TaskStatus::Failed {
                return Err(DomainError::WrongStatus(task_id, "failed").into());
            }
            task.status = TaskStatus::Pending;
            task.claimed_by = None;
            task.claimed_at = None;
            task.started_at = None;
            task.finished_at = None;
            task.outcome = None;
            Ok(())
        })
    }

    /// Reclaim tasks held by workers that haven't sent a heartbeat within
    /// `stale_threshold_secs`. Returns the ids of tasks reset to pending.
    pub fn sweep_stale(&self) -> Result<Vec<TaskId>, QueueError> {
        let now = self.now();
        let threshold = self.config.stale_threshold_secs();
        self.store.transact(|state| {
            let stale_workers: Vec<WorkerId> = state
                .workers
                .iter()
                .filter(|w| w.status != WorkerStatus::Stopped && w.is_stale(now, threshold))
                .map(|w| w.worker_id.clone())
                .collect();

            let mut reclaimed = Vec::new();
            for worker_id in &stale_workers {
                let task_id = match state.worker_mut(worker_id) {
                    Some(worker) => {
                        worker.status = WorkerStatus::Stale;
                        worker.current_task_id.take()
                    }
                    None => continue,
                };
                let Some(task_id) = task_id else { continue };
                if let Some(task) = state.task_mut(task_id) {
                    if !task.status.is_terminal() {
                        task.status = TaskStatus::Pending;
                        task.claimed_by = None;
                        task.claimed_at = None;
                        task.started_at = None;
                        reclaimed.push(task_id);
                    }
                }
            }
            Ok(reclaimed)
        })
    }

    /// Register a worker under a freshly generated random id.
    pub fn register_worker(&self, pid: u32) -> Result<WorkerRecord, QueueError> {
        self.register_worker_as(WorkerId::new(), pid)
    }

    /// Register a worker under a caller-chosen id (the coordinator assigns
    /// `worker_1`, `worker_2`, ... on spawn; a standalone worker may pick
    /// any id that isn't already registered).
    pub fn register_worker_as(&self, worker_id: WorkerId, pid: u32) -> Result<WorkerRecord, QueueError> {
        let now = self.now();
        let record = WorkerRecord::with_id(worker_id, pid, now);
        let to_store = record.clone();
        self.store.transact::<_, _, QueueError>(|state| {
            state.workers.push(to_store);
            Ok(())
        })?;
        Ok(record)
    }

    /// Mark a worker `stopped` on clean shutdown. Idempotent.
    pub fn stop_worker(&self, worker_id: &WorkerId) -> Result<(), QueueError> {
        self.store.transact(|state| {
            let worker = state
                .worker_mut(worker_id)
                .ok_or_else(|| QueueError::UnknownWorker(worker_id.clone()))?;
            worker.status = WorkerStatus::Stopped;
            worker.current_task_id = None;
            Ok(())
        })
    }

    /// All registered workers, live or stopped, for observability.
    pub fn list_workers(&self) -> Result<Vec<WorkerRecord>, QueueError> {
        Ok(self.store.snapshot()?.workers)
    }

    pub fn list_ready(&self) -> Result<Vec<Task>, QueueError> {
        self.store
            .snapshot()
            .map_err(QueueError::from)
            .map(|state| {
                let completed: HashSet<TaskId> = state
                    .tasks
                    .iter()
                    .filter(|t| t.status == TaskStatus::Completed)
                    .map(|t| t.id)
                    .collect();
                let mut ready: Vec<Task> = state
                    .tasks
                    .into_iter()
                    .filter(|t| t.status == TaskStatus::Pending && t.dependencies_satisfied(&completed))
                    .collect();
                ready.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.0.cmp(&b.id.0)));
                ready
            })
    }

    pub fn task(&self, task_id: TaskId) -> Result<Option<Task>, QueueError> {
        Ok(self.store.snapshot()?.task(task_id).cloned())
    }

    pub fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, QueueError> {
        Ok(self
            .store
            .snapshot()?
            .tasks
            .into_iter()
            .filter(|t| t.status == status)
            .collect())
    }

    pub fn list_by_job(&self, job_id: &JobId) -> Result<Vec<Task>, QueueError> {
        Ok(self
            .store
            .snapshot()?
            .tasks
            .into_iter()
            .filter(|t| t.job_id == *job_id)
            .collect())
    }

    pub fn stats(&self) -> Result<QueueStats, QueueError> {
        let state = self.store.snapshot()?;
        let mut stats = QueueStats::default();
        for task in &state.tasks {
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::Claimed => stats.claimed += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Failed => stats.failed += 1,
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
