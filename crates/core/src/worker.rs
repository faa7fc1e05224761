// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker identifier and the liveness record the coordinator tracks.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a worker process.
    pub struct WorkerId("wrk-");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    /// Holds no task, polling the queue.
    Idle,
    /// Has claimed or is executing a task.
    Busy,
    /// No heartbeat within the stale threshold; eligible for task reclaim.
    Stale,
    /// Exited cleanly after a shutdown request.
    Stopped,
}

crate::simple_display!(WorkerStatus {
    Idle => "idle",
    Busy => "busy",
    Stale => "stale",
    Stopped => "stopped",
});

/// A worker's registration and liveness state, as tracked by the
/// coordinator and consulted by `sweep_stale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub worker_id: WorkerId,
    pub pid: u32,
    pub started_at: i64,
    pub last_heartbeat: i64,
    pub current_task_id: Option<crate::task::TaskId>,
    pub status: WorkerStatus,
}

impl WorkerRecord {
    pub fn new(pid: u32, started_at: i64) -> Self {
        Self::with_id(WorkerId::new(), pid, started_at)
    }

    pub fn with_id(worker_id: WorkerId, pid: u32, started_at: i64) -> Self {
        WorkerRecord {
            worker_id,
            pid,
            started_at,
            last_heartbeat: started_at,
            current_task_id: None,
            status: WorkerStatus::Idle,
        }
    }

    /// True if the gap between `now` and the last heartbeat exceeds
    /// `stale_threshold_secs`.
    pub fn is_stale(&self, now: i64, stale_threshold_secs: u64) -> bool {
        now.saturating_sub(self.last_heartbeat) > stale_threshold_secs as i64
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
