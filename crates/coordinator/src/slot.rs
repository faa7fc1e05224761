// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-worker supervision slot: tracks the spawned child process and a
//! restart budget that disables a chronically-crashing slot rather than
//! respawning it forever.

use klauss_core::WorkerId;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tokio::process::Child;

/// Restart budget: this many restarts inside `RESTART_WINDOW` trips the slot.
const RESTART_BUDGET: usize = 5;
const RESTART_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Spawning,
    Running,
    Exited,
    /// Restart budget exhausted; the coordinator leaves this slot dead.
    Disabled,
}

pub struct WorkerSlot {
    pub index: usize,
    pub worker_id: WorkerId,
    pub state: SlotState,
    pub child: Option<Child>,
    restarts: VecDeque<Instant>,
}

impl WorkerSlot {
    pub fn new(index: usize) -> Self {
        WorkerSlot {
            index,
            worker_id: WorkerId::from_string(format!("worker_{}", index + 1)),
            state: SlotState::Exited,
            child: None,
            restarts: VecDeque::new(),
        }
    }

    /// Non-blocking liveness check. Flips state to `Exited` and returns
    /// true if the child has exited since the last poll.
    pub fn poll_exited(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(Some(_status)) => {
                self.state = SlotState::Exited;
                self.child = None;
                true
            }
            Ok(None) => false,
            Err(_) => {
                self.state = SlotState::Exited;
                self.child = None;
                true
            }
        }
    }

    /// Record a spawn attempt now. Returns `false` (and disables the slot)
    /// once `RESTART_BUDGET` spawns have happened within `RESTART_WINDOW`.
    pub fn record_spawn_attempt(&mut self) -> bool {
        let now = Instant::now();
        while let Some(&front) = self.restarts.front() {
            if now.duration_since(front) > RESTART_WINDOW {
                self.restarts.pop_front();
            } else {
                break;
            }
        }
        if self.restarts.len() >= RESTART_BUDGET {
            self.state = SlotState::Disabled;
            return false;
        }
        self.restarts.push_back(now);
        true
    }
}

#[cfg(test)]
#[path = "slot_tests.rs"]
mod tests;
