// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The coordinator's main supervision loop: keep `target_worker_count`
//! workers alive, respawn crashed ones within a restart budget, sweep
//! stale task claims, and initiate a cluster-wide shutdown once the
//! queue has been idle for `idle_timeout`.

use crate::error::CoordinatorError;
use crate::logs::{ensure_logs_dir, worker_log_stdio};
use crate::slot::{SlotState, WorkerSlot};
use crate::spawn::{resolve_worker_binary, spawn_worker};
use klauss_core::Config;
use klauss_queue::Queue;
use klauss_worker::{install_signal_handlers, ShutdownFlag};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

pub async fn run(
    config: Config,
    target_worker_count: usize,
    queue: Arc<Queue>,
) -> Result<(), CoordinatorError> {
    let logs_dir = ensure_logs_dir(&config.db_path)?;
    let worker_binary = resolve_worker_binary();

    tracing::info!(
        phase = "STARTUP",
        target_worker_count,
        worker_binary = %worker_binary.display(),
        "coordinator starting"
    );

    let reclaimed = queue.sweep_stale()?;
    if !reclaimed.is_empty() {
        tracing::info!(phase = "STARTUP", count = reclaimed.len(), "reclaimed stale tasks at startup");
    }

    let mut slots: Vec<WorkerSlot> = (0..target_worker_count).map(WorkerSlot::new).collect();

    let shutdown = ShutdownFlag::new();
    install_signal_handlers(shutdown.clone());

    let idle_timeout = Duration::from_secs(config.idle_timeout_secs);
    let mut last_activity = Instant::now();
    let mut last_progress = (0usize, 0usize, 0usize);

    loop {
        if shutdown.requested() {
            tracing::info!(phase = "SHUTDOWN", "shutdown signal received");
            break;
        }

        for slot in &mut slots {
            reconcile_slot(slot, &worker_binary, &config, &logs_dir);
        }

        match queue.stats() {
            Ok(stats) => {
                let progress = (stats.claimed, stats.in_progress, stats.completed + stats.failed);
                if progress != last_progress {
                    last_progress = progress;
                    last_activity = Instant::now();
                }
                if stats.pending == 0
                    && stats.claimed == 0
                    && stats.in_progress == 0
                    && last_activity.elapsed() > idle_timeout
                {
                    tracing::info!(
                        phase = "SHUTDOWN",
                        idle_secs = last_activity.elapsed().as_secs(),
                        "idle timeout reached, shutting down cluster"
                    );
                    break;
                }
            }
            Err(e) => tracing::warn!(phase = "SUPERVISE", error = %e, "failed to read queue stats"),
        }

        if let Err(e) = queue.sweep_stale() {
            tracing::warn!(phase = "SUPERVISE", error = %e, "sweep_stale failed");
        }

        tokio::time::sleep(TICK_INTERVAL).await;
    }

    shutdown_all_slots(&mut slots).await;
    tracing::info!(phase = "SHUTDOWN", "coordinator stopped");
    Ok(())
}

fn reconcile_slot(slot: &mut WorkerSlot, worker_binary: &std::path::Path, config: &Config, logs_dir: &PathBuf) {
    if slot.state == SlotState::Disabled {
        return;
    }
    if slot.poll_exited() {
        tracing::warn!(
            phase = "SUPERVISE",
            slot = slot.index,
            worker_id = %slot.worker_id,
            "worker exited"
        );
    }
    if slot.child.is_some() {
        return;
    }
    if !slot.record_spawn_attempt() {
        tracing::error!(
            phase = "SUPERVISE",
            slot = slot.index,
            worker_id = %slot.worker_id,
            "restart budget exhausted, disabling slot"
        );
        return;
    }

    let spawn_result = worker_log_stdio(logs_dir, slot.worker_id.as_str()).and_then(|(stdout, stderr)| {
        spawn_worker(worker_binary, slot.index, slot.worker_id.as_str(), config, stdout, stderr)
    });
    match spawn_result {
        Ok(child) => {
            slot.child = Some(child);
            slot.state = SlotState::Running;
            tracing::info!(
                phase = "SUPERVISE",
                slot = slot.index,
                worker_id = %slot.worker_id,
                "worker spawned"
            );
        }
        Err(e) => {
            slot.state = SlotState::Exited;
            tracing::error!(phase = "SUPERVISE", slot = slot.index, error = %e, "failed to spawn worker");
        }
    }
}

/// `SIGTERM` every live child, wait out the grace period, `SIGKILL` any
/// still alive.
async fn shutdown_all_slots(slots: &mut [WorkerSlot]) {
    for slot in slots.iter_mut() {
        let Some(child) = slot.child.as_ref() else { continue };
        let Some(pid) = child.id() else { continue };
        let _ = signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
    }

    let deadline = Instant::now() + SHUTDOWN_GRACE;
    loop {
        let all_exited = slots
            .iter_mut()
            .all(|slot| slot.child.as_mut().map(|c| matches!(c.try_wait(), Ok(Some(_)))).unwrap_or(true));
        if all_exited || Instant::now() >= deadline {
            break;
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    for slot in slots.iter_mut() {
        if let Some(child) = slot.child.as_mut() {
            if matches!(child.try_wait(), Ok(None)) {
                if let Some(pid) = child.id() {
                    tracing::warn!(slot = slot.index, pid, "SIGTERM grace elapsed, sending SIGKILL");
                    let _ = signal::kill(Pid::from_raw(pid as i32), Signal::SIGKILL);
                }
                let _ = child.wait().await;
            }
        }
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
