// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling the queue until a job finishes, and making sure there's a
//! worker pool to do the work in the first place. A plain
//! poll-until-done loop over store snapshots rather than a socket
//! round-trip, since there's no daemon to subscribe to here.

use klauss_core::{JobId, TaskStatus, WorkerStatus};
use klauss_queue::Queue;
use std::collections::HashMap;
use std::io::IsTerminal;
use std::time::Duration;

use crate::error::OrchestratorError;
use crate::job_status::get_job_status;

const POLL_INTERVAL: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct CollectedResults {
    pub completed: HashMap<klauss_core::TaskId, klauss_core::TaskOutcome>,
    pub failed: HashMap<klauss_core::TaskId, klauss_core::TaskOutcome>,
}

/// Poll `job_id` until every one of its tasks is terminal, then return the
/// completed and failed outcomes. If `show_progress` is set, logs a
/// progress line on every poll tick.
pub async fn wait_and_collect(
    queue: &Queue,
    job_id: &JobId,
    show_progress: bool,
) -> Result<CollectedResults, OrchestratorError> {
    loop {
        let progress = get_job_status(queue, job_id)?;
        if show_progress {
            tracing::info!(
                job_id = %job_id,
                completed = progress.completed,
                failed = progress.failed,
                in_progress = progress.in_progress,
                pending = progress.pending,
                progress_pct = progress.progress_pct,
                "job progress"
            );
        }
        if progress.pending == 0 && progress.in_progress == 0 {
            break;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    let tasks = queue.list_by_job(job_id)?;
    let mut completed = HashMap::new();
    let mut failed = HashMap::new();
    for task in tasks {
        let Some(outcome) = task.outcome else { continue };
        match task.status {
            TaskStatus::Completed => {
                completed.insert(task.id, outcome);
            }
            TaskStatus::Failed => {
                failed.insert(task.id, outcome);
            }
            _ => {}
        }
    }
    Ok(CollectedResults { completed, failed })
}

/// Make sure at least one worker is live before a caller starts waiting on
/// a job, so `wait_and_collect` doesn't spin forever against an empty pool.
///
/// With `KLAUSS_AUTO_START_WORKERS` unset and stdin attached to a terminal,
/// prompts interactively; otherwise honors the env toggle, defaulting to
/// refusing to proceed with no workers.
pub fn ensure_workers_available(queue: &Queue, job_id: &JobId) -> Result<(), OrchestratorError> {
    let live = queue
        .list_workers()?
        .into_iter()
        .any(|w| matches!(w.status, WorkerStatus::Idle | WorkerStatus::Busy));
    if live {
        return Ok(());
    }

    let should_start = match klauss_core::Config::auto_start_workers() {
        Some(toggle) => toggle,
        None if std::io::stdin().is_terminal() => prompt_to_start(),
        None => false,
    };

    if should_start {
        match spawn_coordinator_detached() {
            Ok(()) => {
                tracing::info!(job_id = %job_id, "started klaussd to supply workers");
                return Ok(());
            }
            Err(e) => {
                tracing::error!(job_id = %job_id, error = %e, "failed to auto-start klaussd");
                return Err(OrchestratorError::NoWorkersAvailable(*job_id));
            }
        }
    }

    Err(OrchestratorError::NoWorkersAvailable(*job_id))
}

/// Launch `klaussd` as a detached background process, preferring the
/// sibling of the calling binary over whatever is on `PATH`.
fn spawn_coordinator_detached() -> std::io::Result<()> {
    let binary = std::env::current_exe()
        .ok()
        .map(|p| p.with_file_name("klaussd"))
        .filter(|p| p.is_file())
        .unwrap_or_else(|| std::path::PathBuf::from("klaussd"));

    std::process::Command::new(binary)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()?;
    Ok(())
}

fn prompt_to_start() -> bool {
    eprint!("No workers are running for this job. Start them now? [y/N] ");
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
#[path = "wait_tests.rs"]
mod tests;
