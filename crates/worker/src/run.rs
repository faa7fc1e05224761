// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The worker's main loop: claim, execute, verify, complete/fail, repeat.

use crate::error::WorkerError;
use crate::executor::run_executor;
use crate::heartbeat::spawn_heartbeat_loop;
use crate::poll::jittered_poll_interval;
use crate::prompt::build_prompt;
use crate::shutdown::{install_signal_handlers, ShutdownFlag};
use klauss_core::{Config, HookResult, Task, TaskId, TaskOutcome, VerificationReport, WorkerId};
use klauss_queue::Queue;
use klauss_storage::Store;
use klauss_verify::VerificationEngine;
use std::sync::Arc;
use std::time::Duration;

/// Per-task metadata key overriding the default executor timeout.
const METADATA_TIMEOUT_SECS: &str = "timeout_secs";

pub async fn run(config: Config, worker_id: Option<String>) -> Result<(), WorkerError> {
    let executor_command = config
        .executor_command
        .clone()
        .ok_or(WorkerError::MissingExecutorCommand)?;

    let store = Arc::new(Store::open(&config)?);
    let queue = Arc::new(Queue::new(store, config.clone()));

    let ready = queue.list_ready()?;
    tracing::info!(
        phase = "STARTUP",
        db_path = %config.db_path.display(),
        pending = ready.len(),
        "worker starting"
    );
    if ready.is_empty() {
        tracing::warn!(phase = "STARTUP", "no pending tasks visible at startup");
    }

    let worker_id = match worker_id {
        Some(id) => WorkerId::from_string(id),
        None => WorkerId::new(),
    };
    let pid = std::process::id();
    queue.register_worker_as(worker_id.clone(), pid)?;
    tracing::info!(phase = "STARTUP", worker_id = %worker_id, pid, "registered");

    let shutdown = ShutdownFlag::new();
    install_signal_handlers(shutdown.clone());

    let heartbeat_interval = Duration::from_secs(config.heartbeat_interval_secs);
    let heartbeat_handle = spawn_heartbeat_loop(
        queue.clone(),
        worker_id.clone(),
        heartbeat_interval,
        shutdown.clone(),
    );

    let default_timeout = Duration::from_secs(config.executor_timeout_secs);
    let verifier = VerificationEngine::with_timeout(Duration::from_secs(
        config.verification_timeout_secs,
    ));

    loop {
        if shutdown.requested() {
            tracing::info!(phase = "SHUTDOWN", worker_id = %worker_id, "shutdown requested, exiting");
            break;
        }

        let task = match queue.claim(&worker_id) {
            Ok(Some(task)) => task,
            Ok(None) => {
                tokio::time::sleep(jittered_poll_interval()).await;
                continue;
            }
            Err(e) => {
                tracing::warn!(phase = "CLAIM", worker_id = %worker_id, error = %e, "claim failed");
                tokio::time::sleep(jittered_poll_interval()).await;
                continue;
            }
        };

        tracing::info!(phase = "CLAIM", worker_id = %worker_id, task_id = %task.id, "claimed task");
        process_task(&queue, &worker_id, task, &executor_command, default_timeout, &verifier).await;
    }

    heartbeat_handle.abort();
    queue.stop_worker(&worker_id)?;
    tracing::info!(phase = "SHUTDOWN", worker_id = %worker_id, "worker stopped");
    Ok(())
}

fn task_timeout(task: &Task, default: Duration) -> Duration {
    task.metadata
        .get(METADATA_TIMEOUT_SECS)
        .and_then(|v| v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
        .map(Duration::from_secs)
        .unwrap_or(default)
}

async fn process_task(
    queue: &Queue,
    worker_id: &WorkerId,
    task: Task,
    executor_command: &[String],
    default_timeout: Duration,
    verifier: &VerificationEngine,
) {
    let task_id = task.id;

    if let Err(e) = queue.start(task_id, worker_id) {
        tracing::warn!(phase = "EXEC", worker_id = %worker_id, task_id = %task_id, error = %e, "failed to mark task running");
        return;
    }

    let shared_context = queue
        .effective_shared_context(&task.job_id)
        .unwrap_or_default();
    let prompt = build_prompt(&task, &shared_context);
    let timeout = task_timeout(&task, default_timeout);

    tracing::info!(phase = "EXEC", worker_id = %worker_id, task_id = %task_id, "running executor");
    let run_result = run_executor(executor_command, &prompt, &task.working_dir, timeout).await;

    let (exit_success, exit_code, stdout, stderr, spawn_error) = match run_result {
        Ok(output) => (
            output.status.success(),
            output.status.code(),
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
            None,
        ),
        Err(e) => {
            tracing::warn!(phase = "EXEC", worker_id = %worker_id, task_id = %task_id, error = %e, "executor failed");
            (false, None, String::new(), String::new(), Some(e.to_string()))
        }
    };

    if !exit_success {
        let message = spawn_error.unwrap_or_else(|| format!("executor exited with code {exit_code:?}"));
        let outcome = TaskOutcome {
            verification: VerificationReport::skipped(false),
            executor_exit_code: exit_code,
            error_message: Some(message),
            stdout,
            stderr,
        };
        finish_failed(queue, worker_id, task_id, outcome);
        return;
    }

    tracing::info!(phase = "VERIFY", worker_id = %worker_id, task_id = %task_id, "running verification");
    let verification = match verifier.verify(&task, true).await {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(phase = "VERIFY", worker_id = %worker_id, task_id = %task_id, error = %e, "verification engine error");
            VerificationReport {
                hooks: vec![HookResult {
                    hook_description: "verification engine".to_string(),
                    passed: false,
                    stdout: String::new(),
                    stderr: e.to_string(),
                    exit_code: None,
                }],
                passed: false,
            }
        }
    };

    if verification.passed {
        tracing::info!(phase = "COMPLETE", worker_id = %worker_id, task_id = %task_id, "task completed");
        let outcome = TaskOutcome {
            verification,
            executor_exit_code: exit_code,
            error_message: None,
            stdout,
            stderr,
        };
        if let Err(e) = queue.complete(task_id, worker_id, outcome) {
            tracing::warn!(phase = "COMPLETE", worker_id = %worker_id, task_id = %task_id, error = %e, "failed to record completion");
        }
    } else {
        let failed: Vec<&str> = verification
            .hooks
            .iter()
            .filter(|h| !h.passed)
            .map(|h| h.hook_description.as_str())
            .collect();
        let message = format!("verification failed: {}", failed.join(", "));
        let outcome = TaskOutcome {
            verification,
            executor_exit_code: exit_code,
            error_message: Some(message),
            stdout,
            stderr,
        };
        finish_failed(queue, worker_id, task_id, outcome);
    }
}

fn finish_failed(queue: &Queue, worker_id: &WorkerId, task_id: TaskId, outcome: TaskOutcome) {
    tracing::warn!(phase = "FAIL", worker_id = %worker_id, task_id = %task_id, "task failed");
    if let Err(e) = queue.fail(task_id, worker_id, outcome) {
        tracing::warn!(phase = "FAIL", worker_id = %worker_id, task_id = %task_id, error = %e, "failed to record failure");
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
