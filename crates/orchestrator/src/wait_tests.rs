// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::subtask::{add_subtask, create_job, SubtaskOptions};
use klauss_core::config::{CliOverrides, ENV_AUTO_START_WORKERS};
use klauss_core::{Config, TaskOutcome, VerificationReport};
use klauss_storage::Store;
use std::sync::Arc;
use tempfile::tempdir;

fn test_queue(dir: &std::path::Path) -> Queue {
    let config = Config::resolve(
        CliOverrides {
            db_path: Some(dir.join("db")),
            project_root: Some(dir.to_path_buf()),
            ..Default::default()
        },
        dir,
    )
    .unwrap();
    let store = Arc::new(Store::open(&config).unwrap());
    Queue::new(store, config)
}

#[tokio::test]
async fn wait_and_collect_returns_once_all_tasks_are_terminal() {
    let dir = tempdir().unwrap();
    let queue = test_queue(dir.path());
    let job = create_job(&queue, "demo").unwrap();
    let task_id = add_subtask(
        &queue,
        job.id,
        "do it",
        SubtaskOptions {
            working_dir: dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        },
    )
    .unwrap();

    let worker_id = queue.register_worker(1).unwrap().worker_id;
    let task = queue.claim(&worker_id).unwrap().unwrap();
    queue.start(task.id, &worker_id).unwrap();
    queue
        .complete(
            task_id,
            &worker_id,
            TaskOutcome {
                verification: VerificationReport::skipped(true),
                executor_exit_code: Some(0),
                error_message: None,
                stdout: "done".to_string(),
                stderr: String::new(),
            },
        )
        .unwrap();

    let results = wait_and_collect(&queue, &job.id, false).await.unwrap();
    assert_eq!(results.completed.len(), 1);
    assert!(results.failed.is_empty());
    assert_eq!(results.completed.get(&task_id).unwrap().stdout, "done");
}

#[test]
fn ensure_workers_available_errors_with_no_workers_and_auto_start_disabled() {
    let dir = tempdir().unwrap();
    let queue = test_queue(dir.path());
    let job = create_job(&queue, "demo").unwrap();

    std::env::set_var(ENV_AUTO_START_WORKERS, "false");
    let err = ensure_workers_available(&queue, &job.id).unwrap_err();
    std::env::remove_var(ENV_AUTO_START_WORKERS);
    assert!(matches!(err, OrchestratorError::NoWorkersAvailable(_)));
}

#[test]
fn ensure_workers_available_passes_with_a_live_worker() {
    let dir = tempdir().unwrap();
    let queue = test_queue(dir.path());
    let job = create_job(&queue, "demo").unwrap();
    queue.register_worker(1).unwrap();

    assert!(ensure_workers_available(&queue, &job.id).is_ok());
}
