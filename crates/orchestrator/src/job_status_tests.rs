// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::subtask::{add_subtask, create_job, SubtaskOptions};
use klauss_core::config::CliOverrides;
use klauss_core::Config;
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

#[test]
fn empty_job_is_running() {
    let dir = tempdir().unwrap();
    let queue = test_queue(dir.path());
    let job = create_job(&queue, "demo").unwrap();

    let progress = get_job_status(&queue, &job.id).unwrap();
    assert_eq!(progress.status, JobStatus::Running);
    assert_eq!(progress.total, 0);
    assert_eq!(progress.progress_pct, 0.0);
}

#[test]
fn unknown_job_errors() {
    let dir = tempdir().unwrap();
    let queue = test_queue(dir.path());
    let err = get_job_status(&queue, &klauss_core::JobId::new()).unwrap_err();
    assert!(matches!(err, OrchestratorError::UnknownJob(_)));
}

#[test]
fn progress_pct_counts_terminal_tasks() {
    let dir = tempdir().unwrap();
    let queue = test_queue(dir.path());
    let job = create_job(&queue, "demo").unwrap();
    add_subtask(
        &queue,
        job.id,
        "one",
        SubtaskOptions {
            working_dir: dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        },
    )
    .unwrap();
    add_subtask(
        &queue,
        job.id,
        "two",
        SubtaskOptions {
            working_dir: dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        },
    )
    .unwrap();

    let progress = get_job_status(&queue, &job.id).unwrap();
    assert_eq!(progress.total, 2);
    assert_eq!(progress.pending, 2);
    assert_eq!(progress.progress_pct, 0.0);
}
