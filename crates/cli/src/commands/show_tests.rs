// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::context::Context;
use klauss_orchestrator::{add_subtask, create_job, SubtaskOptions};
use tempfile::tempdir;

#[test]
fn run_errors_on_unknown_id() {
    let dir = tempdir().unwrap();
    let err = run(Some(dir.path().join("db")), Some(dir.path().to_path_buf()), 999, false).unwrap_err();
    assert_eq!(err.code, 1);
}

#[test]
fn run_prints_known_task() {
    let dir = tempdir().unwrap();
    let ctx = Context::build(Some(dir.path().join("db")), Some(dir.path().to_path_buf())).unwrap();
    let job = create_job(&ctx.queue, "demo").unwrap();
    let task_id = add_subtask(
        &ctx.queue,
        job.id,
        "task",
        SubtaskOptions {
            working_dir: dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        },
    )
    .unwrap();

    run(
        Some(dir.path().join("db")),
        Some(dir.path().to_path_buf()),
        task_id.0,
        false,
    )
    .unwrap();
}
