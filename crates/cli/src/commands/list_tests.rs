// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::context::Context;
use klauss_orchestrator::{add_subtask, create_job, SubtaskOptions};
use tempfile::tempdir;

#[test]
fn parse_status_rejects_unknown_value() {
    assert!(parse_status("bogus").is_err());
    assert!(parse_status("failed").is_ok());
}

#[test]
fn run_filters_by_status() {
    let dir = tempdir().unwrap();
    let ctx = Context::build(Some(dir.path().join("db")), Some(dir.path().to_path_buf())).unwrap();
    let job = create_job(&ctx.queue, "demo").unwrap();
    add_subtask(
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
        Some("pending".to_string()),
        false,
    )
    .unwrap();

    let err = run(
        Some(dir.path().join("db")),
        Some(dir.path().to_path_buf()),
        Some("bogus".to_string()),
        false,
    )
    .unwrap_err();
    assert_eq!(err.code, 1);
}
