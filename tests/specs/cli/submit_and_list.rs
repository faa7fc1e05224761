// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss submit` / `klauss submit-file` / `klauss list` / `klauss stats` specs.

use crate::prelude::*;

#[test]
fn submit_then_list_shows_the_task() {
    let project = Project::empty();

    project.klauss().args(["submit", "say hello"]).passes();

    project
        .klauss()
        .args(["list", "pending"])
        .passes()
        .stdout_has("say hello");

    project
        .klauss()
        .arg("stats")
        .passes()
        .stdout_has("pending:   1");
}

#[test]
fn submit_file_inserts_every_task_in_the_batch() {
    let project = Project::empty();
    project.file(
        "batch.json",
        r#"[
            {"description": "first task"},
            {"description": "second task", "priority": 5}
        ]"#,
    );

    let batch_path = project.path().join("batch.json");
    project
        .klauss()
        .arg("submit-file")
        .arg(&batch_path)
        .passes();

    let assert = project.klauss().args(["list", "pending", "--json"]).passes();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("first task"));
    assert!(stdout.contains("second task"));
}

#[test]
fn submit_file_rejects_an_empty_batch() {
    let project = Project::empty();
    project.file("empty.json", "[]");
    let empty_path = project.path().join("empty.json");

    project.klauss().arg("submit-file").arg(&empty_path).fails();
}

#[test]
fn show_reports_a_missing_task_as_a_usage_error() {
    let project = Project::empty();

    project.klauss().args(["show", "999999"]).fails();
}

#[test]
fn stats_on_a_fresh_store_is_all_zero() {
    let project = Project::empty();

    project
        .klauss()
        .arg("stats")
        .passes()
        .stdout_has("pending:   0")
        .stdout_has("failed:    0");
}
