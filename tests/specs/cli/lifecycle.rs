// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss stop` / `klauss kill` specs against a store with no running
//! coordinator — the common case for a fresh project.

use crate::prelude::*;

#[test]
fn stop_with_no_pidfile_is_a_no_op() {
    let project = Project::empty();

    project
        .klauss()
        .arg("stop")
        .passes()
        .stdout_has("nothing to stop");
}

#[test]
fn kill_with_no_pidfile_reports_zero_signals() {
    let project = Project::empty();

    project.klauss().arg("kill").passes();
}

#[test]
fn workers_on_an_empty_store_reports_none_registered() {
    let project = Project::empty();

    project
        .klauss()
        .arg("workers")
        .passes()
        .stdout_has("No workers registered");
}

#[test]
fn dashboard_on_an_empty_store_succeeds() {
    let project = Project::empty();

    project.klauss().arg("dashboard").passes();
}
