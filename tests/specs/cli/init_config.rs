// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss init-config` specs.

use crate::prelude::*;

#[test]
fn writes_a_template_klauss_toml() {
    let project = Project::empty();

    project.klauss().arg("init-config").passes();

    let contents = std::fs::read_to_string(project.path().join("klauss.toml")).unwrap();
    assert!(contents.contains("[workers]"));
    assert!(contents.contains("[executor]"));
}

#[test]
fn refuses_to_overwrite_without_force() {
    let project = Project::empty();
    project.klauss().arg("init-config").passes();

    project.klauss().arg("init-config").fails();
    project.klauss().args(["init-config", "--force"]).passes();
}
