// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `klauss init-config`: drop a starter `klauss.toml` into the project root.

use crate::exit_error::ExitError;
use std::path::PathBuf;

const TEMPLATE: &str = r#"# klauss.toml — project-local overrides. Every field is optional; CLI
# arguments and environment variables take precedence over this file.

[database]
# path = ".klauss"

[project]
# name = "my-project"
# root = "."

[safety]
allow_external_dirs = false

[workers]
default_count = 4
idle_timeout_seconds = 300

[coordination]
enabled = true
shared_db = true

[executor]
# command = ["my-agent-cli", "--json"]
# timeout_seconds = 1800
"#;

pub fn run(project_root: Option<PathBuf>, force: bool) -> Result<(), ExitError> {
    let dir = project_root.unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let path = dir.join("klauss.toml");

    if path.exists() && !force {
        return Err(ExitError::usage(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }

    std::fs::write(&path, TEMPLATE)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "init_config_tests.rs"]
mod tests;
