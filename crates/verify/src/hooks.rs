// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Auto-detection of the verification hooks to run from marker files in a
//! task's working directory.
//!
//! Checked in order, first match wins: a TypeScript project is also a
//! `package.json` project, so `tsconfig.json` is checked first. Within a
//! matched ecosystem, optional hooks (lint, test) are only appended when
//! their own configuration is present, so a bare `cargo init` doesn't grow
//! a `cargo clippy` step it has no lint config for.

use klauss_core::VerificationHookSpec;
use std::path::Path;

fn hook(command: &[&str], description: &str) -> VerificationHookSpec {
    VerificationHookSpec {
        command: command.iter().map(|s| s.to_string()).collect(),
        description: description.to_string(),
    }
}

pub fn detect_hooks(working_dir: &Path) -> Vec<VerificationHookSpec> {
    if working_dir.join("tsconfig.json").exists() {
        let mut hooks = vec![hook(&["npx", "tsc", "--noEmit"], "tsc --noEmit")];
        if has_eslint_config(working_dir) {
            hooks.push(hook(&["npx", "eslint", "."], "eslint ."));
        }
        if package_json_has_test_script(working_dir) {
            hooks.push(hook(&["npm", "test", "--silent"], "npm test"));
        }
        return hooks;
    }

    if working_dir.join("Cargo.toml").exists() {
        let mut hooks = vec![hook(&["cargo", "check"], "cargo check")];
        if has_clippy_config(working_dir) {
            hooks.push(hook(&["cargo", "clippy"], "cargo clippy"));
        }
        hooks.push(hook(&["cargo", "test"], "cargo test"));
        return hooks;
    }

    if working_dir.join("go.mod").exists() {
        return vec![
            hook(&["go", "build", "./..."], "go build ./..."),
            hook(&["go", "vet", "./..."], "go vet ./..."),
            hook(&["go", "test", "./..."], "go test ./..."),
        ];
    }

    if working_dir.join("package.json").exists() {
        let mut hooks = Vec::new();
        if has_eslint_config(working_dir) {
            hooks.push(hook(&["npx", "eslint", "."], "eslint ."));
        }
        if package_json_has_test_script(working_dir) {
            hooks.push(hook(&["npm", "test", "--silent"], "npm test"));
        }
        return hooks;
    }

    Vec::new()
}

fn has_eslint_config(dir: &Path) -> bool {
    [
        ".eslintrc",
        ".eslintrc.js",
        ".eslintrc.cjs",
        ".eslintrc.json",
        ".eslintrc.yml",
        ".eslintrc.yaml",
    ]
    .iter()
    .any(|name| dir.join(name).exists())
}

fn has_clippy_config(dir: &Path) -> bool {
    dir.join("clippy.toml").exists() || dir.join(".clippy.toml").exists()
}

/// `true` only if `package.json` declares a non-empty `scripts.test`; the
/// npm-generated placeholder (`"echo \"Error: no test specified\" && exit 1"`)
/// is a real script and intentionally still counts as one.
fn package_json_has_test_script(dir: &Path) -> bool {
    let Ok(contents) = std::fs::read_to_string(dir.join("package.json")) else {
        return false;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&contents) else {
        return false;
    };
    value
        .get("scripts")
        .and_then(|scripts| scripts.get("test"))
        .and_then(|test| test.as_str())
        .is_some_and(|test| !test.is_empty())
}

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;
