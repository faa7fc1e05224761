// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runs a task's verification pipeline and turns the result into a
//! [`VerificationReport`].
//!
//! Four steps: check `expected_outputs` exist, assemble the hook list
//! (explicit hooks, or auto-detected ones if `auto_verify` and none were
//! given), run every hook to completion regardless of earlier failures,
//! and fold the per-hook results into one report.

use crate::error::VerifyError;
use crate::hooks;
use crate::timeout::run_with_timeout;
use klauss_core::{HookResult, Task, VerificationReport};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

const MAX_OUTPUT_TAIL_LINES: usize = 40;
const DEFAULT_HOOK_TIMEOUT_SECS: u64 = 120;

pub struct VerificationEngine {
    pub hook_timeout: Duration,
}

impl Default for VerificationEngine {
    fn default() -> Self {
        VerificationEngine {
            hook_timeout: Duration::from_secs(DEFAULT_HOOK_TIMEOUT_SECS),
        }
    }
}

impl VerificationEngine {
    pub fn with_timeout(hook_timeout: Duration) -> Self {
        VerificationEngine { hook_timeout }
    }

    /// Verify `task`. If the executor itself failed, verification is
    /// skipped and the failure is recorded as-is.
    pub async fn verify(
        &self,
        task: &Task,
        executor_exit_success: bool,
    ) -> Result<VerificationReport, VerifyError> {
        if !executor_exit_success {
            return Ok(VerificationReport::skipped(false));
        }

        let working_dir = Path::new(&task.working_dir);
        let mut results = Vec::new();

        for path in &task.expected_outputs {
            if !working_dir.join(path).exists() && !Path::new(path).exists() {
                results.push(HookResult {
                    hook_description: format!("output exists: {path}"),
                    passed: false,
                    stdout: String::new(),
                    stderr: format!("expected output not found: {path}"),
                    exit_code: None,
                });
                return Ok(VerificationReport {
                    hooks: results,
                    passed: false,
                });
            }
            results.push(HookResult {
                hook_description: format!("output exists: {path}"),
                passed: true,
                stdout: String::new(),
                stderr: String::new(),
                exit_code: None,
            });
        }

        let hook_specs = if !task.verification_hooks.is_empty() {
            task.verification_hooks.clone()
        } else if task.auto_verify {
            hooks::detect_hooks(working_dir)
        } else {
            Vec::new()
        };

        if hook_specs.is_empty() {
            return Ok(VerificationReport {
                passed: results.iter().all(|h| h.passed),
                hooks: results,
            });
        }

        let mut overall_passed = results.iter().all(|h| h.passed);
        for spec in &hook_specs {
            let mut cmd = Command::new(&spec.command[0]);
            cmd.args(&spec.command[1..]).current_dir(working_dir);

            let result = match run_with_timeout(cmd, self.hook_timeout, &spec.description).await {
                Ok(output) => HookResult {
                    hook_description: spec.description.clone(),
                    passed: output.status.success(),
                    stdout: tail(&output.stdout),
                    stderr: tail(&output.stderr),
                    exit_code: output.status.code(),
                },
                Err(err) => HookResult {
                    hook_description: spec.description.clone(),
                    passed: false,
                    stdout: String::new(),
                    stderr: err.to_string(),
                    exit_code: None,
                },
            };

            if !result.passed {
                overall_passed = false;
            }
            results.push(result);
        }

        Ok(VerificationReport {
            hooks: results,
            passed: overall_passed,
        })
    }
}

fn tail(bytes: &[u8]) -> String {
    let combined = String::from_utf8_lossy(bytes).into_owned();
    let lines: Vec<&str> = combined.lines().collect();
    let start = lines.len().saturating_sub(MAX_OUTPUT_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
