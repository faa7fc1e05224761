// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use klauss_core::{JobId, TaskId, TaskStatus, VerificationHookSpec};
use tempfile::tempdir;

fn task(
    working_dir: &Path,
    expected_outputs: Vec<String>,
    verification_hooks: Vec<VerificationHookSpec>,
    auto_verify: bool,
) -> Task {
    Task {
        id: TaskId(1),
        job_id: JobId::new(),
        description: "do it".to_string(),
        working_dir: working_dir.to_string_lossy().into_owned(),
        priority: 0,
        depends_on: vec![],
        parent_task_id: None,
        context_files: vec![],
        expected_outputs,
        verification_hooks,
        auto_verify,
        status: TaskStatus::InProgress,
        claimed_by: None,
        created_at: 0,
        claimed_at: None,
        started_at: None,
        finished_at: None,
        attempt: 0,
        outcome: None,
        metadata: serde_json::json!({}),
    }
}

fn hook(command: &[&str], description: &str) -> VerificationHookSpec {
    VerificationHookSpec {
        command: command.iter().map(|s| s.to_string()).collect(),
        description: description.to_string(),
    }
}

#[tokio::test]
async fn skips_verification_when_executor_failed() {
    let dir = tempdir().unwrap();
    let engine = VerificationEngine::default();
    let report = engine
        .verify(&task(dir.path(), vec![], vec![], true), false)
        .await
        .unwrap();
    assert!(report.hooks.is_empty());
    assert!(!report.passed);
}

#[tokio::test]
async fn no_hooks_and_auto_verify_off_passes_through() {
    let dir = tempdir().unwrap();
    let engine = VerificationEngine::default();
    let report = engine
        .verify(&task(dir.path(), vec![], vec![], false), true)
        .await
        .unwrap();
    assert!(report.hooks.is_empty());
    assert!(report.passed);
}

#[tokio::test]
async fn explicit_hook_runs_and_reports_success() {
    let dir = tempdir().unwrap();
    let engine = VerificationEngine::default();
    let hooks = vec![hook(&["true"], "true")];
    let report = engine
        .verify(&task(dir.path(), vec![], hooks, false), true)
        .await
        .unwrap();
    assert_eq!(report.hooks.len(), 1);
    assert!(report.passed);
    assert_eq!(report.hooks[0].exit_code, Some(0));
}

#[tokio::test]
async fn explicit_hooks_continue_past_failure() {
    let dir = tempdir().unwrap();
    let engine = VerificationEngine::default();
    let hooks = vec![
        hook(&["sh", "-c", "echo boom; exit 1"], "boom"),
        hook(&["true"], "true"),
    ];
    let report = engine
        .verify(&task(dir.path(), vec![], hooks, false), true)
        .await
        .unwrap();
    assert_eq!(report.hooks.len(), 2);
    assert!(!report.passed);
    assert!(!report.hooks[0].passed);
    assert!(report.hooks[0].stdout.contains("boom"));
    assert!(report.hooks[1].passed);
}

#[tokio::test]
async fn auto_verify_detects_cargo_project_hooks() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("Cargo.toml"), "").unwrap();
    let engine = VerificationEngine::default();
    let report = engine
        .verify(&task(dir.path(), vec![], vec![], true), true)
        .await;
    // cargo likely isn't a real project here, but the hooks are still invoked.
    assert!(report.is_ok());
    assert_eq!(report.unwrap().hooks.len(), 2);
}

#[tokio::test]
async fn missing_expected_output_short_circuits_before_hooks_run() {
    let dir = tempdir().unwrap();
    let engine = VerificationEngine::default();
    let hooks = vec![hook(&["true"], "true")];
    let report = engine
        .verify(
            &task(dir.path(), vec!["out.txt".to_string()], hooks, false),
            true,
        )
        .await
        .unwrap();
    assert!(!report.passed);
    assert_eq!(report.hooks.len(), 1);
    assert!(!report.hooks[0].passed);
    assert!(report.hooks[0].hook_description.contains("out.txt"));
}

#[tokio::test]
async fn present_expected_output_lets_hooks_run() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("out.txt"), "done").unwrap();
    let engine = VerificationEngine::default();
    let hooks = vec![hook(&["true"], "true")];
    let report = engine
        .verify(
            &task(dir.path(), vec!["out.txt".to_string()], hooks, false),
            true,
        )
        .await
        .unwrap();
    assert!(report.passed);
    assert_eq!(report.hooks.len(), 2);
}
