// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use klauss_core::config::CliOverrides;
use klauss_core::FakeClock;
use tempfile::tempdir;

fn test_queue(dir: &std::path::Path) -> Queue<FakeClock> {
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
    Queue::with_clock(store, config, FakeClock::new())
}

fn basic_task(job_id: JobId, dir: &std::path::Path) -> NewTask {
    NewTask {
        job_id,
        description: "build it".to_string(),
        working_dir: dir.to_string_lossy().into_owned(),
        priority: 0,
        depends_on: vec![],
        parent_task_id: None,
        context_files: vec![],
        expected_outputs: vec![],
        verification_hooks: vec![],
        auto_verify: false,
        metadata: serde_json::json!({}),
    }
}

#[test]
fn add_task_rejects_negative_priority() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();
    let mut task = basic_task(job.id, dir.path());
    task.priority = -1;
    let err = q.add_task(task).unwrap_err();
    assert!(matches!(err, QueueError::Domain(DomainError::NegativePriority(-1))));
}

#[test]
fn add_task_rejects_dir_outside_project_root() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();
    let task = basic_task(job.id, Path::new("/definitely/outside"));
    let err = q.add_task(task).unwrap_err();
    assert!(matches!(
        err,
        QueueError::Domain(DomainError::BoundaryViolation { .. })
    ));
}

#[test]
fn add_task_rejects_unknown_dependency() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();
    let mut task = basic_task(job.id, dir.path());
    task.depends_on = vec![TaskId(999)];
    let err = q.add_task(task).unwrap_err();
    assert!(matches!(
        err,
        QueueError::Domain(DomainError::UnknownDependency(TaskId(999)))
    ));
}

#[test]
fn claim_returns_none_when_nothing_ready() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let worker = q.register_worker(1).unwrap();
    assert!(q.claim(&worker.worker_id).unwrap().is_none());
}

#[test]
fn claim_picks_highest_priority_then_lowest_id() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();

    let mut low = basic_task(job.id, dir.path());
    low.priority = 1;
    let low_id = q.add_task(low).unwrap();

    let mut high = basic_task(job.id, dir.path());
    high.priority = 5;
    let high_id = q.add_task(high).unwrap();
    let _ = low_id;

    let worker = q.register_worker(1).unwrap();
    let claimed = q.claim(&worker.worker_id).unwrap().unwrap();
    assert_eq!(claimed.id, high_id);
    assert_eq!(claimed.status, TaskStatus::Claimed);
}

#[test]
fn claim_skips_tasks_with_unsatisfied_dependencies() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();

    let base_id = q.add_task(basic_task(job.id, dir.path())).unwrap();
    let mut dependent = basic_task(job.id, dir.path());
    dependent.priority = 10;
    dependent.depends_on = vec![base_id];
    q.add_task(dependent).unwrap();

    let worker = q.register_worker(1).unwrap();
    let claimed = q.claim(&worker.worker_id).unwrap().unwrap();
    assert_eq!(claimed.id, base_id);
}

#[test]
fn full_lifecycle_complete() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();
    let task_id = q.add_task(basic_task(job.id, dir.path())).unwrap();
    let worker = q.register_worker(1).unwrap();

    let claimed = q.claim(&worker.worker_id).unwrap().unwrap();
    assert_eq!(claimed.id, task_id);

    q.start(task_id, &worker.worker_id).unwrap();
    q.complete(
        task_id,
        &worker.worker_id,
        TaskOutcome {
            verification: klauss_core::VerificationReport::skipped(true),
            executor_exit_code: Some(0),
            error_message: None,
            stdout: String::new(),
            stderr: String::new(),
        },
    )
    .unwrap();

    let tasks = q.list_by_status(TaskStatus::Completed).unwrap();
    assert_eq!(tasks.len(), 1);
}

#[test]
fn start_rejects_wrong_owner() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();
    let task_id = q.add_task(basic_task(job.id, dir.path())).unwrap();
    let worker_a = q.register_worker(1).unwrap();
    let worker_b = q.register_worker(2).unwrap();
    q.claim(&worker_a.worker_id).unwrap();

    let err = q.start(task_id, &worker_b.worker_id).unwrap_err();
    assert!(matches!(err, QueueError::Domain(DomainError::NotOwner(..))));
}

#[test]
fn reset_returns_failed_task_to_pending() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();
    let task_id = q.add_task(basic_task(job.id, dir.path())).unwrap();
    let worker = q.register_worker(1).unwrap();
    q.claim(&worker.worker_id).unwrap();
    q.start(task_id, &worker.worker_id).unwrap();
    q.fail(
        task_id,
        &worker.worker_id,
        TaskOutcome {
            verification: klauss_core::VerificationReport::skipped(false),
            executor_exit_code: Some(1),
            error_message: Some("boom".to_string()),
            stdout: String::new(),
            stderr: "boom".to_string(),
        },
    )
    .unwrap();

    q.reset(task_id).unwrap();
    let tasks = q.list_by_status(TaskStatus::Pending).unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].claimed_by.is_none());
}

#[test]
fn sweep_stale_reclaims_task_from_unresponsive_worker() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();
    let task_id = q.add_task(basic_task(job.id, dir.path())).unwrap();
    let worker = q.register_worker(1).unwrap();
    q.claim(&worker.worker_id).unwrap();

    q.clock.advance(std::time::Duration::from_secs(3600));
    let reclaimed = q.sweep_stale().unwrap();
    assert_eq!(reclaimed, vec![task_id]);

    let pending = q.list_by_status(TaskStatus::Pending).unwrap();
    assert_eq!(pending.len(), 1);
}

#[test]
fn heartbeat_clears_stale_status() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let worker = q.register_worker(1).unwrap();
    q.clock.advance(std::time::Duration::from_secs(3600));
    q.sweep_stale().unwrap();

    q.heartbeat(&worker.worker_id).unwrap();
    let state = q.store.snapshot().unwrap();
    assert_eq!(state.worker(&worker.worker_id).unwrap().status, WorkerStatus::Idle);
}

#[test]
fn shared_context_merges_global_under_job_scoped() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();

    q.set_shared_context(None, "style", "terse").unwrap();
    q.set_shared_context(Some(&job.id), "style", "verbose").unwrap();
    q.set_shared_context(None, "lang", "rust").unwrap();

    let merged = q.effective_shared_context(&job.id).unwrap();
    assert_eq!(merged.get("style").map(String::as_str), Some("verbose"));
    assert_eq!(merged.get("lang").map(String::as_str), Some("rust"));
}

#[test]
fn stop_worker_marks_status_stopped_and_clears_task() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();
    q.add_task(basic_task(job.id, dir.path())).unwrap();
    let worker = q.register_worker(1).unwrap();
    q.claim(&worker.worker_id).unwrap();

    q.stop_worker(&worker.worker_id).unwrap();
    let state = q.store.snapshot().unwrap();
    let stopped = state.worker(&worker.worker_id).unwrap();
    assert_eq!(stopped.status, WorkerStatus::Stopped);
    assert!(stopped.current_task_id.is_none());
}

#[test]
fn stats_counts_by_status() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();
    q.add_task(basic_task(job.id, dir.path())).unwrap();
    q.add_task(basic_task(job.id, dir.path())).unwrap();

    let stats = q.stats().unwrap();
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.completed, 0);
}

#[test]
fn list_workers_reports_registered_workers() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    q.register_worker(111).unwrap();
    q.register_worker(222).unwrap();

    let workers = q.list_workers().unwrap();
    assert_eq!(workers.len(), 2);
}

#[test]
fn list_by_job_excludes_other_jobs_tasks() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job_a = q.create_job("job a").unwrap();
    let job_b = q.create_job("job b").unwrap();
    q.add_task(basic_task(job_a.id, dir.path())).unwrap();
    q.add_task(basic_task(job_a.id, dir.path())).unwrap();
    q.add_task(basic_task(job_b.id, dir.path())).unwrap();

    let tasks = q.list_by_job(&job_a.id).unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.job_id == job_a.id));
}

#[test]
fn task_looks_up_by_id() {
    let dir = tempdir().unwrap();
    let q = test_queue(dir.path());
    let job = q.create_job("job").unwrap();
    let task_id = q.add_task(basic_task(job.id, dir.path())).unwrap();

    assert_eq!(q.task(task_id).unwrap().unwrap().id, task_id);
    assert!(q.task(TaskId(9999)).unwrap().is_none());
}
