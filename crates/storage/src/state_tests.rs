// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use klauss_core::TaskStatus;

fn task(id: i64, job_id: JobId) -> Task {
    Task {
        id: TaskId(id),
        job_id,
        description: "work".to_string(),
        working_dir: "/tmp".to_string(),
        priority: 0,
        depends_on: vec![],
        parent_task_id: None,
        context_files: vec![],
        expected_outputs: vec![],
        verification_hooks: vec![],
        auto_verify: true,
        status: TaskStatus::Pending,
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

#[test]
fn next_task_id_starts_at_one() {
    let state = MaterializedState::default();
    assert_eq!(state.next_task_id(), TaskId(1));
}

#[test]
fn next_task_id_increments_past_max() {
    let job = Job::new("job", 0);
    let mut state = MaterializedState::default();
    state.tasks.push(task(1, job.id));
    state.tasks.push(task(5, job.id));
    assert_eq!(state.next_task_id(), TaskId(6));
}

#[test]
fn tasks_for_job_filters_by_job_id() {
    let job_a = Job::new("a", 0);
    let job_b = Job::new("b", 0);
    let mut state = MaterializedState::default();
    state.tasks.push(task(1, job_a.id));
    state.tasks.push(task(2, job_b.id));

    let for_a: Vec<_> = state.tasks_for_job(&job_a.id).collect();
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].id, TaskId(1));
}

#[test]
fn task_mut_allows_in_place_update() {
    let job = Job::new("job", 0);
    let mut state = MaterializedState::default();
    state.tasks.push(task(1, job.id));

    state.task_mut(TaskId(1)).unwrap().status = TaskStatus::InProgress;
    assert_eq!(state.task(TaskId(1)).unwrap().status, TaskStatus::InProgress);
}

#[test]
fn serializes_empty_state_round_trip() {
    let state = MaterializedState::default();
    let json = serde_json::to_string(&state).unwrap();
    let restored: MaterializedState = serde_json::from_str(&json).unwrap();
    assert!(restored.tasks.is_empty());
    assert!(restored.jobs.is_empty());
    assert!(restored.workers.is_empty());
}
