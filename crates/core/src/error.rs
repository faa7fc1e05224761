// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared domain error taxonomy.
//!
//! These are the errors reported synchronously to a caller rather than
//! recorded as task-level failures. Crate-specific errors (`klauss-storage`,
//! `klauss-queue`, ...) wrap these variants via `#[from]`.

use thiserror::Error;

/// Malformed input, rejected before any queue mutation takes effect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown task id in depends_on: {0}")]
    UnknownDependency(crate::TaskId),

    #[error("dependency cycle detected introducing task {0}")]
    DependencyCycle(crate::TaskId),

    #[error("negative priority: {0}")]
    NegativePriority(i64),

    #[error(
        "working_dir {working_dir} is outside project root {project_root} \
         and allow_external_dirs is false"
    )]
    BoundaryViolation {
        working_dir: String,
        project_root: String,
    },

    #[error("task {0} is not owned by worker {1}")]
    NotOwner(crate::TaskId, String),

    #[error("task {0} is not in status {1}")]
    WrongStatus(crate::TaskId, &'static str),

    #[error("unknown job id: {0}")]
    UnknownJob(String),
}
