// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use klauss_core::{DomainError, TaskId, WorkerId};
use klauss_storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown task id: {0}")]
    UnknownTask(TaskId),

    #[error("unknown worker id: {0}")]
    UnknownWorker(WorkerId),
}
