// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use klauss_core::JobId;
use klauss_queue::QueueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("unknown job id: {0}")]
    UnknownJob(JobId),

    #[error("no workers available for job {0} and none were started")]
    NoWorkersAvailable(JobId),
}
