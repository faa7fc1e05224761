// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use klauss_queue::QueueError;
use klauss_storage::StoreError;
use klauss_verify::VerifyError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("queue error: {0}")]
    Queue(#[from] QueueError),
    #[error("verification error: {0}")]
    Verify(#[from] VerifyError),
    #[error(
        "no executor command configured; set `executor.command` in klauss.toml or the \
         KLAUSS_EXECUTOR_CMD environment variable"
    )]
    MissingExecutorCommand,
    #[error("failed to spawn executor {label}: {source}")]
    ExecutorSpawn {
        label: String,
        #[source]
        source: std::io::Error,
    },
    #[error("waiting on executor {label}: {source}")]
    ExecutorWait {
        label: String,
        #[source]
        source: std::io::Error,
    },
    #[error("executor {label} exceeded its {timeout:?} timeout")]
    ExecutorTimedOut { label: String, timeout: Duration },
}
