// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background heartbeat timer. Runs on its own task and shares nothing
//! with the main claim/execute/verify loop except the worker's queue
//! handle and id.

use crate::shutdown::ShutdownFlag;
use klauss_core::WorkerId;
use klauss_queue::Queue;
use std::sync::Arc;
use std::time::Duration;

pub fn spawn_heartbeat_loop(
    queue: Arc<Queue>,
    worker_id: WorkerId,
    interval: Duration,
    shutdown: ShutdownFlag,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            if shutdown.requested() {
                break;
            }
            if let Err(e) = queue.heartbeat(&worker_id) {
                tracing::warn!(worker_id = %worker_id, error = %e, "heartbeat failed");
            }
        }
    })
}
