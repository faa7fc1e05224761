// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded subprocess execution: wall-clock timeout, then SIGTERM, then a
//! grace period before SIGKILL.

use crate::error::VerifyError;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};

/// How long a process gets to exit cleanly after SIGTERM before SIGKILL.
const TERM_GRACE: Duration = Duration::from_secs(5);

pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    label: &str,
) -> Result<Output, VerifyError> {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|source| VerifyError::Spawn {
        label: label.to_string(),
        source,
    })?;

    let mut stdout_pipe = child.stdout.take().expect("stdout piped above");
    let mut stderr_pipe = child.stderr.take().expect("stderr piped above");
    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stdout_pipe.read_to_end(&mut buf).await;
        buf
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stderr_pipe.read_to_end(&mut buf).await;
        buf
    });

    match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) => {
            let stdout = stdout_task.await.unwrap_or_default();
            let stderr = stderr_task.await.unwrap_or_default();
            Ok(Output {
                status,
                stdout,
                stderr,
            })
        }
        Ok(Err(source)) => Err(VerifyError::Io {
            label: label.to_string(),
            source,
        }),
        Err(_) => {
            terminate(&mut child).await;
            stdout_task.abort();
            stderr_task.abort();
            Err(VerifyError::TimedOut {
                label: label.to_string(),
                timeout,
            })
        }
    }
}

/// SIGTERM, wait out the grace period, SIGKILL if it's still alive.
async fn terminate(child: &mut Child) {
    let Some(pid) = child.id() else { return };
    let pid = Pid::from_raw(pid as i32);

    if signal::kill(pid, Signal::SIGTERM).is_err() {
        return;
    }
    if tokio::time::timeout(TERM_GRACE, child.wait()).await.is_err() {
        tracing::warn!(pid = pid.as_raw(), "SIGTERM grace period elapsed, sending SIGKILL");
        let _ = signal::kill(pid, Signal::SIGKILL);
        let _ = child.wait().await;
    }
}

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;
