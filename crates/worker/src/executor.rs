// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawns the executor CLI for a task: prompt on stdin, wall-clock timeout,
//! `SIGTERM` then `SIGKILL` on expiry. Mirrors the verification engine's
//! subprocess discipline with a stdin-writing stage added.

use crate::error::WorkerError;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};

const TERM_GRACE: Duration = Duration::from_secs(5);

pub async fn run_executor(
    command: &[String],
    prompt: &str,
    working_dir: &str,
    timeout: Duration,
) -> Result<Output, WorkerError> {
    let label = command.join(" ");
    let mut cmd = Command::new(&command[0]);
    cmd.args(&command[1..])
        .current_dir(working_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|source| WorkerError::ExecutorSpawn {
        label: label.clone(),
        source,
    })?;

    let mut stdin = child.stdin.take().expect("stdin piped above");
    let prompt = prompt.to_string();
    let stdin_task = tokio::spawn(async move {
        let _ = stdin.write_all(prompt.as_bytes()).await;
    });

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
            let _ = stdin_task.await;
            let stdout = stdout_task.await.unwrap_or_default();
            let stderr = stderr_task.await.unwrap_or_default();
            Ok(Output {
                status,
                stdout,
                stderr,
            })
        }
        Ok(Err(source)) => {
            stdin_task.abort();
            stdout_task.abort();
            stderr_task.abort();
            Err(WorkerError::ExecutorWait { label, source })
        }
        Err(_) => {
            terminate(&mut child).await;
            stdin_task.abort();
            stdout_task.abort();
            stderr_task.abort();
            Err(WorkerError::ExecutorTimedOut { label, timeout })
        }
    }
}

/// `SIGTERM`, wait out the grace period, `SIGKILL` if it's still alive.
async fn terminate(child: &mut Child) {
    let Some(pid) = child.id() else { return };
    let pid = Pid::from_raw(pid as i32);

    if signal::kill(pid, Signal::SIGTERM).is_err() {
        return;
    }
    if tokio::time::timeout(TERM_GRACE, child.wait()).await.is_err() {
        tracing::warn!(
            pid = pid.as_raw(),
            "SIGTERM grace period elapsed, sending SIGKILL"
        );
        let _ = signal::kill(pid, Signal::SIGKILL);
        let _ = child.wait().await;
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
