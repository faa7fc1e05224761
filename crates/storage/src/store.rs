// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-process durable store.
//!
//! Every participant on the host — the coordinator, each worker, the CLI —
//! opens the same `state.json` directly; there is no broker process
//! brokering access. Mutual exclusion across processes comes from an
//! `flock(2)`-style exclusive lock on a sidecar lock file ([`fs2`]);
//! mutual exclusion within a single process is layered on top with a
//! [`parking_lot::Mutex`] so two tasks in the same tokio runtime don't
//! both block the executor waiting on the same file lock. Writes are
//! crash-safe: the new state is written to a temp file and renamed into
//! place, which is atomic on the same filesystem.

use crate::error::StoreError;
use crate::state::MaterializedState;
use fs2::FileExt;
use klauss_core::Config;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const STATE_FILE: &str = "state.json";
const LOCK_FILE: &str = "state.json.lock";

const RETRY_BASE: Duration = Duration::from_millis(50);
const RETRY_CAP: Duration = Duration::from_secs(2);
const RETRY_MAX_ATTEMPTS: u32 = 5;

/// Retry a non-blocking file-lock attempt with exponential backoff (50ms
/// base, 2s cap, 5 attempts) before surfacing a transient contention error.
fn retry_lock<F>(mut try_lock: F, path: &Path) -> Result<(), StoreError>
where
    F: FnMut() -> std::io::Result<()>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match try_lock() {
            Ok(()) => return Ok(()),
            Err(source) if attempt >= RETRY_MAX_ATTEMPTS => {
                return Err(StoreError::Transient {
                    path: path.to_path_buf(),
                    attempts: attempt,
                    source,
                })
            }
            Err(_) => {
                let backoff = RETRY_BASE.saturating_mul(1 << (attempt - 1)).min(RETRY_CAP);
                std::thread::sleep(backoff);
            }
        }
    }
}

pub struct Store {
    state_path: PathBuf,
    lock_path: PathBuf,
    // Guards against two in-process callers interleaving transactions;
    // the file lock alone is enough for correctness but would let two
    // local tasks both block inside libc flock, starving the runtime.
    local_guard: Arc<Mutex<()>>,
}

impl Store {
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.db_path).map_err(|source| StoreError::CreateDir {
            path: config.db_path.clone(),
            source,
        })?;
        let store = Store {
            state_path: config.db_path.join(STATE_FILE),
            lock_path: config.db_path.join(LOCK_FILE),
            local_guard: Arc::new(Mutex::new(())),
        };
        tracing::debug!(db_path = %config.db_path.display(), "opened store");
        Ok(store)
    }

    /// Run `f` against the current state under an exclusive cross-process
    /// lock, then persist whatever `f` left behind. `f`'s error type must
    /// convert from [`StoreError`] so callers can fold store failures into
    /// their own error enum.
    pub fn transact<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut MaterializedState) -> Result<R, E>,
        E: From<StoreError>,
    {
        let _local = self.local_guard.lock();
        let lock_file = self.open_lock_file()?;
        retry_lock(|| FileExt::try_lock_exclusive(&lock_file), &self.lock_path)?;

        let mut state = self.read_state()?;
        let result = f(&mut state);
        if result.is_ok() {
            self.write_state(&state)?;
        }
        let _ = FileExt::unlock(&lock_file);
        result
    }

    /// Read-only snapshot of the current state, taken under the same
    /// cross-process lock as a transaction.
    pub fn snapshot(&self) -> Result<MaterializedState, StoreError> {
        let _local = self.local_guard.lock();
        let lock_file = self.open_lock_file()?;
        retry_lock(|| FileExt::try_lock_shared(&lock_file), &self.lock_path)?;
        let state = self.read_state();
        let _ = FileExt::unlock(&lock_file);
        state
    }

    fn open_lock_file(&self) -> Result<File, StoreError> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(|source| StoreError::Lock {
                path: self.lock_path.clone(),
                source,
            })
    }

    fn read_state(&self) -> Result<MaterializedState, StoreError> {
        let bytes = match fs::read(&self.state_path) {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Ok(MaterializedState::default())
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.state_path.clone(),
                    source,
                })
            }
        };
        if bytes.is_empty() {
            return Ok(MaterializedState::default());
        }
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.state_path.clone(),
            source,
        })
    }

    fn write_state(&self, state: &MaterializedState) -> Result<(), StoreError> {
        let tmp_path = self.state_path.with_extension("json.tmp");
        let write = || -> std::io::Result<()> {
            let mut tmp = File::create(&tmp_path)?;
            serde_json::to_writer_pretty(&mut tmp, state)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            tmp.sync_all()?;
            fs::rename(&tmp_path, &self.state_path)?;
            Ok(())
        };
        write().map_err(|source| StoreError::Write {
            path: self.state_path.clone(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
