// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolves configuration and opens the store once per CLI invocation,
//! shared by every subcommand that reads or mutates the queue.

use crate::exit_error::ExitError;
use klauss_core::config::CliOverrides;
use klauss_core::Config;
use klauss_queue::Queue;
use klauss_storage::Store;
use std::path::PathBuf;
use std::sync::Arc;

pub struct Context {
    pub config: Config,
    pub queue: Queue,
}

impl Context {
    pub fn build(db_path: Option<PathBuf>, project_root: Option<PathBuf>) -> Result<Self, ExitError> {
        let start_dir = project_root
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let config = Config::resolve(
            CliOverrides {
                db_path,
                project_root,
                ..Default::default()
            },
            &start_dir,
        )?;
        let store = Arc::new(Store::open(&config)?);
        let queue = Queue::new(store, config.clone());
        Ok(Context { config, queue })
    }
}
