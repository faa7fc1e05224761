// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// User error: missing args, bad input, unknown id. Exit code 1.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(1, message)
    }

    /// Operational failure: store, I/O, subprocess errors. Exit code 2.
    pub fn operational(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<klauss_core::ConfigError> for ExitError {
    fn from(e: klauss_core::ConfigError) -> Self {
        ExitError::operational(e.to_string())
    }
}

impl From<klauss_storage::StoreError> for ExitError {
    fn from(e: klauss_storage::StoreError) -> Self {
        ExitError::operational(e.to_string())
    }
}

impl From<klauss_queue::QueueError> for ExitError {
    fn from(e: klauss_queue::QueueError) -> Self {
        ExitError::operational(e.to_string())
    }
}

impl From<klauss_orchestrator::OrchestratorError> for ExitError {
    fn from(e: klauss_orchestrator::OrchestratorError) -> Self {
        ExitError::operational(e.to_string())
    }
}

impl From<std::io::Error> for ExitError {
    fn from(e: std::io::Error) -> Self {
        ExitError::operational(e.to_string())
    }
}

impl From<serde_json::Error> for ExitError {
    fn from(e: serde_json::Error) -> Self {
        ExitError::operational(e.to_string())
    }
}
