// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("failed to spawn `{label}`: {source}")]
    Spawn {
        label: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{label}` i/o error: {source}")]
    Io {
        label: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{label}` timed out after {timeout:?}")]
    TimedOut { label: String, timeout: Duration },
}
