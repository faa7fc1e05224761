// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level argument parsing.

use crate::commands::Command;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "klauss", about = "Manage a klauss task queue and worker pool", styles = crate::color::styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Override the resolved store path.
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    /// Override the project root used to locate `klauss.toml`.
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,

    /// Emit machine-readable JSON instead of text tables.
    #[arg(long, global = true)]
    pub json: bool,
}
