// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved runtime configuration.
//!
//! Every binary in the workspace builds one [`Config`] value at startup by
//! merging, in precedence order, explicit CLI arguments, environment
//! variables, an optional project-root `klauss.toml`, and built-in
//! defaults — then logs the resolved values, since a store-path mismatch
//! between the orchestrator and its workers is the single most common
//! source of confusion in a multi-process deployment.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_DB_PATH: &str = "KLAUSS_DB_PATH";
pub const ENV_WORKERS: &str = "KLAUSS_WORKERS";
pub const ENV_AUTO_START_WORKERS: &str = "KLAUSS_AUTO_START_WORKERS";
pub const ENV_EXECUTOR_CMD: &str = "KLAUSS_EXECUTOR_CMD";
pub const ENV_EXECUTOR_TIMEOUT_SECS: &str = "KLAUSS_EXECUTOR_TIMEOUT_SECS";
pub const ENV_VERIFICATION_TIMEOUT_SECS: &str = "KLAUSS_VERIFICATION_TIMEOUT_SECS";

const CONFIG_FILE_NAME: &str = "klauss.toml";
const DEFAULT_DB_DIR: &str = ".klauss";

const DEFAULT_WORKER_COUNT: usize = 4;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;
const DEFAULT_HEARTBEAT_INTERVAL_SECS: u64 = 5;
const DEFAULT_EXECUTOR_TIMEOUT_SECS: u64 = 1800;
const DEFAULT_VERIFICATION_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// On-disk shape of `klauss.toml`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub safety: SafetySection,
    #[serde(default)]
    pub workers: WorkersSection,
    #[serde(default)]
    pub coordination: CoordinationSection,
    #[serde(default)]
    pub executor: ExecutorSection,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct DatabaseSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ProjectSection {
    pub name: Option<String>,
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SafetySection {
    pub allow_external_dirs: Option<bool>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct WorkersSection {
    pub default_count: Option<usize>,
    pub idle_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CoordinationSection {
    pub enabled: Option<bool>,
    pub shared_db: Option<bool>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ExecutorSection {
    pub command: Option<Vec<String>>,
    pub timeout_seconds: Option<u64>,
    pub verification_timeout_seconds: Option<u64>,
}

impl ConfigFile {
    /// Load `klauss.toml` from `dir`, returning `None` if it doesn't exist.
    pub fn load(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let parsed: ConfigFile =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?;
        Ok(Some(parsed))
    }
}

/// CLI-supplied overrides, highest precedence.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<PathBuf>,
    pub worker_count: Option<usize>,
    pub project_root: Option<PathBuf>,
    pub executor_command: Option<Vec<String>>,
}

/// Fully resolved configuration every component constructs once at
/// startup and passes down to its subsystems.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub project_root: PathBuf,
    pub project_name: String,
    pub allow_external_dirs: bool,
    pub default_worker_count: usize,
    pub idle_timeout_secs: u64,
    pub heartbeat_interval_secs: u64,
    pub coordination_enabled: bool,
    /// The executor CLI invocation, e.g. `["my-agent-cli", "--json"]`.
    /// `None` until an operator configures one; workers treat that as a
    /// `FatalConfiguration` error at startup.
    pub executor_command: Option<Vec<String>>,
    pub executor_timeout_secs: u64,
    pub verification_timeout_secs: u64,
}

impl Config {
    /// Stale-sweep threshold: 3 x heartbeat interval.
    pub fn stale_threshold_secs(&self) -> u64 {
        self.heartbeat_interval_secs * 3
    }

    /// Resolve configuration from (in precedence order) CLI args, env
    /// vars, the project-root config file, and built-in defaults.
    ///
    /// `start_dir` is where search for `klauss.toml` begins; the nearest
    /// ancestor directory containing it becomes the project root. If none
    /// is found, `start_dir` itself is the project root.
    pub fn resolve(cli: CliOverrides, start_dir: &Path) -> Result<Self, ConfigError> {
        let (project_root, file) = match &cli.project_root {
            Some(root) => (root.clone(), ConfigFile::load(root)?),
            None => find_config_file(start_dir)?,
        };
        let file = file.unwrap_or_default();

        let db_path = cli
            .db_path
            .or_else(|| std::env::var_os(ENV_DB_PATH).map(PathBuf::from))
            .or(file.database.path.clone())
            .unwrap_or_else(|| project_root.join(DEFAULT_DB_DIR));

        let default_worker_count = cli
            .worker_count
            .or_else(|| {
                std::env::var(ENV_WORKERS)
                    .ok()
                    .and_then(|v| v.parse().ok())
            })
            .or(file.workers.default_count)
            .unwrap_or(DEFAULT_WORKER_COUNT);

        let project_name = file
            .project
            .name
            .clone()
            .unwrap_or_else(|| project_root_name(&project_root));

        let executor_command = cli
            .executor_command
            .or_else(|| {
                std::env::var(ENV_EXECUTOR_CMD)
                    .ok()
                    .map(|v| v.split_whitespace().map(str::to_string).collect())
            })
            .or_else(|| file.executor.command.clone());

        let executor_timeout_secs = std::env::var(ENV_EXECUTOR_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.executor.timeout_seconds)
            .unwrap_or(DEFAULT_EXECUTOR_TIMEOUT_SECS);

        let verification_timeout_secs = std::env::var(ENV_VERIFICATION_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.executor.verification_timeout_seconds)
            .unwrap_or(DEFAULT_VERIFICATION_TIMEOUT_SECS);

        Ok(Config {
            db_path,
            project_root,
            project_name,
            allow_external_dirs: file.safety.allow_external_dirs.unwrap_or(false),
            default_worker_count,
            idle_timeout_secs: file
                .workers
                .idle_timeout_seconds
                .unwrap_or(DEFAULT_IDLE_TIMEOUT_SECS),
            heartbeat_interval_secs: DEFAULT_HEARTBEAT_INTERVAL_SECS,
            coordination_enabled: file.coordination.enabled.unwrap_or(true),
            executor_command,
            executor_timeout_secs,
            verification_timeout_secs,
        })
    }

    /// Log the resolved configuration. Called once by every binary at
    /// startup so store-path mismatches are immediately diagnosable.
    pub fn log_resolved(&self) {
        tracing::info!(
            db_path = %self.db_path.display(),
            project_root = %self.project_root.display(),
            project_name = %self.project_name,
            allow_external_dirs = self.allow_external_dirs,
            default_worker_count = self.default_worker_count,
            idle_timeout_secs = self.idle_timeout_secs,
            executor_command = ?self.executor_command,
            executor_timeout_secs = self.executor_timeout_secs,
            verification_timeout_secs = self.verification_timeout_secs,
            "resolved configuration"
        );
    }

    /// Reads `KLAUSS_AUTO_START_WORKERS`; `None` means unset (interactive
    /// prompting is appropriate), `Some(bool)` is an explicit override.
    pub fn auto_start_workers() -> Option<bool> {
        std::env::var(ENV_AUTO_START_WORKERS)
            .ok()
            .map(|v| v.eq_ignore_ascii_case("true"))
    }
}

fn project_root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "klauss".to_string())
}

/// Walk up from `start_dir` looking for `klauss.toml`.
fn find_config_file(start_dir: &Path) -> Result<(PathBuf, Option<ConfigFile>), ConfigError> {
    let mut dir = start_dir.to_path_buf();
    loop {
        if let Some(file) = ConfigFile::load(&dir)? {
            return Ok((dir, Some(file)));
        }
        match dir.parent() {
            Some(parent) => dir = parent.to_path_buf(),
            None => return Ok((start_dir.to_path_buf(), None)),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
