// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::command::Command;
use crate::event_log::DEFAULT_HIGH_WATER_MARK;

/// Hour-rotated event log with chronological replay.
#[derive(Debug, Clone, Parser)]
#[command(name = "hourlog", version, about)]
pub struct Config {
    /// Shared secret for event producers.
    #[arg(long, env = "HOURLOG_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Root of the live, hour-rotated log (must exist).
    #[arg(long, env = "HOURLOG_LOG_PATH")]
    pub log_path: PathBuf,

    /// Directory for stored attachments (must exist).
    #[arg(long, env = "HOURLOG_FILE_STORAGE_PATH")]
    pub file_storage_path: PathBuf,

    /// Root of the archival history log.
    #[arg(long, env = "HOURLOG_HISTORY_PATH")]
    pub history_path: PathBuf,

    /// Buffered bytes at which writes report backpressure.
    #[arg(long, env = "HOURLOG_HIGH_WATER_MARK", default_value_t = DEFAULT_HIGH_WATER_MARK)]
    pub high_water_mark: usize,

    /// Log format (json or text).
    #[arg(long, env = "HOURLOG_LOG_FORMAT", default_value = "json")]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "HOURLOG_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Validate the configuration after parsing.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.token.trim().is_empty() {
            anyhow::bail!("--token must not be empty");
        }
        require_dir("--log-path", &self.log_path)?;
        require_dir("--file-storage-path", &self.file_storage_path)?;
        if self.high_water_mark == 0 {
            anyhow::bail!("--high-water-mark must be greater than zero");
        }
        match self.log_format.as_str() {
            "json" | "text" => {}
            other => anyhow::bail!("invalid log format: {other}"),
        }
        Ok(())
    }
}

fn require_dir(flag: &str, path: &Path) -> anyhow::Result<()> {
    if !path.is_dir() {
        anyhow::bail!("{flag} {} is not an existing directory", path.display());
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
