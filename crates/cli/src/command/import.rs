// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hourlog import`: merge the history archive into the live log.

use crate::config::Config;
use crate::event_log::LogWriter;
use crate::replay::{import_history, ImportStats};

/// CLI arguments for `hourlog import`.
#[derive(Debug, Clone, clap::Args)]
pub struct ImportArgs {
    /// Log each imported event at debug level instead of info.
    #[arg(long)]
    pub quiet: bool,
}

/// Run the `hourlog import` subcommand.
pub async fn run(config: &Config, args: &ImportArgs) -> anyhow::Result<ImportStats> {
    let mut writer = LogWriter::from_config(config);
    let result = import_history(&mut writer, &config.history_path, !args.quiet).await;
    writer.close_active_file().await?;
    Ok(result?)
}
