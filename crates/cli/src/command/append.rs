// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hourlog append`: log JSONL events from stdin.
//!
//! Each non-blank input line is one event. On shutdown the writer stops
//! accepting and the open bucket file is closed before returning.

use std::path::Path;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Config;
use crate::event_log::{LogOptions, LogWriter, WriteOutcome};
use crate::record;

/// CLI arguments for `hourlog append`.
#[derive(Debug, Clone, clap::Args)]
pub struct AppendArgs {
    /// Skip events whose `_history_id` is already logged in their hour.
    #[arg(long)]
    pub avoid_duplicates: bool,

    /// Log each event at debug level instead of info.
    #[arg(long)]
    pub quiet: bool,
}

/// Outcome counts for one `append` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AppendSummary {
    pub written: u64,
    pub duplicates: u64,
    pub rejected: u64,
    pub backpressure: u64,
}

impl AppendSummary {
    fn count(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written => self.written += 1,
            WriteOutcome::Duplicate => self.duplicates += 1,
            WriteOutcome::Rejected => self.rejected += 1,
            WriteOutcome::Backpressure => {
                self.written += 1;
                self.backpressure += 1;
            }
        }
    }
}

/// Run the `hourlog append` subcommand against stdin.
pub async fn run(
    config: &Config,
    args: &AppendArgs,
    shutdown: CancellationToken,
) -> anyhow::Result<AppendSummary> {
    let mut writer = LogWriter::from_config(config);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let result = append_from(&mut writer, stdin, options(args), shutdown).await;
    writer.close_active_file().await?;
    let summary = result?;
    info!(
        "append: {} written, {} duplicates, {} rejected",
        summary.written, summary.duplicates, summary.rejected
    );
    Ok(summary)
}

fn options(args: &AppendArgs) -> LogOptions {
    LogOptions { avoid_duplicates: args.avoid_duplicates, verbose: !args.quiet }
}

/// Log every event line from `input` until EOF or shutdown.
///
/// Backpressure is answered by draining the writer. Shutdown stops the
/// writer from accepting; the caller closes the active file.
pub async fn append_from<R>(
    writer: &mut LogWriter,
    input: R,
    options: LogOptions,
    shutdown: CancellationToken,
) -> anyhow::Result<AppendSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = AppendSummary::default();
    let mut lines = input.lines();
    let mut line_no: u64 = 0;
    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => {
                writer.stop_accepting();
                break;
            }
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };
        line_no += 1;
        let Some(event) = record::decode(&line).map_err(|e| e.at(Path::new("<stdin>"), line_no))?
        else {
            continue;
        };
        let outcome = writer.log_event(&event, options).await?;
        summary.count(outcome);
        if outcome == WriteOutcome::Backpressure {
            writer.drain().await?;
        }
    }
    Ok(summary)
}

#[cfg(test)]
#[path = "append_tests.rs"]
mod tests;
