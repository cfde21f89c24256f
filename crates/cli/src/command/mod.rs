// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI subcommands: `append`, `import`, `replay`.

pub mod append;
pub mod import;
pub mod replay;

/// Subcommand selected on the command line.
#[derive(Debug, Clone, clap::Subcommand)]
pub enum Command {
    /// Log JSONL events read from stdin into the hour-rotated log.
    Append(append::AppendArgs),
    /// Copy the history archive into the live log, skipping known records.
    Import(import::ImportArgs),
    /// Write every record from history and the live log to stdout, in order.
    Replay(replay::ReplayArgs),
}
