// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hourlog replay`: stream the merged history to stdout as JSONL.

use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::record;
use crate::replay::{ReplayStats, Replayer};

/// CLI arguments for `hourlog replay`.
#[derive(Debug, Clone, clap::Args)]
pub struct ReplayArgs {}

/// Run the `hourlog replay` subcommand.
pub async fn run(config: &Config, _args: &ReplayArgs) -> anyhow::Result<ReplayStats> {
    let stdout = Arc::new(Mutex::new(tokio::io::stdout()));
    replay_to(&Replayer::from_config(config), Arc::clone(&stdout)).await
}

/// Replay every record into `out`, one JSON line per record.
pub async fn replay_to<W>(replayer: &Replayer, out: Arc<Mutex<W>>) -> anyhow::Result<ReplayStats>
where
    W: AsyncWrite + Unpin,
{
    let stats = replayer
        .replay(|event| {
            let out = Arc::clone(&out);
            async move {
                let line = record::encode(&event)?;
                out.lock().await.write_all(line.as_bytes()).await?;
                Ok(())
            }
        })
        .await?;
    out.lock().await.flush().await?;
    Ok(stats)
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
