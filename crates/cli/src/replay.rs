// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chronological replay across the live log and the history archive.
//!
//! Both roots are enumerated up front, the combined file list is sorted by
//! full path, and every record is handed to the consumer one at a time. The
//! consumer is awaited before the next line is decoded, so delivery order is
//! exactly file order then line order.
//!
//! Path order is only chronological when every file follows the
//! `<YYYY-MM>/<YYYY-MM-DD_HH>.log` layout. Files that don't are still
//! replayed in path order, with a warning.

use std::future::Future;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, info, warn};

use crate::bucket::Bucket;
use crate::config::Config;
use crate::error::LogError;
use crate::event::Event;
use crate::event_log::{LogOptions, LogWriter, WriteOutcome};
use crate::record;
use crate::walk;

/// Counters for a completed replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub files: usize,
    pub records: u64,
    pub blank_lines: u64,
}

/// Replays the live log root merged with the history root.
#[derive(Debug, Clone)]
pub struct Replayer {
    log_root: PathBuf,
    history_root: PathBuf,
}

impl Replayer {
    pub fn new(log_root: impl Into<PathBuf>, history_root: impl Into<PathBuf>) -> Self {
        Self { log_root: log_root.into(), history_root: history_root.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.log_path, &config.history_path)
    }

    /// The sorted union of every file under both roots.
    ///
    /// Both roots are fully enumerated before this returns.
    pub async fn files(&self) -> Result<Vec<PathBuf>, LogError> {
        let mut files = walk::list_files(&self.log_root).await?;
        files.extend(walk::list_files(&self.history_root).await?);
        walk::sort_by_full_path(&mut files);
        for path in files.iter().filter(|p| Bucket::from_path(p).is_none()) {
            warn!(
                "replay: {} breaks the YYYY-MM/YYYY-MM-DD_HH.log layout; order may not be chronological",
                path.display()
            );
        }
        Ok(files)
    }

    /// Feed every record from both roots to `consumer`, in order.
    pub async fn replay<F, Fut>(&self, consumer: F) -> Result<ReplayStats, LogError>
    where
        F: FnMut(Event) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        let files = self.files().await?;
        let stats = replay_files(&files, consumer).await?;
        info!(
            "replay: {} records from {} files ({} blank lines)",
            stats.records, stats.files, stats.blank_lines
        );
        Ok(stats)
    }
}

/// Feed every record of `files` to `consumer`, files in slice order and
/// lines in on-disk order.
///
/// The first malformed line or consumer error aborts the whole replay.
pub async fn replay_files<F, Fut>(
    files: &[PathBuf],
    mut consumer: F,
) -> Result<ReplayStats, LogError>
where
    F: FnMut(Event) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let mut stats = ReplayStats::default();
    for path in files {
        let mut reader = RecordReader::open(path).await?;
        while let Some(event) = reader.next_record().await? {
            consumer(event).await.map_err(|cause| LogError::Consumer {
                path: path.clone(),
                line: reader.line(),
                cause,
            })?;
            stats.records += 1;
        }
        stats.blank_lines += reader.blank_lines();
        stats.files += 1;
    }
    Ok(stats)
}

/// Sequential reader over the records of one file.
///
/// Holds a single buffered line at a time.
pub struct RecordReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line: u64,
    blank_lines: u64,
}

impl RecordReader {
    pub async fn open(path: &Path) -> Result<Self, LogError> {
        debug!("replay: reading {}", path.display());
        let file = File::open(path).await.map_err(|e| LogError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line: 0,
            blank_lines: 0,
        })
    }

    /// Next record, skipping blank lines. `None` at end of file.
    pub async fn next_record(&mut self) -> Result<Option<Event>, LogError> {
        while let Some(line) =
            self.lines.next_line().await.map_err(|e| LogError::io(&self.path, e))?
        {
            self.line += 1;
            match record::decode(&line).map_err(|e| e.at(&self.path, self.line))? {
                Some(event) => return Ok(Some(event)),
                None => self.blank_lines += 1,
            }
        }
        Ok(None)
    }

    /// 1-based number of the line last read.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn blank_lines(&self) -> u64 {
        self.blank_lines
    }
}

/// Counters for a completed history import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub files: usize,
    pub written: u64,
    pub duplicates: u64,
    pub rejected: u64,
}

/// Copy every record under `history_root` into the live log, skipping
/// records whose `_history_id` is already in their live bucket.
///
/// Files are imported in sorted path order. Backpressure is answered by
/// draining the writer before the next record.
pub async fn import_history(
    writer: &mut LogWriter,
    history_root: &Path,
    verbose: bool,
) -> Result<ImportStats, LogError> {
    let mut files = walk::list_files(history_root).await?;
    walk::sort_by_full_path(&mut files);

    let options = LogOptions { avoid_duplicates: true, verbose };
    let mut stats = ImportStats { files: files.len(), ..ImportStats::default() };
    for path in &files {
        let mut reader = RecordReader::open(path).await?;
        while let Some(event) = reader.next_record().await? {
            match writer.log_event(&event, options).await? {
                WriteOutcome::Written => stats.written += 1,
                WriteOutcome::Backpressure => {
                    stats.written += 1;
                    writer.drain().await?;
                }
                WriteOutcome::Duplicate => stats.duplicates += 1,
                WriteOutcome::Rejected => stats.rejected += 1,
            }
        }
    }
    info!(
        "import: {} written, {} duplicates, {} rejected from {} files",
        stats.written, stats.duplicates, stats.rejected, stats.files
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
