// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hour-rotated append-only event log.
//!
//! Events are appended as JSONL to `<root>/<YYYY-MM>/<YYYY-MM-DD_HH>.log`,
//! where the hour comes from the event's own `ts`. At most one bucket file
//! is open at a time; an event for a different hour closes the current file
//! before the next one is opened.
//!
//! The writer has no internal locking. Callers that share it across tasks
//! must serialize access (e.g. `tokio::sync::Mutex<LogWriter>`), because a
//! rotation is a close followed by an open and must not interleave with
//! another write.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};

use crate::bucket::Bucket;
use crate::config::Config;
use crate::dedup::DuplicateIndex;
use crate::error::LogError;
use crate::event::Event;
use crate::record;

/// Default buffered-bytes threshold that triggers [`WriteOutcome::Backpressure`].
pub const DEFAULT_HIGH_WATER_MARK: usize = 16 * 1024;

/// Per-call write options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOptions {
    /// Suppress events whose `_history_id` was already logged in their bucket.
    pub avoid_duplicates: bool,
    /// Report each logged event at info level rather than debug.
    pub verbose: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self { avoid_duplicates: false, verbose: true }
    }
}

/// Non-error result of [`LogWriter::log_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record was appended.
    Written,
    /// The event's history id was already logged in this bucket; nothing written.
    Duplicate,
    /// The writer has stopped accepting events; nothing touched.
    Rejected,
    /// The record was appended but the write buffer is at or past the
    /// high-water mark. Callers should [`LogWriter::drain`] before writing more.
    Backpressure,
}

impl WriteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::Duplicate => "duplicate",
            Self::Rejected => "rejected",
            Self::Backpressure => "backpressure",
        }
    }

    /// Whether the event's record reached the log (possibly still buffered).
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Written | Self::Backpressure)
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct ActiveFile {
    bucket: Bucket,
    path: PathBuf,
    writer: BufWriter<File>,
}

/// Owner of the currently open bucket file and the duplicate index.
pub struct LogWriter {
    root: PathBuf,
    high_water_mark: usize,
    accepting: AtomicBool,
    active: Option<ActiveFile>,
    seen: DuplicateIndex,
}

impl LogWriter {
    /// Create a writer rooted at `root`. Nothing is opened until the first event.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            high_water_mark: DEFAULT_HIGH_WATER_MARK,
            accepting: AtomicBool::new(true),
            active: None,
            seen: DuplicateIndex::new(),
        }
    }

    /// Writer rooted at the configured log path.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.log_path).with_high_water_mark(config.high_water_mark)
    }

    pub fn with_high_water_mark(mut self, bytes: usize) -> Self {
        self.high_water_mark = bytes.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `log_event` currently accepts events.
    pub fn is_accepting(&self) -> bool {
        self.accepting.load(Ordering::Acquire)
    }

    /// Reject all subsequent events. The open file is left as is; call
    /// [`Self::close_active_file`] to close it.
    pub fn stop_accepting(&self) {
        if self.accepting.swap(false, Ordering::AcqRel) {
            info!("event log stopped accepting writes");
        }
    }

    /// Bucket of the open file, if any.
    pub fn active_bucket(&self) -> Option<&Bucket> {
        self.active.as_ref().map(|a| &a.bucket)
    }

    /// Raw handle to the open bucket file, for callers that need the stream.
    pub fn active_file(&mut self) -> Option<&mut BufWriter<File>> {
        self.active.as_mut().map(|a| &mut a.writer)
    }

    /// Append an event to its hour bucket, rotating files as needed.
    pub async fn log_event(
        &mut self,
        event: &Event,
        options: LogOptions,
    ) -> Result<WriteOutcome, LogError> {
        if !self.is_accepting() {
            debug!("event log: rejected {}", describe(event));
            return Ok(WriteOutcome::Rejected);
        }

        let bucket = Bucket::of(event.ts());
        if self.active.as_ref().is_some_and(|a| a.bucket != bucket) {
            self.close_active_file().await?;
        }
        let active = match self.active.take() {
            Some(active) => active,
            None => self.open_bucket(bucket, options).await?,
        };
        let active = self.active.insert(active);

        let history_id = event.history_id().filter(|_| options.avoid_duplicates);
        if let Some(id) = history_id {
            if self.seen.contains(&active.bucket, id) {
                debug!("event log: duplicate {id} in {}", active.bucket);
                return Ok(WriteOutcome::Duplicate);
            }
        }

        let line = record::encode(event)?;
        active
            .writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| LogError::io(&active.path, e))?;
        if let Some(id) = history_id {
            self.seen.mark(&active.bucket, id);
        }

        if options.verbose {
            info!("logged {} to {}", describe(event), active.bucket);
        } else {
            debug!("logged {} to {}", describe(event), active.bucket);
        }

        if active.writer.buffer().len() >= self.high_water_mark {
            return Ok(WriteOutcome::Backpressure);
        }
        Ok(WriteOutcome::Written)
    }

    /// Flush buffered records of the open file. No-op when nothing is open.
    pub async fn drain(&mut self) -> Result<(), LogError> {
        let Some(ref mut active) = self.active else {
            return Ok(());
        };
        active.writer.flush().await.map_err(|e| LogError::io(&active.path, e))
    }

    /// Flush and close the open bucket file, if any, and clear the writer state.
    pub async fn close_active_file(&mut self) -> Result<(), LogError> {
        let Some(mut active) = self.active.take() else {
            return Ok(());
        };
        active.writer.shutdown().await.map_err(|e| LogError::io(&active.path, e))?;
        debug!("event log: closed {}", active.path.display());
        Ok(())
    }

    async fn open_bucket(
        &mut self,
        bucket: Bucket,
        options: LogOptions,
    ) -> Result<ActiveFile, LogError> {
        let dir = bucket.dir(&self.root);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| LogError::CreateDir { path: dir.clone(), source })?;

        let path = bucket.file_path(&self.root);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| LogError::io(&path, e))?;

        if options.avoid_duplicates {
            self.seen.hydrate(&bucket, &path).await;
        }

        info!("event log: opened {}", path.display());
        let capacity = self.high_water_mark.saturating_mul(2);
        Ok(ActiveFile { bucket, path, writer: BufWriter::with_capacity(capacity, file) })
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        if let Some(ref active) = self.active {
            let pending = active.writer.buffer().len();
            if pending > 0 {
                warn!(
                    "event log dropped with {pending} unflushed bytes for {}",
                    active.path.display()
                );
            }
        }
    }
}

impl fmt::Debug for LogWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogWriter")
            .field("root", &self.root)
            .field("accepting", &self.is_accepting())
            .field("active", &self.active_bucket())
            .finish()
    }
}

fn describe(event: &Event) -> String {
    match (event.kind(), event.subtype()) {
        (Some(kind), Some(subtype)) => format!("{kind}/{subtype}"),
        (Some(kind), None) => kind.to_owned(),
        _ => "event".to_owned(),
    }
}

#[cfg(test)]
#[path = "event_log_tests.rs"]
mod tests;
