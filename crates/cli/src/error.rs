// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures raised by the write and replay paths.
///
/// The soft write conditions (rejected, duplicate, backpressure) are not
/// errors; see [`crate::event_log::WriteOutcome`].
#[derive(Debug, Error)]
pub enum LogError {
    /// The event could not be serialized to a single record line.
    #[error("failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),

    /// A non-blank line is not a valid record.
    #[error("malformed record: {0}")]
    Decode(#[source] serde_json::Error),

    /// A non-blank line in a replayed file is not a valid record.
    #[error("malformed record at {}:{line}: {source}", path.display())]
    DecodeAt { path: PathBuf, line: u64, source: serde_json::Error },

    /// A bucket's month directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: std::io::Error },

    /// Open, append, flush, read, or enumeration failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    /// The replay consumer returned an error, aborting the replay.
    #[error("consumer aborted replay at {}:{line}: {cause:#}", path.display())]
    Consumer { path: PathBuf, line: u64, cause: anyhow::Error },
}

impl LogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Attach a file location to a bare [`LogError::Decode`].
    ///
    /// Other variants are returned unchanged.
    pub fn at(self, path: &Path, line: u64) -> Self {
        match self {
            Self::Decode(source) => Self::DecodeAt { path: path.to_path_buf(), line, source },
            other => other,
        }
    }

    /// True for either decode variant.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::DecodeAt { .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
