// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-bucket duplicate suppression keyed by `_history_id`.
//!
//! The index is never persisted separately. It is rebuilt from a bucket's
//! own log file the first time the bucket is opened with duplicate
//! suppression requested, then kept for the life of the writer.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::bucket::Bucket;
use crate::record;

/// Outcome of scanning a bucket file for history ids.
///
/// Hydration has no error path: unreadable files and malformed lines
/// degrade to "no known duplicates" for the affected records.
#[derive(Debug, Default)]
pub struct Hydration {
    pub ids: HashSet<String>,
    /// Non-blank lines that did not decode.
    pub skipped_lines: u64,
    /// The file existed but could not be fully read.
    pub unreadable: bool,
}

/// Collect every `_history_id` recorded in `path`.
///
/// A missing file yields an empty set.
pub async fn hydrate(path: &Path) -> Hydration {
    let mut hydration = Hydration::default();
    let file = match tokio::fs::File::open(path).await {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return hydration,
        Err(e) => {
            tracing::warn!("dedup: cannot read {}: {e}", path.display());
            hydration.unreadable = true;
            return hydration;
        }
    };

    let mut segments = BufReader::new(file).split(b'\n');
    loop {
        let segment = match segments.next_segment().await {
            Ok(Some(s)) => s,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("dedup: read of {} stopped early: {e}", path.display());
                hydration.unreadable = true;
                break;
            }
        };
        let Ok(line) = std::str::from_utf8(&segment) else {
            hydration.skipped_lines += 1;
            continue;
        };
        match record::decode(line) {
            Ok(Some(event)) => {
                if let Some(id) = event.history_id() {
                    hydration.ids.insert(id.to_owned());
                }
            }
            Ok(None) => {}
            Err(_) => hydration.skipped_lines += 1,
        }
    }

    if hydration.skipped_lines > 0 {
        tracing::debug!(
            "dedup: skipped {} undecodable lines in {}",
            hydration.skipped_lines,
            path.display()
        );
    }
    hydration
}

/// Hydrated history-id sets, one per bucket.
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    buckets: HashMap<Bucket, HashSet<String>>,
}

impl DuplicateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hydrated(&self, bucket: &Bucket) -> bool {
        self.buckets.contains_key(bucket)
    }

    /// Hydrate `bucket` from its log file unless already hydrated.
    pub async fn hydrate(&mut self, bucket: &Bucket, path: &Path) {
        if self.is_hydrated(bucket) {
            return;
        }
        let hydration = hydrate(path).await;
        tracing::debug!(
            "dedup: {bucket} hydrated with {} ids ({} lines skipped, unreadable: {})",
            hydration.ids.len(),
            hydration.skipped_lines,
            hydration.unreadable
        );
        self.buckets.insert(bucket.clone(), hydration.ids);
    }

    /// Whether `id` was seen in `bucket`. Always false for unhydrated buckets.
    pub fn contains(&self, bucket: &Bucket, id: &str) -> bool {
        self.buckets.get(bucket).is_some_and(|ids| ids.contains(id))
    }

    /// Record `id` as seen in `bucket`. No-op for unhydrated buckets.
    ///
    /// Returns true if the id was newly recorded.
    pub fn mark(&mut self, bucket: &Bucket, id: &str) -> bool {
        match self.buckets.get_mut(bucket) {
            Some(ids) => ids.insert(id.to_owned()),
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod tests;
