// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hour buckets: mapping event timestamps to rotated log files.
//!
//! Every UTC hour owns one file at `<root>/<YYYY-MM>/<YYYY-MM-DD_HH>.log`.
//! Both components sort lexicographically in time order, which is what
//! replay relies on.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

/// Extension of bucket files.
pub const LOG_EXTENSION: &str = "log";

const HOUR_FORMAT: &str = "%Y-%m-%d_%H";
const MONTH_FORMAT: &str = "%Y-%m";

/// A UTC hour bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bucket {
    hour: String,
    month: String,
}

impl Bucket {
    /// Bucket containing the given instant.
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            hour: time.format(HOUR_FORMAT).to_string(),
            month: time.format(MONTH_FORMAT).to_string(),
        }
    }

    /// Bucket for an event timestamp in seconds. `None` means now.
    ///
    /// Timestamps that are not finite or fall outside years 0000..=9999
    /// are treated as absent.
    pub fn of(ts: Option<f64>) -> Self {
        Self::at(ts.and_then(from_epoch_seconds).unwrap_or_else(Utc::now))
    }

    /// Recover the bucket from a conventional `<YYYY-MM>/<YYYY-MM-DD_HH>.log`
    /// path. Returns `None` if either component breaks the convention.
    pub fn from_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        if path.extension()?.to_str()? != LOG_EXTENSION {
            return None;
        }
        let month_dir = path.parent()?.file_name()?.to_str()?;
        let time = NaiveDateTime::parse_from_str(&format!("{stem}:00"), "%Y-%m-%d_%H:%M").ok()?;
        let bucket = Self::at(time.and_utc());
        // Reject non-canonical spellings such as single-digit hours.
        (bucket.hour == stem && bucket.month == month_dir).then_some(bucket)
    }

    /// `YYYY-MM-DD_HH`
    pub fn hour_key(&self) -> &str {
        &self.hour
    }

    /// `YYYY-MM`
    pub fn month_key(&self) -> &str {
        &self.month
    }

    /// Month directory under `root`.
    pub fn dir(&self, root: &Path) -> PathBuf {
        root.join(&self.month)
    }

    /// Bucket file under `root`.
    pub fn file_path(&self, root: &Path) -> PathBuf {
        self.dir(root).join(format!("{}.{LOG_EXTENSION}", self.hour))
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hour)
    }
}

fn from_epoch_seconds(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let secs = ts.floor();
    // f64 -> i64 saturates; the year check below rejects anything absurd.
    let nanos = ((ts - secs) * 1e9).clamp(0.0, 999_999_999.0) as u32;
    let time = DateTime::from_timestamp(secs as i64, nanos)?;
    (0..=9999).contains(&time.year()).then_some(time)
}

#[cfg(test)]
#[path = "bucket_tests.rs"]
mod tests;
