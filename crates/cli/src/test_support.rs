// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test infrastructure: event builders, file fixtures, and assertion helpers.

use std::io::Write;
use std::path::Path;

use crate::event::Event;
use crate::record;

/// An event with the given `ts` (seconds) and `type`.
pub fn event_at(ts: f64, kind: &str) -> Event {
    Event::new().with("ts", ts).with("type", kind)
}

/// Write `lines` to `path`, one per line, creating parent directories.
pub fn write_lines(path: &Path, lines: &[&str]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}

/// Decode every record in `path`, skipping blank lines.
pub fn read_events(path: &Path) -> anyhow::Result<Vec<Event>> {
    let contents = std::fs::read_to_string(path)?;
    let mut events = Vec::new();
    for line in contents.lines() {
        if let Some(event) = record::decode(line)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Assert that an expression evaluates to `Err` whose Display output
/// contains the given substring.
#[macro_export]
macro_rules! assert_err_contains {
    ($expr:expr, $substr:expr) => {{
        let result = $expr;
        let err = result.expect_err(concat!("expected Err for: ", stringify!($expr)));
        let msg = err.to_string();
        assert!(msg.contains($substr), "expected error containing {:?}, got: {msg:?}", $substr);
    }};
}
