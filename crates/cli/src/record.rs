// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk record format: one JSON object per line.

use crate::error::LogError;
use crate::event::Event;

/// Serialize an event as a single newline-terminated record line.
///
/// JSON escaping guarantees the body contains no raw newlines.
pub fn encode(event: &Event) -> Result<String, LogError> {
    let mut line = serde_json::to_string(event).map_err(LogError::Encode)?;
    line.push('\n');
    Ok(line)
}

/// Parse one record line.
///
/// Blank and whitespace-only lines decode to `Ok(None)`. Any other line
/// must be a JSON object.
pub fn decode(line: &str) -> Result<Option<Event>, LogError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Event>(trimmed).map(Some).map_err(LogError::Decode)
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
