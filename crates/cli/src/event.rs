// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque event records.
//!
//! An event is a free-form JSON object. The log engine reads four fields
//! (`ts`, `type`, `subtype`, `_history_id`) and carries everything else
//! through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the event timestamp (seconds since the Unix epoch).
pub const TS_FIELD: &str = "ts";
/// Field holding the event type.
pub const TYPE_FIELD: &str = "type";
/// Field holding the optional event subtype.
pub const SUBTYPE_FIELD: &str = "subtype";
/// Idempotency key consulted by duplicate suppression.
pub const HISTORY_ID_FIELD: &str = "_history_id";

/// A single timestamped event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(Map<String, Value>);

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value. Returns `None` unless the value is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Event timestamp in fractional seconds.
    ///
    /// Accepts a JSON number or a numeric string (`"1700000000.000100"`).
    /// Anything else, including a missing field, reads as `None`.
    pub fn ts(&self) -> Option<f64> {
        match self.0.get(TS_FIELD)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<&str> {
        self.str_field(TYPE_FIELD)
    }

    pub fn subtype(&self) -> Option<&str> {
        self.str_field(SUBTYPE_FIELD)
    }

    pub fn history_id(&self) -> Option<&str> {
        self.str_field(HISTORY_ID_FIELD)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Event {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
