// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::Event;

#[yare::parameterized(
    integer        = { json!({"ts": 1_700_000_000}), Some(1_700_000_000.0) },
    fractional     = { json!({"ts": 1_700_000_000.5}), Some(1_700_000_000.5) },
    numeric_string = { json!({"ts": "1700000000.000100"}), Some(1_700_000_000.0001) },
    padded_string  = { json!({"ts": " 42 "}), Some(42.0) },
    garbage_string = { json!({"ts": "yesterday"}), None },
    boolean        = { json!({"ts": true}), None },
    missing        = { json!({"type": "message"}), None },
)]
fn ts_parsing(value: serde_json::Value, expected: Option<f64>) {
    let event = Event::from_value(value);
    assert_eq!(event.and_then(|e| e.ts()), expected);
}

#[test]
fn known_fields() -> anyhow::Result<()> {
    let event = Event::from_value(json!({
        "type": "message",
        "subtype": "bot_message",
        "_history_id": "C01:1700000000.000100",
        "text": "hi",
    }))
    .ok_or_else(|| anyhow::anyhow!("object expected"))?;

    assert_eq!(event.kind(), Some("message"));
    assert_eq!(event.subtype(), Some("bot_message"));
    assert_eq!(event.history_id(), Some("C01:1700000000.000100"));
    assert_eq!(event.get("text"), Some(&json!("hi")));
    Ok(())
}

#[test]
fn non_string_history_id_is_ignored() {
    let event = Event::new().with("_history_id", 12);
    assert_eq!(event.history_id(), None);
}

#[test]
fn from_value_rejects_non_objects() {
    assert!(Event::from_value(json!([1, 2])).is_none());
    assert!(Event::from_value(json!("text")).is_none());
    assert!(Event::from_value(json!(null)).is_none());
}

#[test]
fn with_and_insert_overwrite() {
    let mut event = Event::new().with("type", "a");
    let prev = event.insert("type", "b");
    assert_eq!(prev, Some(json!("a")));
    assert_eq!(event.kind(), Some("b"));
    assert_eq!(event.into_value(), json!({"type": "b"}));
}
