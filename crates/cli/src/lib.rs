// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod bucket;
pub mod command;
pub mod config;
pub mod dedup;
pub mod error;
pub mod event;
pub mod event_log;
pub mod record;
pub mod replay;
pub mod test_support;
pub mod walk;
