// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use clap::Parser;

use super::Config;
use crate::command::Command;
use crate::event_log::DEFAULT_HIGH_WATER_MARK;

struct Dirs {
    _tmp: tempfile::TempDir,
    log: String,
    files: String,
    history: String,
}

fn dirs() -> anyhow::Result<Dirs> {
    let tmp = tempfile::tempdir()?;
    let log = tmp.path().join("log");
    let files = tmp.path().join("files");
    std::fs::create_dir(&log)?;
    std::fs::create_dir(&files)?;
    let show = |p: &Path| p.display().to_string();
    Ok(Dirs {
        log: show(&log),
        files: show(&files),
        history: show(&tmp.path().join("history")),
        _tmp: tmp,
    })
}

fn parse(dirs: &Dirs, extra: &[&str]) -> anyhow::Result<Config> {
    parse_with_token(dirs, "s3cret", extra)
}

fn parse_with_token(dirs: &Dirs, token: &str, extra: &[&str]) -> anyhow::Result<Config> {
    let mut args = vec![
        "hourlog",
        "--token",
        token,
        "--log-path",
        dirs.log.as_str(),
        "--file-storage-path",
        dirs.files.as_str(),
        "--history-path",
        dirs.history.as_str(),
    ];
    args.extend_from_slice(extra);
    Ok(Config::try_parse_from(args)?)
}

#[test]
fn valid_config_with_defaults() -> anyhow::Result<()> {
    let dirs = dirs()?;
    let config = parse(&dirs, &["replay"])?;
    config.validate()?;
    assert_eq!(config.token, "s3cret");
    assert_eq!(config.high_water_mark, DEFAULT_HIGH_WATER_MARK);
    assert_eq!(config.log_format, "json");
    assert_eq!(config.log_level, "info");
    assert!(matches!(config.command, Command::Replay(_)));
    Ok(())
}

#[test]
fn history_path_need_not_exist() -> anyhow::Result<()> {
    let dirs = dirs()?;
    let config = parse(&dirs, &["import"])?;
    assert!(!config.history_path.exists());
    config.validate()?;
    Ok(())
}

#[test]
fn append_flags() -> anyhow::Result<()> {
    let dirs = dirs()?;
    let config = parse(&dirs, &["append", "--avoid-duplicates", "--quiet"])?;
    match config.command {
        Command::Append(ref args) => {
            assert!(args.avoid_duplicates);
            assert!(args.quiet);
        }
        ref other => anyhow::bail!("expected append, got {other:?}"),
    }
    Ok(())
}

#[test]
fn missing_required_key_fails_to_parse() {
    let result = Config::try_parse_from(["hourlog", "--token", "t", "replay"]);
    assert!(result.is_err());
}

#[test]
fn missing_log_dir_is_rejected() -> anyhow::Result<()> {
    let mut dirs = dirs()?;
    dirs.log.push_str("-missing");
    let config = parse(&dirs, &["replay"])?;
    crate::assert_err_contains!(config.validate(), "--log-path");
    Ok(())
}

#[test]
fn storage_path_must_be_a_directory() -> anyhow::Result<()> {
    let mut dirs = dirs()?;
    let file = Path::new(&dirs.files).with_file_name("plain-file");
    std::fs::write(&file, "")?;
    dirs.files = file.display().to_string();
    let config = parse(&dirs, &["replay"])?;
    crate::assert_err_contains!(config.validate(), "--file-storage-path");
    Ok(())
}

#[yare::parameterized(
    blank_token  = { "  ", &["replay"], "--token" },
    zero_hwm     = { "t", &["--high-water-mark", "0", "replay"], "--high-water-mark" },
    bad_format   = { "t", &["--log-format", "xml", "replay"], "invalid log format" },
)]
fn invalid_config(token: &str, extra: &[&str], expected_substr: &str) -> anyhow::Result<()> {
    let dirs = dirs()?;
    let config = parse_with_token(&dirs, token, extra)?;
    crate::assert_err_contains!(config.validate(), expected_substr);
    Ok(())
}
