// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use super::{list_files, sort_by_full_path};

#[tokio::test]
async fn lists_nested_regular_files_only() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let root = tmp.path();
    std::fs::create_dir_all(root.join("2024-01"))?;
    std::fs::create_dir_all(root.join("2024-02/deeper"))?;
    std::fs::create_dir_all(root.join("empty"))?;
    std::fs::write(root.join("2024-01/2024-01-01_00.log"), "")?;
    std::fs::write(root.join("2024-02/2024-02-01_00.log"), "")?;
    std::fs::write(root.join("2024-02/deeper/stray.log"), "")?;
    std::fs::write(root.join("top.log"), "")?;

    let mut files = list_files(root).await?;
    files.sort();
    assert_eq!(
        files,
        vec![
            root.join("2024-01/2024-01-01_00.log"),
            root.join("2024-02/2024-02-01_00.log"),
            root.join("2024-02/deeper/stray.log"),
            root.join("top.log"),
        ]
    );
    assert!(files.iter().all(|p| p.is_absolute()));
    Ok(())
}

#[tokio::test]
async fn missing_root_lists_empty() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    assert!(list_files(&tmp.path().join("nope")).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_root_lists_empty() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    assert!(list_files(tmp.path()).await?.is_empty());
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn symlinks_to_files_are_listed_but_dirs_are_not_followed() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let outside = tempfile::tempdir()?;
    std::fs::write(outside.path().join("real.log"), "")?;
    std::os::unix::fs::symlink(outside.path().join("real.log"), tmp.path().join("link.log"))?;
    std::os::unix::fs::symlink(outside.path(), tmp.path().join("linked-dir"))?;

    let files = list_files(tmp.path()).await?;
    let names: Vec<_> =
        files.iter().filter_map(|p| p.file_name()).filter_map(|n| n.to_str()).collect();
    assert_eq!(names, vec!["link.log"]);
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn symlinked_root_keeps_its_own_path() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let target = tmp.path().join("archive");
    std::fs::create_dir_all(target.join("2023-12"))?;
    std::fs::write(target.join("2023-12/2023-12-31_23.log"), "")?;
    let root = tmp.path().join("history");
    std::os::unix::fs::symlink(&target, &root)?;

    let files = list_files(&root).await?;
    assert_eq!(files, vec![root.join("2023-12/2023-12-31_23.log")]);
    Ok(())
}

#[test]
fn full_path_sort_compares_text_not_components() {
    let mut paths = vec![
        PathBuf::from("/data/log/2024-01/2024-01-01_00.log"),
        PathBuf::from("/data/log.old/2023-12/2023-12-31_23.log"),
        PathBuf::from("/data/log-history/2023-11/2023-11-30_23.log"),
    ];
    sort_by_full_path(&mut paths);
    assert_eq!(
        paths,
        vec![
            PathBuf::from("/data/log-history/2023-11/2023-11-30_23.log"),
            PathBuf::from("/data/log.old/2023-12/2023-12-31_23.log"),
            PathBuf::from("/data/log/2024-01/2024-01-01_00.log"),
        ]
    );
}
