// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use crate::error::LogError;

/// Recursively list every regular file under `root`.
///
/// Directories are traversed, not yielded. Symlinks are yielded when they
/// resolve to a regular file and are never traversed. Returned paths are
/// absolute and keep `root` as given, even when `root` itself is a symlink.
/// Their order is unspecified. A root that does not exist lists as empty.
pub async fn list_files(root: &Path) -> Result<Vec<PathBuf>, LogError> {
    let root = std::path::absolute(root).map_err(|e| LogError::io(root, e))?;
    match tokio::fs::metadata(&root).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("walk: {} does not exist", root.display());
            return Ok(vec![]);
        }
        Err(e) => return Err(LogError::io(&root, e)),
    }

    let mut files = Vec::new();
    let mut pending = vec![root];
    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| LogError::io(&dir, e))?;
        while let Some(entry) = entries.next_entry().await.map_err(|e| LogError::io(&dir, e))? {
            let path = entry.path();
            let file_type = entry.file_type().await.map_err(|e| LogError::io(&path, e))?;
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() {
                files.push(path);
            } else if file_type.is_symlink() {
                match tokio::fs::metadata(&path).await {
                    Ok(meta) if meta.is_file() => files.push(path),
                    Ok(_) => {}
                    Err(e) => tracing::debug!("walk: skipping {}: {e}", path.display()),
                }
            }
        }
    }
    Ok(files)
}

/// Sort `paths` by their full path text, byte by byte.
///
/// `PathBuf`'s own ordering compares component by component, which puts
/// `log/...` before `log-history/...`.
pub fn sort_by_full_path(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.as_os_str().as_encoded_bytes().cmp(b.as_os_str().as_encoded_bytes()));
}

#[cfg(test)]
#[path = "walk_tests.rs"]
mod tests;
