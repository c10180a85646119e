// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Path collection: recursive discovery of regular files under a root

use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::{CuratorError, Result};

/// Options controlling path collection
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Files whose name or full path matches any of these patterns are not
    /// collected
    pub exclude: Vec<Pattern>,
}

impl CollectOptions {
    /// Build options from raw glob pattern strings
    pub fn from_patterns(patterns: &[String]) -> Result<Self> {
        let exclude = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    CuratorError::Config(format!("Invalid exclude pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { exclude })
    }

    fn is_excluded(&self, path: &Path) -> bool {
        // `*` in a glob does not cross separators, so patterns like `*.tmp`
        // are also tried against the bare file name
        self.exclude.iter().any(|p| {
            p.matches_path(path)
                || path
                    .file_name()
                    .map(|n| p.matches_path(Path::new(n)))
                    .unwrap_or(false)
        })
    }
}

/// Collect every regular file under `root`, in name order within each
/// directory.
///
/// Directories and symlinks are never emitted. A missing or non-directory
/// root aborts with `RootNotFound`; unreadable subtrees are skipped with a
/// warning so one bad directory does not lose the rest of the walk.
pub fn collect_file_paths(root: &Path, options: &CollectOptions) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CuratorError::RootNotFound(root.to_path_buf()));
    }

    // An unreadable root aborts; unreadable subtrees only skip
    if let Err(e) = std::fs::read_dir(root) {
        return Err(CuratorError::Access(format!("{}: {}", root.display(), e)));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name().follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if options.is_excluded(&path) {
            continue;
        }

        files.push(path);
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn collects_all_regular_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("a.txt"));
        fs::create_dir(root.join("nested")).unwrap();
        touch(&root.join("nested").join("b.txt"));
        fs::create_dir_all(root.join("nested").join("deeper")).unwrap();
        touch(&root.join("nested").join("deeper").join("c.txt"));

        let files = collect_file_paths(root, &CollectOptions::default()).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|p| p.is_file()));
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = collect_file_paths(Path::new("/no/such/root"), &CollectOptions::default())
            .unwrap_err();
        assert!(matches!(err, CuratorError::RootNotFound(_)));
    }

    #[test]
    fn directories_are_not_emitted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir(root.join("empty_dir")).unwrap();
        touch(&root.join("file.txt"));

        let files = collect_file_paths(root, &CollectOptions::default()).unwrap();
        assert_eq!(files, vec![root.join("file.txt")]);
    }

    #[test]
    fn order_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("zebra.txt"));
        touch(&root.join("apple.txt"));
        touch(&root.join("mango.txt"));

        let files = collect_file_paths(root, &CollectOptions::default()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["apple.txt", "mango.txt", "zebra.txt"]);
    }

    #[test]
    fn exclude_patterns_filter_matches() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("keep.txt"));
        touch(&root.join("skip.tmp"));

        let options = CollectOptions::from_patterns(&["*.tmp".to_string()]).unwrap();
        let files = collect_file_paths(root, &options).unwrap();
        assert_eq!(files, vec![root.join("keep.txt")]);
    }

    #[test]
    fn invalid_exclude_pattern_is_rejected() {
        let err = CollectOptions::from_patterns(&["[".to_string()]).unwrap_err();
        assert!(matches!(err, CuratorError::Config(_)));
    }
}
