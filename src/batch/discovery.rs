// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Input file discovery

use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List files directly inside `dir` whose name ends in `.<extension>`.
///
/// Not recursive. The result is sorted so partitioning is deterministic.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{}", extension);
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .map(|name| name.ends_with(&suffix))
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.stl", "a.stl", "c.ply", "notes.txt", "d.stl.bak"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("e.stl"), b"").unwrap();
        fs::create_dir(dir.path().join("dir.stl")).unwrap();

        let files = discover_files(dir.path(), "stl").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.stl", "b.stl"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        assert!(discover_files(&dir.path().join("absent"), "stl").is_err());
    }
}
