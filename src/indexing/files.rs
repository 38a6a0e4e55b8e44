//! Manuscript file collection
//!
//! Finds every `.tex` file below the manuscript root. Hidden and git-ignored
//! files are part of the manuscript too, so the walker's standard filters
//! are turned off.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::error::Result;

/// Compile exclude patterns, relative to the manuscript root
pub fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Collect `.tex` files under `root`, as paths relative to `root`, minus
/// those matching any exclude pattern. Sorted by path.
pub fn collect_tex_files(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let excluded = build_exclude_set(exclude)?;
    let mut files = Vec::new();

    for entry in WalkBuilder::new(root).standard_filters(false).build() {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_some_and(|t| t.is_file()) || !is_tex_file(path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        if excluded.is_match(&relative) {
            continue;
        }
        files.push(relative);
    }

    files.sort();
    Ok(files)
}

fn is_tex_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("tex")
}
