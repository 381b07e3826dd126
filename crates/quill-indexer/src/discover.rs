//! Discovery of table files under a directory

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// File patterns recognised as table files.
pub const TABLE_PATTERNS: &[&str] = &["*.toml", "*.json", "*.yaml", "*.yml"];

fn table_globs() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in TABLE_PATTERNS {
        builder.add(Glob::new(pattern).with_context(|| format!("invalid table pattern {pattern}"))?);
    }
    Ok(builder.build()?)
}

/// Find table files below `dir`, honouring ignore files and skipping hidden
/// entries. The result is sorted so insertion order does not depend on the
/// filesystem.
pub fn discover_tables(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("table directory {} does not exist", dir.display());
    }

    let globs = table_globs()?;
    let mut found = Vec::new();

    for entry in WalkBuilder::new(dir).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Cannot read entry under {}: {}", dir.display(), e);
                continue;
            }
        };

        let is_file = entry.file_type().is_some_and(|t| t.is_file());
        if is_file && globs.is_match(entry.path()) {
            found.push(entry.into_path());
        }
    }

    found.sort();
    tracing::debug!("Discovered {} table files in {}", found.len(), dir.display());
    Ok(found)
}
