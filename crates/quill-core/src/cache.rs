//! Snapshot cache for the built index

use crate::model::{KeyError, SymbolKind};
use crate::tree::SymbolTree;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cache directory: .quill/
pub const CACHE_DIR: &str = ".quill";

/// Index snapshot file
pub const INDEX_CACHE: &str = "index.json";

/// Get cache directory path
pub fn cache_dir(root: &Path) -> PathBuf {
    root.join(CACHE_DIR)
}

/// Get index snapshot file path
pub fn index_cache_path(root: &Path) -> PathBuf {
    root.join(CACHE_DIR).join(INDEX_CACHE)
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot entry rejected: {0}")]
    Key(#[from] KeyError),
}

/// One inserted key, as recorded by its value leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SymbolKind>,
}

/// Serializable form of a tree: the ordered insert log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub version: String,
    pub generated_at: String,
    pub delimiter: char,
    pub entries: Vec<SnapshotEntry>,
}

impl TreeSnapshot {
    /// Capture every value leaf of the tree in insertion order.
    pub fn capture(tree: &SymbolTree) -> Self {
        let entries = tree
            .value_nodes()
            .map(|leaf| SnapshotEntry {
                key: leaf.segment.clone(),
                label: leaf.detail.clone().unwrap_or_default(),
                kind: leaf.kind,
            })
            .collect();

        TreeSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            delimiter: tree.delimiter(),
            entries,
        }
    }

    /// Replay the insert log into a fresh tree.
    pub fn rebuild(&self) -> Result<SymbolTree, CacheError> {
        let mut tree = SymbolTree::with_delimiter(self.delimiter);
        for entry in &self.entries {
            tree.insert(&entry.key, &entry.label, entry.kind)?;
        }
        Ok(tree)
    }
}

/// Ensure cache directory exists
pub fn ensure_cache_dir(root: &Path) -> Result<(), CacheError> {
    let cache = cache_dir(root);
    if !cache.exists() {
        std::fs::create_dir_all(&cache).map_err(|source| CacheError::Io { path: cache, source })?;
    }
    Ok(())
}

/// Write the snapshot of `tree` under `root`. Returns the file written.
pub fn save_snapshot(tree: &SymbolTree, root: &Path) -> Result<PathBuf, CacheError> {
    ensure_cache_dir(root)?;
    let path = index_cache_path(root);

    let snapshot = TreeSnapshot::capture(tree);
    let json_str = serde_json::to_string_pretty(&snapshot).map_err(|source| CacheError::Json {
        path: path.clone(),
        source,
    })?;
    std::fs::write(&path, json_str).map_err(|source| CacheError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::debug!("Index snapshot saved: {} ({} keys)", path.display(), snapshot.entries.len());
    Ok(path)
}

/// Load and rebuild the cached tree, if a snapshot exists.
pub fn load_snapshot(root: &Path) -> Result<Option<SymbolTree>, CacheError> {
    let path = index_cache_path(root);
    if !path.exists() {
        return Ok(None);
    }

    let json_str = std::fs::read_to_string(&path).map_err(|source| CacheError::Io {
        path: path.clone(),
        source,
    })?;
    let snapshot: TreeSnapshot = serde_json::from_str(&json_str).map_err(|source| CacheError::Json {
        path: path.clone(),
        source,
    })?;

    tracing::debug!("Index snapshot loaded from: {} (v{})", path.display(), snapshot.version);
    snapshot.rebuild().map(Some)
}

/// Clear cache directory
pub fn clear_cache(root: &Path) -> Result<(), CacheError> {
    let cache = cache_dir(root);
    if cache.exists() {
        std::fs::remove_dir_all(&cache).map_err(|source| CacheError::Io { path: cache, source })?;
    }
    Ok(())
}
