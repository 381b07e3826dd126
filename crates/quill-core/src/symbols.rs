//! Path index for direct full-path lookup

use crate::model::SymbolId;
use dashmap::DashMap;

/// Maps full paths to the segment node for that path. Thread-safe for concurrent access.
///
/// This is a cache over the tree, never the source of truth: every entry must
/// agree with a walk from the matching root (see [`crate::SymbolTree::verify`]).
pub struct PathIndex {
    paths: DashMap<String, SymbolId>,
}

impl PathIndex {
    pub fn new() -> Self {
        PathIndex {
            paths: DashMap::new(),
        }
    }

    /// Register the node created for a path.
    pub fn insert(&self, full_path: String, id: SymbolId) {
        self.paths.insert(full_path, id);
    }

    /// Look up a node by full path.
    pub fn lookup(&self, full_path: &str) -> Option<SymbolId> {
        self.paths.get(full_path).map(|r| *r.value())
    }

    pub fn contains(&self, full_path: &str) -> bool {
        self.paths.contains_key(full_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Snapshot of every registered entry, in no particular order.
    pub fn entries(&self) -> Vec<(String, SymbolId)> {
        self.paths
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect()
    }
}

impl Default for PathIndex {
    fn default() -> Self {
        Self::new()
    }
}
