//! Quill Core — Symbol tree, path resolution, and index snapshots

pub mod model;
pub mod symbols;
pub mod tree;
pub mod builder;
pub mod resolve;
pub mod completion;
pub mod lookup;
pub mod cache;


#[cfg(test)]
pub mod test_utils;

pub use model::{SymbolId, SymbolKind, SymbolNode, Link, KeyError, UnknownKind, DEFAULT_DELIMITER};
pub use tree::{SymbolTree, TreeError};
pub use symbols::PathIndex;
pub use resolve::ResolveMode;
pub use completion::Candidate;
pub use lookup::Definition;
pub use cache::{CACHE_DIR, INDEX_CACHE, CacheError, SnapshotEntry, TreeSnapshot, cache_dir, index_cache_path, ensure_cache_dir, save_snapshot, load_snapshot, clear_cache};
