//! Path resolution over the symbol tree

use crate::model::SymbolId;
use crate::tree::SymbolTree;

/// Traversal policy for [`SymbolTree::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Stop at the deepest node reached, even if segments remain. Used to find
    /// where a new key attaches.
    Deepest,
    /// Succeed only if every segment matches; none at the first mismatch.
    FirstDivergence,
}

impl SymbolTree {
    /// Resolve a delimiter-joined path. Segment comparison is exact and
    /// case-sensitive; value leaves are never descended into.
    pub fn resolve(&self, path: &str, mode: ResolveMode) -> Option<SymbolId> {
        self.resolve_with_depth(path, mode).map(|(id, _)| id)
    }

    /// Like [`resolve`](Self::resolve), also returning how many segments were
    /// consumed to reach the node.
    pub fn resolve_with_depth(&self, path: &str, mode: ResolveMode) -> Option<(SymbolId, usize)> {
        if path.is_empty() {
            return None;
        }

        let mut segments = self.split(path);
        let mut current = self.root(segments.next()?)?;
        let mut consumed = 1;

        for segment in segments {
            match self.child(current, segment) {
                Some(next) => {
                    current = next;
                    consumed += 1;
                }
                None => match mode {
                    ResolveMode::Deepest => break,
                    ResolveMode::FirstDivergence => return None,
                },
            }
        }

        Some((current, consumed))
    }
}
