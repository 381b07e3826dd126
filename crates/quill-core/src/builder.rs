//! Index builder: grows the symbol tree from flat keys

use crate::model::*;
use crate::resolve::ResolveMode;
use crate::tree::SymbolTree;

impl SymbolTree {
    /// Insert a flat key with its display label.
    ///
    /// Missing segment nodes are created and registered in the path index,
    /// then a value leaf labelled with the whole key is appended under the
    /// deepest one. Inserting the same key twice appends a second leaf.
    /// Returns the id of the new value leaf.
    pub fn insert(&mut self, key: &str, label: &str, kind: Option<SymbolKind>) -> Result<SymbolId, KeyError> {
        self.validate_key(key)?;

        let parent = match self.paths.lookup(key) {
            Some(existing) => {
                tracing::debug!("Duplicate key {}, appending another value leaf", key);
                existing
            }
            None => self.grow(key),
        };

        let parent_path = self
            .node(parent)
            .map(|n| n.full_path.clone())
            .unwrap_or_default();
        let leaf = SymbolNode::value(key, self.join(&parent_path, key), label, kind);
        Ok(self.add_child(parent, leaf, Link::Value))
    }

    /// Reject keys that cannot map onto a clean segment chain.
    pub fn validate_key(&self, key: &str) -> Result<(), KeyError> {
        if key.is_empty() {
            return Err(KeyError::Empty);
        }
        if key.chars().any(char::is_whitespace) {
            return Err(KeyError::Whitespace(key.to_string()));
        }
        if self.split(key).any(str::is_empty) {
            return Err(KeyError::EmptySegment(key.to_string()));
        }
        Ok(())
    }

    /// Create the segment chain for `key`, attaching at its deepest existing
    /// prefix. Returns the node whose full path is `key`.
    fn grow(&mut self, key: &str) -> SymbolId {
        let segments: Vec<&str> = key.split(self.delimiter).collect();

        let (mut current, consumed) = match self.resolve_with_depth(key, ResolveMode::Deepest) {
            Some(found) => found,
            None => {
                let root = self.add_root(SymbolNode::segment(segments[0], segments[0].to_string()));
                self.paths.insert(segments[0].to_string(), root);
                (root, 1)
            }
        };

        for segment in &segments[consumed..] {
            let parent_path = self
                .node(current)
                .map(|n| n.full_path.clone())
                .unwrap_or_default();
            let full_path = self.join(&parent_path, segment);
            let node = SymbolNode::segment(segment, full_path.clone());
            current = self.add_child(current, node, Link::Segment);
            self.paths.insert(full_path, current);
        }

        current
    }
}
