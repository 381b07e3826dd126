//! Symbol tree using petgraph::StableDiGraph with SymbolId handles

use crate::model::*;
use crate::symbols::PathIndex;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use std::fmt::Write as _;

/// The symbol forest. Nodes are connected by `Segment` and `Value` links; the
/// graph never removes nodes, so indices are stable and grow with insertion.
pub struct SymbolTree {
    pub(crate) inner: StableDiGraph<SymbolNode, Link>,
    pub(crate) roots: Vec<SymbolId>,
    pub(crate) paths: PathIndex,
    pub(crate) delimiter: char,
}

impl std::fmt::Debug for SymbolTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolTree")
            .field("delimiter", &self.delimiter)
            .field("roots", &self.roots.len())
            .field("node_count", &self.inner.node_count())
            .field("indexed_paths", &self.paths.len())
            .finish()
    }
}

/// Invariant violations reported by [`SymbolTree::verify`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("root `{path}` does not match its segment `{segment}`")]
    RootPath { path: String, segment: String },
    #[error("node `{path}` should have full path `{expected}`")]
    BrokenPath { path: String, expected: String },
    #[error("segment node `{path}` is missing from the path index")]
    Unindexed { path: String },
    #[error("path index entry `{path}` does not resolve to its node")]
    IndexMismatch { path: String },
    #[error("node `{path}` has {parents} parents")]
    Parents { path: String, parents: usize },
}

impl SymbolTree {
    pub fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        SymbolTree {
            inner: StableDiGraph::new(),
            roots: Vec::new(),
            paths: PathIndex::new(),
            delimiter,
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Split a path into its segments.
    pub fn split<'a>(&self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        path.split(self.delimiter)
    }

    /// Join a parent path and a segment with the delimiter.
    pub fn join(&self, parent: &str, segment: &str) -> String {
        let mut path = String::with_capacity(parent.len() + segment.len() + 1);
        path.push_str(parent);
        path.push(self.delimiter);
        path.push_str(segment);
        path
    }

    /// Get a node by ID.
    pub fn node(&self, id: SymbolId) -> Option<&SymbolNode> {
        self.inner.node_weight(NodeIndex::new(id.0 as usize))
    }

    /// Total number of nodes, value leaves included.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of accepted inserts (one value leaf each).
    pub fn key_count(&self) -> usize {
        self.inner
            .edge_indices()
            .filter(|&e| self.inner.edge_weight(e) == Some(&Link::Value))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Root nodes in creation order.
    pub fn roots(&self) -> &[SymbolId] {
        &self.roots
    }

    /// The root whose segment matches exactly.
    pub fn root(&self, segment: &str) -> Option<SymbolId> {
        self.roots
            .iter()
            .copied()
            .find(|&id| self.node(id).is_some_and(|n| n.segment == segment))
    }

    pub fn paths(&self) -> &PathIndex {
        &self.paths
    }

    /// Segment children of a node, in insertion order.
    pub fn children(&self, id: SymbolId) -> Vec<SymbolId> {
        self.linked(id, Link::Segment)
    }

    /// Value leaves of a node, in insertion order.
    pub fn values(&self, id: SymbolId) -> Vec<SymbolId> {
        self.linked(id, Link::Value)
    }

    /// First segment child with the given segment.
    pub fn child(&self, id: SymbolId, segment: &str) -> Option<SymbolId> {
        self.children(id)
            .into_iter()
            .find(|&c| self.node(c).is_some_and(|n| n.segment == segment))
    }

    pub fn parent(&self, id: SymbolId) -> Option<SymbolId> {
        let idx = NodeIndex::new(id.0 as usize);
        self.inner
            .edges_directed(idx, Direction::Incoming)
            .next()
            .map(|e| SymbolId(e.source().index() as u64))
    }

    /// Every value leaf in insertion order.
    pub fn value_nodes(&self) -> impl Iterator<Item = &SymbolNode> + '_ {
        self.inner.node_indices().filter_map(move |idx| {
            let is_value = self
                .inner
                .edges_directed(idx, Direction::Incoming)
                .any(|e| *e.weight() == Link::Value);
            if is_value { self.inner.node_weight(idx) } else { None }
        })
    }

    fn linked(&self, id: SymbolId, link: Link) -> Vec<SymbolId> {
        let idx = NodeIndex::new(id.0 as usize);
        let mut ids: Vec<SymbolId> = self
            .inner
            .edges_directed(idx, Direction::Outgoing)
            .filter(|e| *e.weight() == link)
            .map(|e| SymbolId(e.target().index() as u64))
            .collect();
        // petgraph yields the newest edge first
        ids.sort_unstable();
        ids
    }

    pub(crate) fn add_root(&mut self, node: SymbolNode) -> SymbolId {
        let id = self.add_node(node);
        self.roots.push(id);
        id
    }

    pub(crate) fn add_child(&mut self, parent: SymbolId, node: SymbolNode, link: Link) -> SymbolId {
        let id = self.add_node(node);
        self.inner.add_edge(
            NodeIndex::new(parent.0 as usize),
            NodeIndex::new(id.0 as usize),
            link,
        );
        id
    }

    fn add_node(&mut self, node: SymbolNode) -> SymbolId {
        let idx = self.inner.add_node(node);
        let id = SymbolId(idx.index() as u64);
        if let Some(weight) = self.inner.node_weight_mut(idx) {
            weight.id = id;
        }
        id
    }

    /// Check every structural invariant of the tree and its path index.
    pub fn verify(&self) -> Result<(), TreeError> {
        for idx in self.inner.node_indices() {
            let Some(node) = self.inner.node_weight(idx) else {
                continue;
            };
            let incoming: Vec<_> = self.inner.edges_directed(idx, Direction::Incoming).collect();
            match incoming.as_slice() {
                [] => {
                    if node.full_path != node.segment {
                        return Err(TreeError::RootPath {
                            path: node.full_path.clone(),
                            segment: node.segment.clone(),
                        });
                    }
                }
                [edge] => {
                    let parent = &self.inner[edge.source()];
                    let expected = self.join(&parent.full_path, &node.segment);
                    if node.full_path != expected {
                        return Err(TreeError::BrokenPath {
                            path: node.full_path.clone(),
                            expected,
                        });
                    }
                }
                many => {
                    return Err(TreeError::Parents {
                        path: node.full_path.clone(),
                        parents: many.len(),
                    });
                }
            }

            let is_value = incoming.iter().any(|e| *e.weight() == Link::Value);
            if !is_value && self.paths.lookup(&node.full_path) != Some(node.id) {
                return Err(TreeError::Unindexed {
                    path: node.full_path.clone(),
                });
            }
        }

        for (path, id) in self.paths.entries() {
            if self.walk(&path) != Some(id) {
                return Err(TreeError::IndexMismatch { path });
            }
        }

        Ok(())
    }

    /// Exact walk from the roots that ignores the path index.
    fn walk(&self, path: &str) -> Option<SymbolId> {
        let mut segments = self.split(path);
        let mut current = self.root(segments.next()?)?;
        for segment in segments {
            current = self.child(current, segment)?;
        }
        Some(current)
    }

    /// Indented outline of the tree. Value leaves are shown as `= key`, with
    /// their kind and display label when present.
    pub fn render_outline(&self, max_depth: Option<usize>) -> String {
        let mut out = String::new();
        let mut stack: Vec<(SymbolId, usize)> = self.roots.iter().rev().map(|&id| (id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            let indent = "  ".repeat(depth);
            let _ = writeln!(out, "{indent}{}", node.segment);

            for value in self.values(id) {
                if let Some(leaf) = self.node(value) {
                    let _ = write!(out, "{indent}  = {}", leaf.segment);
                    if let Some(kind) = leaf.kind {
                        let _ = write!(out, " [{kind}]");
                    }
                    if let Some(detail) = &leaf.detail {
                        let _ = write!(out, " \"{detail}\"");
                    }
                    out.push('\n');
                }
            }

            if max_depth.is_some_and(|max| depth + 1 >= max) {
                continue;
            }
            for child in self.children(id).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }

        out
    }
}

impl Default for SymbolTree {
    fn default() -> Self {
        Self::new()
    }
}
