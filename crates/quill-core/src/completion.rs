//! Candidate lists for autocomplete

use crate::model::{SymbolId, SymbolKind};
use crate::resolve::ResolveMode;
use crate::tree::SymbolTree;
use serde::{Deserialize, Serialize};

/// One autocomplete entry sourced from a child of the resolved node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Displayed text: the child's value-leaf key, or its segment.
    pub label: String,
    /// The label relative to the resolved path, i.e. what follows the
    /// trigger delimiter in the buffer.
    pub completion: String,
    pub kind: Option<SymbolKind>,
    pub detail: Option<String>,
}

impl Candidate {
    /// Case-insensitive prefix test against the completion text.
    pub fn matches(&self, typed: &str) -> bool {
        self.completion
            .to_lowercase()
            .starts_with(&typed.to_lowercase())
    }
}

impl SymbolTree {
    /// Candidates for the segment children of `id`, sorted by label. The sort
    /// is stable, so equal labels keep insertion order.
    pub fn candidates(&self, id: SymbolId) -> Vec<Candidate> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        let mut prefix = node.full_path.clone();
        prefix.push(self.delimiter);

        let mut candidates: Vec<Candidate> = self
            .children(id)
            .into_iter()
            .filter_map(|child| {
                let child_node = self.node(child)?;
                let leaf = self.values(child).first().and_then(|&v| self.node(v));
                let label = leaf.map_or(&child_node.segment, |l| &l.segment).clone();
                let completion = label.strip_prefix(&prefix).unwrap_or(&label).to_string();
                let kind = leaf.and_then(|l| l.kind).or_else(|| {
                    (!self.children(child).is_empty()).then_some(SymbolKind::Namespace)
                });

                Some(Candidate {
                    label,
                    completion,
                    kind,
                    detail: leaf.and_then(|l| l.detail.clone()),
                })
            })
            .collect();

        candidates.sort_by(|a, b| a.label.cmp(&b.label));
        candidates
    }

    /// Resolve the word typed before a trigger and list what can follow it.
    /// One trailing delimiter is ignored; a doubled one leaves an empty
    /// segment and resolves to none. Returns none when the path does not
    /// resolve exactly or the node has no segment children.
    pub fn complete(&self, word: &str) -> Option<(SymbolId, Vec<Candidate>)> {
        let path = word.strip_suffix(self.delimiter).unwrap_or(word);
        let id = self.resolve(path, ResolveMode::FirstDivergence)?;
        let candidates = self.candidates(id);
        if candidates.is_empty() {
            return None;
        }
        Some((id, candidates))
    }
}
