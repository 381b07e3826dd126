//! Definition lookup for the tooltip

use crate::model::SymbolKind;
use crate::resolve::ResolveMode;
use crate::tree::SymbolTree;

/// What the tooltip shows for a resolved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Definition<'a> {
    pub key: &'a str,
    pub text: &'a str,
    pub kind: Option<SymbolKind>,
}

impl SymbolTree {
    /// Tag text of the node whose full path is exactly `word`.
    pub fn lookup_tag(&self, word: &str) -> Option<&str> {
        self.definition(word).map(|d| d.text)
    }

    /// First value leaf under `word` that carries tag text.
    pub fn definition(&self, word: &str) -> Option<Definition<'_>> {
        let id = self.resolve(word, ResolveMode::FirstDivergence)?;
        self.values(id).into_iter().find_map(|leaf| {
            let node = self.node(leaf)?;
            let text = node.detail.as_deref()?;
            Some(Definition {
                key: &node.segment,
                text,
                kind: node.kind,
            })
        })
    }
}
