//! Core data structures for the symbol tree

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Segment delimiter used by the built-in key sets.
pub const DEFAULT_DELIMITER: char = '_';

/// Identifier of a node inside a [`crate::SymbolTree`].
///
/// Ids are handed out in insertion order and never reused, so ordering by id
/// is ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct SymbolId(pub u64);

/// Classification of a symbol, used by the host to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Namespace,
    Member,
    Property,
    Event,
    Custom,
}

impl SymbolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::Member => "member",
            SymbolKind::Property => "property",
            SymbolKind::Event => "event",
            SymbolKind::Custom => "custom",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "namespace" => Ok(SymbolKind::Namespace),
            "member" => Ok(SymbolKind::Member),
            "property" => Ok(SymbolKind::Property),
            "event" => Ok(SymbolKind::Event),
            "custom" => Ok(SymbolKind::Custom),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbol kind `{0}`")]
pub struct UnknownKind(pub String);

/// How a node hangs off its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Link {
    /// A path component. Traversed by the resolver.
    Segment,
    /// The value leaf recorded for an inserted key. Never traversed.
    Value,
}

/// A single node in the symbol tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymbolNode {
    pub id: SymbolId,
    /// One path component, or the whole key for a value leaf.
    pub segment: String,
    pub full_path: String,
    pub kind: Option<SymbolKind>,
    /// Display label supplied with the key. Only value leaves carry one.
    pub detail: Option<String>,
}

impl SymbolNode {
    pub(crate) fn segment(segment: &str, full_path: String) -> Self {
        SymbolNode {
            id: SymbolId::default(),
            segment: segment.to_string(),
            full_path,
            kind: None,
            detail: None,
        }
    }

    pub(crate) fn value(key: &str, full_path: String, label: &str, kind: Option<SymbolKind>) -> Self {
        SymbolNode {
            id: SymbolId::default(),
            segment: key.to_string(),
            full_path,
            kind,
            detail: (!label.is_empty()).then(|| label.to_string()),
        }
    }
}

/// Why a key was refused by the index builder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("key is empty")]
    Empty,
    #[error("key `{0}` has an empty segment")]
    EmptySegment(String),
    #[error("key `{0}` contains whitespace")]
    Whitespace(String),
}
