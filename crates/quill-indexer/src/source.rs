//! Key source trait definition

use quill_core::SymbolKind;
use serde::{Deserialize, Serialize};

/// A flat key with its display label, as fed to the index builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    pub label: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SymbolKind>,
}

impl KeyEntry {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        KeyEntry {
            label: label.into(),
            key: key.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: SymbolKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Anything that can enumerate `(label, key)` pairs at startup.
pub trait KeySource {
    /// Name used in logs and build reports.
    fn name(&self) -> &str;

    /// Entries in the order they should be inserted.
    fn entries(&self) -> anyhow::Result<Vec<KeyEntry>>;
}

/// An in-memory list of entries.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    name: String,
    entries: Vec<KeyEntry>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, entries: Vec<KeyEntry>) -> Self {
        StaticSource {
            name: name.into(),
            entries,
        }
    }
}

impl KeySource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> anyhow::Result<Vec<KeyEntry>> {
        Ok(self.entries.clone())
    }
}
