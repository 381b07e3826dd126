//! Orchestrates building the symbol tree from key sources

use crate::source::KeySource;
use anyhow::{Context, Result};
use quill_core::{KeyError, SymbolTree, DEFAULT_DELIMITER};

/// A key refused by the index builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedKey {
    pub source: String,
    pub label: String,
    pub error: KeyError,
}

/// Outcome of a full build.
#[derive(Debug)]
pub struct BuildReport {
    pub tree: SymbolTree,
    pub inserted: usize,
    pub rejected: Vec<RejectedKey>,
    pub sources: usize,
}

/// Feeds every entry of every source, in order, to a fresh tree.
pub struct Coordinator {
    delimiter: char,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Coordinator { delimiter }
    }

    /// Build the tree. Malformed keys are skipped and reported; a source that
    /// cannot enumerate its entries aborts the build.
    pub fn build(&self, sources: &[&dyn KeySource]) -> Result<BuildReport> {
        let mut tree = SymbolTree::with_delimiter(self.delimiter);
        let mut inserted = 0;
        let mut rejected = Vec::new();

        for source in sources {
            let entries = source
                .entries()
                .with_context(|| format!("failed to read key source {}", source.name()))?;
            tracing::debug!("Indexing {} entries from {}", entries.len(), source.name());

            for entry in entries {
                match tree.insert(&entry.key, &entry.label, entry.kind) {
                    Ok(_) => inserted += 1,
                    Err(error) => {
                        tracing::warn!("Rejected key from {}: {}", source.name(), error);
                        rejected.push(RejectedKey {
                            source: source.name().to_string(),
                            label: entry.label,
                            error,
                        });
                    }
                }
            }
        }

        tree.verify().context("symbol tree is inconsistent after build")?;

        tracing::info!(
            "Indexed {} keys ({} nodes, {} rejected) from {} sources",
            inserted,
            tree.node_count(),
            rejected.len(),
            sources.len()
        );

        Ok(BuildReport {
            tree,
            inserted,
            rejected,
            sources: sources.len(),
        })
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}
