//! Reference table files (TOML, JSON, YAML)

pub mod json;
pub mod toml_parser;
pub mod yaml;

use crate::source::{KeyEntry, KeySource};
use quill_core::SymbolKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A named table of `(label, key)` rows as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceTable {
    pub name: String,
    /// Kind applied to rows that do not set their own.
    #[serde(default)]
    pub kind: Option<SymbolKind>,
    #[serde(default)]
    pub entries: Vec<TableEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableEntry {
    pub label: String,
    pub key: String,
    #[serde(default)]
    pub kind: Option<SymbolKind>,
}

impl ReferenceTable {
    pub fn key_entries(&self) -> Vec<KeyEntry> {
        self.entries
            .iter()
            .map(|row| KeyEntry {
                label: row.label.clone(),
                key: row.key.clone(),
                kind: row.kind.or(self.kind),
            })
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("cannot read table file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported table file extension: {0}")]
    Unsupported(PathBuf),
    #[error("invalid TOML table: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML table: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// On-disk encodings a table can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Toml,
    Json,
    Yaml,
}

impl TableFormat {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(TableFormat::Toml),
            Some("json") => Some(TableFormat::Json),
            Some("yml") | Some("yaml") => Some(TableFormat::Yaml),
            _ => None,
        }
    }

    pub fn parse(self, content: &str) -> Result<ReferenceTable, TableError> {
        match self {
            TableFormat::Toml => toml_parser::parse(content),
            TableFormat::Json => json::parse(content),
            TableFormat::Yaml => yaml::parse(content),
        }
    }
}

/// Read and parse a single table file.
pub fn load_table(path: &Path) -> Result<ReferenceTable, TableError> {
    let format = TableFormat::from_path(path).ok_or_else(|| TableError::Unsupported(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    format.parse(&content)
}

/// A table file used as a key source. The file is read when entries are requested.
#[derive(Debug, Clone)]
pub struct TableFile {
    path: PathBuf,
    name: String,
}

impl TableFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        TableFile { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeySource for TableFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> anyhow::Result<Vec<KeyEntry>> {
        let table = load_table(&self.path)?;
        tracing::debug!("Loaded table {} ({} rows) from {}", table.name, table.entries.len(), self.name);
        Ok(table.key_entries())
    }
}
