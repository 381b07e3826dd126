//! Key sources and index construction

pub mod source;
pub mod builtin;
pub mod config;
pub mod discover;
pub mod coordinator;

#[cfg(test)]
pub mod tests;

pub use source::{KeyEntry, KeySource, StaticSource};
pub use builtin::BuiltinTable;
pub use config::{ReferenceTable, TableEntry, TableError, TableFile, TableFormat, load_table};
pub use discover::discover_tables;
pub use coordinator::{BuildReport, Coordinator, RejectedKey};
