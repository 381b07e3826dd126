//! Test utilities for Quill

use crate::{SymbolKind, SymbolTree};

/// The reference table keys, in the order the editor ships them.
pub const TABLE_KEYS: &[(&str, &str)] = &[
    ("table 1", "table_1"),
    ("table 2", "table_2"),
    ("table 2 first", "table_2_first"),
    ("table 2 second", "table_2_second"),
    ("table 2 syphon", "table_2_syphon"),
];

/// A slice of the nominal ledger sharing the `aggregated_other_reserves` prefix.
pub const RESERVE_KEYS: &[(&str, &str)] = &[
    ("Aggregated other reserves", "aggregated_other_reserves"),
    ("Aggregated other reserves - Brought forward", "aggregated_other_reserves_brought_forward"),
    ("Aggregated other reserves - Carried forward", "aggregated_other_reserves_carried_forward"),
    ("Aggregated other reserves - Dividends paid and payable", "aggregated_other_reserves_dividends_paid"),
    ("Aggregated other reserves - Equity settled share-based payments", "aggregated_other_reserves_equity_settled_share-based_payments"),
    ("Aggregated other reserves - Expired options, rights and warrants", "aggregated_other_reserves_expired_options_rights_and_warrants"),
];

/// Build a tree from `(label, key)` pairs, asserting every key is accepted.
pub fn build_tree(entries: &[(&str, &str)], kind: Option<SymbolKind>) -> SymbolTree {
    let mut tree = SymbolTree::new();
    for (label, key) in entries {
        tree.insert(key, label, kind).unwrap();
    }
    tree
}

/// Tables and reserves together.
pub fn sample_tree() -> SymbolTree {
    let mut tree = build_tree(TABLE_KEYS, None);
    for (label, key) in RESERVE_KEYS {
        tree.insert(key, label, Some(SymbolKind::Property)).unwrap();
    }
    tree
}
