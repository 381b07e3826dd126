//! Reference tables shipped with the editor

use crate::source::{KeyEntry, KeySource};
use quill_core::SymbolKind;

const TABLES: &[(&str, &str)] = &[
    ("table 1", "table_1"),
    ("table 2", "table_2"),
    ("table 2 first", "table_2_first"),
    ("table 2 second", "table_2_second"),
    ("table 2 syphon", "table_2_syphon"),
];

const NOMINAL: &[(&str, &str)] = &[
    ("Accruals and deferred income", "accruals_and_deferred_income"),
    ("Administrative expenses", "administrative_expenses"),
    ("Aggregated other reserves", "aggregated_other_reserves"),
    ("Aggregated other reserves - Brought forward", "aggregated_other_reserves_brought_forward"),
    ("Aggregated other reserves - Brought forward restated", "aggregated_other_reserves_brought_forward_restated"),
    ("Aggregated other reserves - Cancellation of subscribed capital", "aggregated_other_reserves_cancellation_of_subscribed_capital"),
    ("Aggregated other reserves - Cancellation of treasury shares", "aggregated_other_reserves_cancellation_of_treasury_shares"),
    ("Aggregated other reserves - Carried forward", "aggregated_other_reserves_carried_forward"),
    ("Aggregated other reserves - Conversion of debt to equity", "aggregated_other_reserves_conversion_of_debt_to_equity"),
    ("Aggregated other reserves - Dividends paid and payable", "aggregated_other_reserves_dividends_paid"),
    ("Aggregated other reserves - Effects of changes in accounting policies", "aggregated_other_reserves_effects_of_changes_in_accounting_policies"),
    ("Aggregated other reserves - Equity settled share-based payments", "aggregated_other_reserves_equity_settled_share-based_payments"),
    ("Aggregated other reserves - Exercise of options, rights and warrants", "aggregated_other_reserves_exercise_of_options_rights_and_warrants"),
    ("Aggregated other reserves - Expired options, rights and warrants", "aggregated_other_reserves_expired_options_rights_and_warrants"),
];

/// Which built-in table to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTable {
    Tables,
    Nominal,
}

impl BuiltinTable {
    pub const ALL: [BuiltinTable; 2] = [BuiltinTable::Tables, BuiltinTable::Nominal];

    fn rows(self) -> &'static [(&'static str, &'static str)] {
        match self {
            BuiltinTable::Tables => TABLES,
            BuiltinTable::Nominal => NOMINAL,
        }
    }

    fn kind(self) -> SymbolKind {
        match self {
            BuiltinTable::Tables => SymbolKind::Member,
            BuiltinTable::Nominal => SymbolKind::Property,
        }
    }
}

impl KeySource for BuiltinTable {
    fn name(&self) -> &str {
        match self {
            BuiltinTable::Tables => "Tables",
            BuiltinTable::Nominal => "Nominal",
        }
    }

    fn entries(&self) -> anyhow::Result<Vec<KeyEntry>> {
        Ok(self
            .rows()
            .iter()
            .map(|(label, key)| KeyEntry::new(*label, *key).with_kind(self.kind()))
            .collect())
    }
}
