//! TOML table parser
//!
//! ```toml
//! name = "Nominal"
//! kind = "property"
//!
//! [[entries]]
//! label = "Administrative expenses"
//! key = "administrative_expenses"
//! ```

use super::{ReferenceTable, TableError};

pub fn parse(content: &str) -> Result<ReferenceTable, TableError> {
    Ok(toml::from_str(content)?)
}
