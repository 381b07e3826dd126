//! JSON table parser

use super::{ReferenceTable, TableError};

pub fn parse(content: &str) -> Result<ReferenceTable, TableError> {
    Ok(serde_json::from_str(content)?)
}
