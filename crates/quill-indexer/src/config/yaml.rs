//! YAML table parser

use super::{ReferenceTable, TableError};

pub fn parse(content: &str) -> Result<ReferenceTable, TableError> {
    Ok(serde_yaml::from_str(content)?)
}
