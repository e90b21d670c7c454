//! FILENAME: core/variant-format/src/code_tables.rs
//! PURPOSE: Loads SKU category/value code tables from JSON configuration.
//! CONTEXT: Expected shape:
//!   { "categories": { "Chair": "CHR" }, "values": { "Red": "RD" } }
//! Both maps are optional. Keys are matched case-insensitively later on.

use std::fs;
use std::path::Path;

use variant_engine::SkuCodeTables;

use crate::error::FormatError;

pub fn code_tables_from_str(json: &str) -> Result<SkuCodeTables, FormatError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(FormatError::InvalidFormat(
            "code tables must be a JSON object".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

pub fn load_code_tables(path: impl AsRef<Path>) -> Result<SkuCodeTables, FormatError> {
    let path = path.as_ref();
    let tables = code_tables_from_str(&fs::read_to_string(path)?)?;
    log::info!(target: "FORMAT", "loaded SKU code tables from {}", path.display());
    Ok(tables)
}
