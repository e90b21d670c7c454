//! FILENAME: core/variant-format/src/payload.rs
//! PURPOSE: The product payload exchanged with the catalog backend.
//! CONTEXT: A product either has a variant tree (price/stock live on the
//! leaves) or no variants at all (price/stock live on the product). The JSON
//! shape is camelCase, nodes use the flat layout from `variant_engine::model`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use variant_engine::{validate, VariantTree};

use crate::error::FormatError;

/// Highest payload version this crate reads.
pub const PAYLOAD_VERSION: u32 = 1;

fn default_version() -> u32 {
    PAYLOAD_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default = "default_version")]
    pub format_version: u32,

    pub name: String,

    /// Category code used as the first token of suggested SKU codes.
    #[serde(default)]
    pub product_code: String,

    #[serde(default)]
    pub variants: VariantTree,

    /// Price/stock/code of a product without variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_code: Option<String>,
}

impl ProductPayload {
    pub fn new(name: impl Into<String>, product_code: impl Into<String>) -> Self {
        ProductPayload {
            format_version: PAYLOAD_VERSION,
            name: name.into(),
            product_code: product_code.into(),
            variants: Vec::new(),
            price: None,
            stock: None,
            sku_code: None,
        }
    }

    pub fn with_variants(mut self, variants: VariantTree) -> Self {
        self.variants = variants;
        self
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }
}

/// Parses a payload. Tree issues are logged, not rejected: a pruned tree may
/// legitimately hold leaves at different depths. Use [`check_payload`] when a
/// strictly consistent tree is required.
pub fn payload_from_str(json: &str) -> Result<ProductPayload, FormatError> {
    let payload: ProductPayload = serde_json::from_str(json)?;
    if payload.format_version > PAYLOAD_VERSION {
        return Err(FormatError::InvalidFormat(format!(
            "payload version {} is newer than supported version {}",
            payload.format_version, PAYLOAD_VERSION
        )));
    }

    for issue in validate(&payload.variants) {
        log::warn!(target: "FORMAT", "product '{}': {}", payload.name, issue);
    }
    Ok(payload)
}

/// Fails on the first tree invariant violation.
pub fn check_payload(payload: &ProductPayload) -> Result<(), FormatError> {
    let issues = validate(&payload.variants);
    match issues.first() {
        None => Ok(()),
        Some(first) => Err(FormatError::InvalidTree(format!(
            "{} ({} issue(s) in total)",
            first,
            issues.len()
        ))),
    }
}

pub fn payload_to_string(payload: &ProductPayload) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(payload)?)
}

pub fn read_payload(path: impl AsRef<Path>) -> Result<ProductPayload, FormatError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let payload = payload_from_str(&text)?;
    log::info!(
        target: "FORMAT",
        "loaded product '{}' from {} ({} top-level variants)",
        payload.name,
        path.display(),
        payload.variants.len()
    );
    Ok(payload)
}

pub fn write_payload(path: impl AsRef<Path>, payload: &ProductPayload) -> Result<(), FormatError> {
    let path = path.as_ref();
    fs::write(path, payload_to_string(payload)?)?;
    log::info!(target: "FORMAT", "saved product '{}' to {}", payload.name, path.display());
    Ok(())
}
