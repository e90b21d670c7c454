//! FILENAME: core/variant-engine/src/sku.rs
//! SKU Code Suggester - Deterministic default codes for leaf combinations.
//!
//! A code is built from the product's category code followed by one code per
//! attribute value, e.g. `CHR-RD-SM-001`. The lookup tables are passed in by
//! the caller; nothing here is global, and nothing checks codes for uniqueness.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::{Leaf, VariantNode, VariantTree};
use crate::path::map_leaves;

// ============================================================================
// CODE TABLES
// ============================================================================

/// Name → code maps for categories and attribute values.
/// Keys are stored trimmed and lower-cased, so lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCodeTables")]
pub struct SkuCodeTables {
    categories: FxHashMap<String, String>,
    values: FxHashMap<String, String>,
}

/// Tables as written in configuration, before key normalization.
#[derive(Deserialize)]
struct RawCodeTables {
    #[serde(default)]
    categories: FxHashMap<String, String>,
    #[serde(default)]
    values: FxHashMap<String, String>,
}

impl From<RawCodeTables> for SkuCodeTables {
    fn from(raw: RawCodeTables) -> Self {
        let mut tables = SkuCodeTables::default();
        for (name, code) in raw.categories {
            tables.insert_category(&name, code);
        }
        for (name, code) in raw.values {
            tables.insert_value(&name, code);
        }
        tables
    }
}

fn table_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl SkuCodeTables {
    pub fn new() -> Self {
        SkuCodeTables::default()
    }

    pub fn with_category(mut self, name: &str, code: impl Into<String>) -> Self {
        self.insert_category(name, code);
        self
    }

    pub fn with_value(mut self, name: &str, code: impl Into<String>) -> Self {
        self.insert_value(name, code);
        self
    }

    pub fn insert_category(&mut self, name: &str, code: impl Into<String>) {
        self.categories.insert(table_key(name), code.into());
    }

    pub fn insert_value(&mut self, name: &str, code: impl Into<String>) {
        self.values.insert(table_key(name), code.into());
    }

    pub fn category_code(&self, name: &str) -> Option<&str> {
        self.categories.get(&table_key(name)).map(String::as_str)
    }

    pub fn value_code(&self, name: &str) -> Option<&str> {
        self.values.get(&table_key(name)).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.values.is_empty()
    }
}

// ============================================================================
// SUGGESTION
// ============================================================================

/// Upper-cases a trimmed token and replaces every run of characters outside
/// `[A-Z0-9]` with a single hyphen, including runs at either end
/// (`"(limited)"` becomes `"-LIMITED-"`).
pub fn normalize_token(token: &str) -> String {
    let upper = token.trim().to_uppercase();
    let mut out = String::with_capacity(upper.len());
    let mut in_separator = false;

    for ch in upper.chars() {
        if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            in_separator = false;
            out.push(ch);
        } else if !in_separator {
            in_separator = true;
            out.push('-');
        }
    }
    out
}

/// Suggests a SKU code for `product_code` and the ordered attribute values.
///
/// Unmapped names pass through as-is before normalization. Tokens that are
/// empty after normalization are skipped; a token of symbols only becomes `-`.
/// With `seq`, a zero-padded `-NNN` suffix is appended.
pub fn suggest_sku<S: AsRef<str>>(
    tables: &SkuCodeTables,
    product_code: &str,
    attrs: &[S],
    seq: Option<u32>,
) -> String {
    let category = tables.category_code(product_code).unwrap_or(product_code);
    let mut tokens = vec![normalize_token(category)];
    tokens.extend(attrs.iter().map(|attr| {
        let attr = attr.as_ref();
        normalize_token(tables.value_code(attr).unwrap_or(attr))
    }));
    tokens.retain(|t| !t.is_empty());

    let mut code = tokens.join("-");
    if let Some(seq) = seq {
        code.push_str(&format!("-{:03}", seq));
    }
    code
}

/// Fills in a suggested code on every leaf that has none.
///
/// Leaves are numbered 1.. in depth-first order; the number becomes the
/// suffix when `with_sequence` is set. Leaves that already carry a code are
/// kept (and still counted), so codes stay stable when more leaves are filled
/// later.
pub fn fill_sku_codes(
    tree: &[Arc<VariantNode>],
    tables: &SkuCodeTables,
    product_code: &str,
    with_sequence: bool,
) -> VariantTree {
    let mut index = 0u32;
    map_leaves(tree, |path, leaf| {
        index += 1;
        if leaf.sku_code.is_some() {
            return None;
        }
        let seq = with_sequence.then_some(index);
        Some(Leaf {
            sku_code: Some(suggest_sku(tables, product_code, path, seq)),
            ..leaf.clone()
        })
    })
}
