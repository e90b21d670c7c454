//! FILENAME: core/variant-engine/src/view.rs
//! SKU Matrix View - Renderable output for the bulk price/stock table.
//!
//! Combines the combination generator, the row-span calculator and the path
//! accessor into one grid: a row per combination, a column per open group,
//! plus the leaf data the row addresses. Spanned cells follow the same
//! master/covered convention as merged header cells elsewhere in the UI.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::combination::combinations;
use crate::model::{Combination, Leaf, VariantGroup, VariantNode};
use crate::path::find_leaf;
use crate::row_span::row_spans;

/// One option-value cell of the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuMatrixCell {
    pub value: String,

    /// Rows covered by this cell when it is a master cell, otherwise 0.
    pub row_span: usize,

    /// Whether this cell is covered by a master cell above (not rendered).
    pub is_spanned: bool,
}

/// One combination row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuMatrixRow {
    pub combination: Combination,
    pub cells: Vec<SkuMatrixCell>,

    /// The addressed leaf, or `None` when the tree lacks this combination
    /// (e.g. after a variant was deleted).
    pub leaf: Option<Leaf>,
}

/// The complete grid for the bulk edit table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuMatrixView {
    /// Column headers: the open group names in depth order.
    pub columns: Vec<String>,
    pub rows: Vec<SkuMatrixRow>,
    /// Rows whose combination has no leaf in the tree.
    pub missing_count: usize,
}

impl SkuMatrixView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the matrix for `tree` as seen through the open groups of `groups`.
pub fn sku_matrix(tree: &[Arc<VariantNode>], groups: &[VariantGroup]) -> SkuMatrixView {
    let open: Vec<VariantGroup> = groups.iter().filter(|g| g.is_open()).cloned().collect();
    let columns: Vec<String> = open.iter().map(|g| g.name.clone()).collect();
    let combos = combinations(&open);
    let spans = row_spans(&combos, columns.len());

    let mut missing_count = 0;
    let rows = combos
        .into_iter()
        .enumerate()
        .map(|(row, combination)| {
            let cells = combination
                .iter()
                .enumerate()
                .map(|(col, value)| SkuMatrixCell {
                    value: value.clone(),
                    row_span: spans.span(row, col),
                    is_spanned: !spans.should_render(row, col),
                })
                .collect();
            let leaf = find_leaf(tree, &columns, &combination).cloned();
            if leaf.is_none() {
                missing_count += 1;
            }
            SkuMatrixRow {
                combination,
                cells,
                leaf,
            }
        })
        .collect();

    SkuMatrixView {
        columns,
        rows,
        missing_count,
    }
}
