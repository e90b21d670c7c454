//! FILENAME: core/variant-engine/src/lib.rs
//! Variant Tree & SKU Matrix engine.
//!
//! Pure, synchronous data-structure code: every function takes an input tree
//! or group list and returns a new one, sharing unmodified subtrees by `Arc`.
//! Nothing here performs I/O or holds state between calls.
//!
//! Layers:
//! - `model`: group, node and combination types (what a variant tree IS)
//! - `builder` / `extractor`: groups -> tree and back
//! - `combination` / `row_span`: the flattened table and its merged cells
//! - `path` / `prune`: editing leaves and removing nodes
//! - `sku`: default SKU codes
//! - `validate`: consistency checks for loaded trees
//! - `view`: the renderable bulk edit matrix

pub mod builder;
pub mod combination;
pub mod extractor;
pub mod model;
pub mod path;
pub mod prune;
pub mod row_span;
pub mod sku;
pub mod validate;
pub mod view;

pub use builder::build;
pub use combination::{combination_count, combinations};
pub use extractor::extract;
pub use model::{
    group_names, open_groups, Branch, Combination, Leaf, LeafPatch, NodeId, VariantGroup,
    VariantNode, VariantTree,
};
pub use path::{apply_to_all_leaves, find, find_leaf, leaves, map_leaves, update_by_path};
pub use prune::remove;
pub use row_span::{row_spans, span_count, RowSpanCell, RowSpanMatrix};
pub use sku::{fill_sku_codes, normalize_token, suggest_sku, SkuCodeTables};
pub use validate::{is_consistent, validate, TreeIssue};
pub use view::{sku_matrix, SkuMatrixCell, SkuMatrixRow, SkuMatrixView};
