//! FILENAME: core/variant-engine/src/builder.rs
//! Nested Tree Builder - Turns the flat group list into the variant tree.
//!
//! Each open group becomes one tree level, in declaration order. The last
//! level holds leaves (price/stock/image), every level above holds branches.

use std::sync::Arc;

use crate::model::{Branch, Leaf, NodeId, VariantGroup, VariantNode, VariantTree};

/// Builds the nested variant tree for `groups`.
///
/// Groups that are not open (no name or no values) are skipped. With no open
/// groups the result is empty and the caller falls back to the single-SKU
/// product shape.
pub fn build(groups: &[VariantGroup]) -> VariantTree {
    let open: Vec<&VariantGroup> = groups.iter().filter(|g| g.is_open()).collect();
    if open.is_empty() {
        return Vec::new();
    }
    build_level(&open, 0)
}

/// Recursively builds one level of the tree.
///
/// The level below is built once and handed to every node of this level.
/// Trees are immutable, so sibling branches may share their subtrees until
/// an edit copies the path it touches.
fn build_level(groups: &[&VariantGroup], level: usize) -> VariantTree {
    let group = groups[level];

    if level == groups.len() - 1 {
        return group
            .values
            .iter()
            .map(|value| {
                Arc::new(VariantNode::Leaf(Leaf::new(
                    NodeId::unassigned(),
                    &group.name,
                    value,
                )))
            })
            .collect();
    }

    let children = build_level(groups, level + 1);
    group
        .values
        .iter()
        .map(|value| {
            Arc::new(VariantNode::Branch(Branch::new(
                NodeId::unassigned(),
                &group.name,
                value,
                children.clone(),
            )))
        })
        .collect()
}
