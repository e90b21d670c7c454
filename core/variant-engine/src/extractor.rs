//! FILENAME: core/variant-engine/src/extractor.rs
//! Group Extractor - Recovers the flat group list from a saved tree.
//!
//! Used when an existing product is opened for editing: the tree is walked
//! level by level, and each depth becomes one group.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::model::{VariantGroup, VariantNode};

/// Reconstructs the ordered group list from `tree`.
///
/// Per depth, the group name is the first non-empty node name encountered and
/// values keep their first-seen order. An empty tree yields one placeholder
/// group so that editors always have a row to show.
pub fn extract(tree: &[Arc<VariantNode>]) -> Vec<VariantGroup> {
    let mut groups = Vec::new();
    let mut level: Vec<&Arc<VariantNode>> = tree.iter().collect();

    while !level.is_empty() {
        let mut group = VariantGroup::placeholder();
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut next = Vec::new();

        for &node in &level {
            if group.name.is_empty() && !node.name().is_empty() {
                group.name = node.name().to_string();
            }
            if seen.insert(node.value()) {
                group.values.push(node.value().to_string());
            }
            next.extend(node.children().iter());
        }

        groups.push(group);
        level = next;
    }

    if groups.is_empty() {
        groups.push(VariantGroup::placeholder());
    }
    groups
}
