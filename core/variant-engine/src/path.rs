//! FILENAME: core/variant-engine/src/path.rs
//! Path-Addressed Accessor/Mutator - Reads and edits leaves by combination.
//!
//! A combination is resolved into a list of child indices (one per depth),
//! then edits copy only the nodes on that path. Everything off the path is
//! returned as the same `Arc`, so a UI can skip re-rendering it.
//!
//! Misses are never errors: `find` returns `None` and the mutators return the
//! tree unchanged. Passing `groups` and `combo` of different lengths is caller
//! misuse and is treated as a miss.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::model::{Combination, Leaf, LeafPatch, VariantNode, VariantTree};

/// Child indices from the root to an addressed node.
type NodePath = SmallVec<[usize; 8]>;

// ============================================================================
// LOOKUP
// ============================================================================

/// A node matches when its value equals the wanted value. Names are checked
/// only when both the node and the caller supply one, since legacy trees may
/// carry unnamed levels.
fn matches(node: &VariantNode, group: &str, value: &str) -> bool {
    node.value() == value && (group.is_empty() || node.name().is_empty() || node.name() == group)
}

fn locate(tree: &[Arc<VariantNode>], groups: &[String], combo: &[String]) -> Option<NodePath> {
    if combo.is_empty() || groups.len() != combo.len() {
        return None;
    }

    let mut level = tree;
    let mut path = NodePath::new();
    for (group, value) in groups.iter().zip(combo) {
        let index = level.iter().position(|n| matches(n, group, value))?;
        path.push(index);
        level = level[index].children();
    }
    Some(path)
}

/// Finds the node addressed by `combo`, walking one depth per value.
pub fn find<'a>(
    tree: &'a [Arc<VariantNode>],
    groups: &[String],
    combo: &[String],
) -> Option<&'a Arc<VariantNode>> {
    let path = locate(tree, groups, combo)?;
    let (&last, parents) = path.split_last()?;

    let mut level = tree;
    for &index in parents {
        level = level[index].children();
    }
    level.get(last)
}

/// Like [`find`], but only succeeds when the addressed node is a leaf.
pub fn find_leaf<'a>(
    tree: &'a [Arc<VariantNode>],
    groups: &[String],
    combo: &[String],
) -> Option<&'a Leaf> {
    find(tree, groups, combo).and_then(|n| n.as_leaf())
}

// ============================================================================
// MUTATION
// ============================================================================

/// Applies `patch` to the leaf addressed by `combo`.
///
/// Only the nodes on the root-to-leaf path are reallocated. If the path does
/// not exist, or ends on a branch, the tree is returned unchanged.
pub fn update_by_path(
    tree: &[Arc<VariantNode>],
    groups: &[String],
    combo: &[String],
    patch: &LeafPatch,
) -> VariantTree {
    locate(tree, groups, combo)
        .and_then(|path| patch_along(tree, &path, patch))
        .unwrap_or_else(|| tree.to_vec())
}

fn patch_along(
    nodes: &[Arc<VariantNode>],
    path: &[usize],
    patch: &LeafPatch,
) -> Option<VariantTree> {
    let (&index, rest) = path.split_first()?;
    let replacement = match nodes.get(index)?.as_ref() {
        VariantNode::Leaf(leaf) if rest.is_empty() => VariantNode::Leaf(patch.apply(leaf)),
        VariantNode::Branch(branch) if !rest.is_empty() => {
            VariantNode::Branch(branch.with_children(patch_along(&branch.children, rest, patch)?))
        }
        _ => return None,
    };

    let mut out = nodes.to_vec();
    out[index] = Arc::new(replacement);
    Some(out)
}

/// Sets every leaf's price and stock. Branches and tree shape are untouched;
/// leaves that already hold the values are shared as they are.
pub fn apply_to_all_leaves(tree: &[Arc<VariantNode>], price: f64, stock: i64) -> VariantTree {
    map_leaves(tree, |_, leaf| {
        if leaf.price == price && leaf.stock == stock {
            return None;
        }
        Some(Leaf {
            price,
            stock,
            ..leaf.clone()
        })
    })
}

/// Rewrites leaves through `f`, which receives each leaf's value path.
///
/// Returning `None` keeps the leaf. Branches are only reallocated when some
/// leaf below them changed.
pub fn map_leaves<F>(tree: &[Arc<VariantNode>], mut f: F) -> VariantTree
where
    F: FnMut(&[&str], &Leaf) -> Option<Leaf>,
{
    let mut path = Vec::new();
    map_level(tree, &mut path, &mut f).unwrap_or_else(|| tree.to_vec())
}

fn map_level<'a, F>(
    nodes: &'a [Arc<VariantNode>],
    path: &mut Vec<&'a str>,
    f: &mut F,
) -> Option<VariantTree>
where
    F: FnMut(&[&str], &Leaf) -> Option<Leaf>,
{
    let mut out: Option<VariantTree> = None;

    for (i, node) in nodes.iter().enumerate() {
        path.push(node.value());
        let replaced = match node.as_ref() {
            VariantNode::Leaf(leaf) => f(path.as_slice(), leaf).map(VariantNode::Leaf),
            VariantNode::Branch(branch) => map_level(&branch.children, path, f)
                .map(|children| VariantNode::Branch(branch.with_children(children))),
        };
        path.pop();

        if let Some(node) = replaced {
            out.get_or_insert_with(|| nodes.to_vec())[i] = Arc::new(node);
        }
    }

    out
}

// ============================================================================
// ENUMERATION
// ============================================================================

/// Every leaf with its value path, in depth-first order.
pub fn leaves(tree: &[Arc<VariantNode>]) -> Vec<(Combination, &Leaf)> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    collect_leaves(tree, &mut path, &mut out);
    out
}

fn collect_leaves<'a>(
    nodes: &'a [Arc<VariantNode>],
    path: &mut Vec<String>,
    out: &mut Vec<(Combination, &'a Leaf)>,
) {
    for node in nodes {
        path.push(node.value().to_string());
        match node.as_ref() {
            VariantNode::Leaf(leaf) => out.push((path.clone(), leaf)),
            VariantNode::Branch(branch) => collect_leaves(&branch.children, path, out),
        }
        path.pop();
    }
}
