//! FILENAME: core/variant-engine/src/prune.rs
//! PURPOSE: Removes a node from the variant tree by identity.
//! CONTEXT: A branch that loses its last child turns back into a leaf with
//! zero price and stock, so the tree never holds a childless branch.
//! Values held by that leaf before it became a branch are not restored.

use std::sync::Arc;

use crate::model::{NodeId, VariantNode, VariantTree};

/// Removes the node whose id equals `target` from anywhere in `tree`.
///
/// Within each sibling list only the first match is dropped; ids are expected
/// to be unique. Subtrees that do not contain the target are returned as the
/// same `Arc`.
pub fn remove(tree: &[Arc<VariantNode>], target: &NodeId) -> VariantTree {
    prune_level(tree, target).unwrap_or_else(|| tree.to_vec())
}

/// Returns `None` when nothing at or below this level matched.
fn prune_level(nodes: &[Arc<VariantNode>], target: &NodeId) -> Option<VariantTree> {
    let dropped = nodes.iter().position(|n| n.id() == target);
    let mut changed = dropped.is_some();
    let mut out = Vec::with_capacity(nodes.len());

    for (i, node) in nodes.iter().enumerate() {
        if Some(i) == dropped {
            continue;
        }
        match node.as_ref() {
            VariantNode::Branch(branch) => match prune_level(&branch.children, target) {
                Some(children) if children.is_empty() => {
                    out.push(Arc::new(VariantNode::Leaf(node.to_default_leaf())));
                    changed = true;
                }
                Some(children) => {
                    out.push(Arc::new(VariantNode::Branch(branch.with_children(children))));
                    changed = true;
                }
                None => out.push(Arc::clone(node)),
            },
            VariantNode::Leaf(_) => out.push(Arc::clone(node)),
        }
    }

    changed.then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Branch, Leaf};

    fn leaf(id: &str, name: &str, value: &str, price: f64, stock: i64) -> Arc<VariantNode> {
        let mut l = Leaf::new(NodeId::new(id), name, value);
        l.price = price;
        l.stock = stock;
        Arc::new(VariantNode::Leaf(l))
    }

    fn branch(
        id: &str,
        name: &str,
        value: &str,
        children: Vec<Arc<VariantNode>>,
    ) -> Arc<VariantNode> {
        Arc::new(VariantNode::Branch(Branch::new(NodeId::new(id), name, value, children)))
    }

    fn fixture() -> VariantTree {
        vec![
            branch(
                "red",
                "Color",
                "Red",
                vec![
                    leaf("red-s", "Size", "S", 10.0, 1),
                    leaf("red-m", "Size", "M", 11.0, 2),
                ],
            ),
            branch("blue", "Color", "Blue", vec![leaf("blue-s", "Size", "S", 12.0, 3)]),
        ]
    }

    #[test]
    fn test_remove_leaf_keeps_siblings() {
        let tree = fixture();
        let pruned = remove(&tree, &NodeId::new("red-m"));

        assert_eq!(pruned[0].children().len(), 1);
        assert_eq!(pruned[0].children()[0].value(), "S");
        assert!(Arc::ptr_eq(&tree[1], &pruned[1]));
        assert!(Arc::ptr_eq(&tree[0].children()[0], &pruned[0].children()[0]));
    }

    #[test]
    fn test_remove_last_child_normalizes_to_leaf() {
        let tree = fixture();
        let pruned = remove(&tree, &NodeId::new("blue-s"));

        let blue = pruned[1].as_leaf().expect("Blue should become a leaf");
        assert_eq!(blue.id, NodeId::new("blue"));
        assert_eq!(blue.value, "Blue");
        assert_eq!(blue.price, 0.0);
        assert_eq!(blue.stock, 0);
        assert_eq!(blue.image, "");
        assert!(pruned[1].children().is_empty());
    }

    #[test]
    fn test_remove_top_level_node() {
        let tree = fixture();
        let pruned = remove(&tree, &NodeId::new("red"));
        assert_eq!(pruned.len(), 1);
        assert!(Arc::ptr_eq(&tree[1], &pruned[0]));
    }

    #[test]
    fn test_remove_unknown_id_is_unchanged() {
        let tree = fixture();
        let pruned = remove(&tree, &NodeId::new("nope"));
        assert!(tree.iter().zip(&pruned).all(|(a, b)| Arc::ptr_eq(a, b)));
    }

    #[test]
    fn test_remove_cascades_through_levels() {
        let c = leaf("c", "C", "c", 4.0, 4);
        let tree = vec![branch("a", "A", "a", vec![branch("b", "B", "b", vec![c])])];
        let pruned = remove(&tree, &NodeId::new("c"));
        // Only the direct parent normalizes; the grandparent keeps its branch.
        let a = pruned[0].as_branch().unwrap();
        assert!(a.children[0].is_leaf());
        assert_eq!(a.children[0].id(), &NodeId::new("b"));
    }

    #[test]
    fn test_remove_last_root_gives_empty_tree() {
        let tree = vec![leaf("only", "Size", "S", 1.0, 1)];
        assert!(remove(&tree, &NodeId::new("only")).is_empty());
    }
}
