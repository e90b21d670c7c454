//! FILENAME: core/variant-engine/src/validate.rs
//! PURPOSE: Consistency checks for trees that come from outside the builder.
//! CONTEXT: Trees produced by `build` are consistent by construction. Trees
//! loaded from a saved product may not be, so loaders run `validate` and
//! decide what to do with the reported issues.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::extractor::extract;
use crate::model::{Combination, VariantNode};

/// One violation of the tree invariants, located by its value path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeIssue {
    /// A leaf sits at a different depth than the first leaf found.
    UnevenDepth { path: Combination, expected: usize },
    /// A node's group name differs from the label of its depth.
    NameMismatch { path: Combination, expected: String, found: String },
    /// Two siblings share a value; `path` is the parent's path.
    DuplicateValue { path: Combination, value: String },
    /// A branch without children.
    EmptyBranch { path: Combination },
    /// No node at this depth carries a group name.
    UnnamedLevel { depth: usize },
}

impl fmt::Display for TreeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeIssue::UnevenDepth { path, expected } => write!(
                f,
                "leaf '{}' is at depth {}, expected {}",
                path.join("/"),
                path.len(),
                expected
            ),
            TreeIssue::NameMismatch { path, expected, found } => write!(
                f,
                "node '{}' belongs to group '{}', expected '{}'",
                path.join("/"),
                found,
                expected
            ),
            TreeIssue::DuplicateValue { path, value } => {
                write!(f, "duplicate value '{}' under '{}'", value, path.join("/"))
            }
            TreeIssue::EmptyBranch { path } => {
                write!(f, "branch '{}' has no children", path.join("/"))
            }
            TreeIssue::UnnamedLevel { depth } => write!(f, "level {} has no group name", depth),
        }
    }
}

/// Reports every invariant violation in `tree`. An empty list means the tree
/// is consistent.
pub fn validate(tree: &[Arc<VariantNode>]) -> Vec<TreeIssue> {
    if tree.is_empty() {
        return Vec::new();
    }

    let labels: Vec<String> = extract(tree).into_iter().map(|g| g.name).collect();
    let issues = labels
        .iter()
        .enumerate()
        .filter(|(_, label)| label.is_empty())
        .map(|(depth, _)| TreeIssue::UnnamedLevel { depth })
        .collect();
    let mut checker = Checker {
        labels,
        leaf_depth: None,
        issues,
    };
    let mut path = Vec::new();
    checker.check_level(tree, &mut path);
    checker.issues
}

pub fn is_consistent(tree: &[Arc<VariantNode>]) -> bool {
    validate(tree).is_empty()
}

struct Checker {
    labels: Vec<String>,
    leaf_depth: Option<usize>,
    issues: Vec<TreeIssue>,
}

impl Checker {
    fn check_level(&mut self, nodes: &[Arc<VariantNode>], path: &mut Vec<String>) {
        let depth = path.len();
        let mut seen: FxHashSet<&str> = FxHashSet::default();

        for node in nodes {
            if !seen.insert(node.value()) {
                self.issues.push(TreeIssue::DuplicateValue {
                    path: path.clone(),
                    value: node.value().to_string(),
                });
            }

            path.push(node.value().to_string());

            if let Some(label) = self.labels.get(depth) {
                if node.name() != label {
                    self.issues.push(TreeIssue::NameMismatch {
                        path: path.clone(),
                        expected: label.clone(),
                        found: node.name().to_string(),
                    });
                }
            }

            match node.as_ref() {
                VariantNode::Leaf(_) => {
                    let expected = *self.leaf_depth.get_or_insert(path.len());
                    if path.len() != expected {
                        self.issues.push(TreeIssue::UnevenDepth {
                            path: path.clone(),
                            expected,
                        });
                    }
                }
                VariantNode::Branch(branch) if branch.children.is_empty() => {
                    self.issues.push(TreeIssue::EmptyBranch { path: path.clone() });
                }
                VariantNode::Branch(branch) => self.check_level(&branch.children, path),
            }

            path.pop();
        }
    }
}
