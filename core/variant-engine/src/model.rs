//! FILENAME: core/variant-engine/src/model.rs
//! Variant Model - The data shapes shared by every engine operation.
//!
//! This module contains the types needed to DESCRIBE a product's option space:
//! - `VariantGroup`: one named option axis with its ordered values (the flat form)
//! - `VariantNode`: a node of the nested variant tree (the persisted form)
//! - `Combination`: one root-to-leaf path expressed as a value tuple
//!
//! Trees are persistent: children are held behind `Arc`, so an edit only
//! allocates the nodes on the edited path and shares everything else.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A forest of variant nodes. The first level holds one node per value of the
/// first option group.
pub type VariantTree = Vec<Arc<VariantNode>>;

/// One value per group, in group order.
pub type Combination = Vec<String>;

// ============================================================================
// IDENTITY
// ============================================================================

/// Opaque node identity assigned by whoever persists the tree.
/// The empty id marks a node that has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    /// The id carried by nodes that were never persisted.
    pub fn unassigned() -> Self {
        NodeId(String::new())
    }

    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// GROUPS
// ============================================================================

/// One selectable option axis, e.g. `Color: [Red, Blue]`.
/// Value order is significant: it drives tree order and table row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantGroup {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl VariantGroup {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VariantGroup {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The empty row an editor shows when a product has no variants yet.
    pub fn placeholder() -> Self {
        VariantGroup::default()
    }

    /// A group takes part in tree building only once it is named and has values.
    pub fn is_open(&self) -> bool {
        !self.name.is_empty() && !self.values.is_empty()
    }

    pub fn has_values(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Filters a group list down to the groups that participate in building.
pub fn open_groups(groups: &[VariantGroup]) -> Vec<&VariantGroup> {
    groups.iter().filter(|g| g.is_open()).collect()
}

/// Group names of the open groups, in depth order.
/// This is the `groups` argument expected by the path accessors.
pub fn group_names(groups: &[VariantGroup]) -> Vec<String> {
    groups
        .iter()
        .filter(|g| g.is_open())
        .map(|g| g.name.clone())
        .collect()
}

// ============================================================================
// NODES
// ============================================================================

/// A terminal node: one purchasable SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaf {
    #[serde(default)]
    pub id: NodeId,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_code: Option<String>,
}

impl Leaf {
    /// Creates a leaf with zero price and stock and no image.
    pub fn new(id: NodeId, name: impl Into<String>, value: impl Into<String>) -> Self {
        Leaf {
            id,
            name: name.into(),
            value: value.into(),
            price: 0.0,
            stock: 0,
            image: String::new(),
            sku_code: None,
        }
    }
}

/// An inner node: one option value with the next group's values below it.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub id: NodeId,
    pub name: String,
    pub value: String,
    pub children: Vec<Arc<VariantNode>>,
}

impl Branch {
    pub fn new(
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
        children: Vec<Arc<VariantNode>>,
    ) -> Self {
        Branch {
            id,
            name: name.into(),
            value: value.into(),
            children,
        }
    }

    /// Same identity and label, new children.
    pub fn with_children(&self, children: Vec<Arc<VariantNode>>) -> Self {
        Branch {
            id: self.id.clone(),
            name: self.name.clone(),
            value: self.value.clone(),
            children,
        }
    }
}

/// A node of the variant tree. Price and stock exist only on leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NodeRepr", into = "NodeRepr")]
pub enum VariantNode {
    Branch(Branch),
    Leaf(Leaf),
}

impl VariantNode {
    pub fn id(&self) -> &NodeId {
        match self {
            VariantNode::Branch(b) => &b.id,
            VariantNode::Leaf(l) => &l.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            VariantNode::Branch(b) => &b.name,
            VariantNode::Leaf(l) => &l.name,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            VariantNode::Branch(b) => &b.value,
            VariantNode::Leaf(l) => &l.value,
        }
    }

    /// Children of a branch; leaves have none.
    pub fn children(&self) -> &[Arc<VariantNode>] {
        match self {
            VariantNode::Branch(b) => &b.children,
            VariantNode::Leaf(_) => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, VariantNode::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            VariantNode::Leaf(l) => Some(l),
            VariantNode::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            VariantNode::Branch(b) => Some(b),
            VariantNode::Leaf(_) => None,
        }
    }

    /// Turns this node into a default leaf, keeping id, name and value.
    /// Any price, stock or image held before is dropped.
    pub fn to_default_leaf(&self) -> Leaf {
        Leaf::new(self.id().clone(), self.name(), self.value())
    }
}

impl From<Leaf> for VariantNode {
    fn from(leaf: Leaf) -> Self {
        VariantNode::Leaf(leaf)
    }
}

impl From<Branch> for VariantNode {
    fn from(branch: Branch) -> Self {
        VariantNode::Branch(branch)
    }
}

// ============================================================================
// LEAF PATCH
// ============================================================================

/// A partial update of a leaf's editable fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafPatch {
    #[serde(default)]
    pub id: Option<NodeId>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub sku_code: Option<String>,
}

impl LeafPatch {
    pub fn price_stock(price: f64, stock: i64) -> Self {
        LeafPatch {
            price: Some(price),
            stock: Some(stock),
            ..LeafPatch::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.image.is_none()
            && self.sku_code.is_none()
    }

    /// Returns a copy of `leaf` with the patched fields replaced.
    pub fn apply(&self, leaf: &Leaf) -> Leaf {
        let mut patched = leaf.clone();
        if let Some(id) = &self.id {
            patched.id = id.clone();
        }
        if let Some(price) = self.price {
            patched.price = price;
        }
        if let Some(stock) = self.stock {
            patched.stock = stock;
        }
        if let Some(image) = &self.image {
            patched.image = image.clone();
        }
        if let Some(code) = &self.sku_code {
            patched.sku_code = Some(code.clone());
        }
        patched
    }
}

// ============================================================================
// WIRE REPRESENTATION
// ============================================================================

/// Flat JSON shape of a node as the catalog backend stores it.
/// A node with a non-empty `children` array is a branch; anything else is a leaf.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRepr {
    #[serde(default)]
    id: NodeId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Arc<VariantNode>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sku_code: Option<String>,
}

impl From<NodeRepr> for VariantNode {
    fn from(repr: NodeRepr) -> Self {
        match repr.children {
            Some(children) if !children.is_empty() => {
                VariantNode::Branch(Branch::new(repr.id, repr.name, repr.value, children))
            }
            _ => VariantNode::Leaf(Leaf {
                id: repr.id,
                name: repr.name,
                value: repr.value,
                price: repr.price.unwrap_or(0.0),
                stock: repr.stock.unwrap_or(0),
                image: repr.image.unwrap_or_default(),
                sku_code: repr.sku_code,
            }),
        }
    }
}

impl From<VariantNode> for NodeRepr {
    fn from(node: VariantNode) -> Self {
        match node {
            VariantNode::Branch(b) => NodeRepr {
                id: b.id,
                name: b.name,
                value: b.value,
                children: Some(b.children),
                price: None,
                stock: None,
                image: None,
                sku_code: None,
            },
            VariantNode::Leaf(l) => NodeRepr {
                id: l.id,
                name: l.name,
                value: l.value,
                children: None,
                price: Some(l.price),
                stock: Some(l.stock),
                image: Some(l.image),
                sku_code: l.sku_code,
            },
        }
    }
}
