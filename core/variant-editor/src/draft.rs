//! FILENAME: core/variant-editor/src/draft.rs
//! Draft Editor - The editing session for one product's variants.
//!
//! Holds the group list and the variant tree of a product draft and applies
//! user commands to them. Every command computes new groups/tree with the
//! engine and replaces the held ones; the previous state goes to the undo
//! history.
//!
//! Structural edits (groups and values) rebuild the tree from the groups.
//! Leaf edits and deletions work on the tree directly.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use variant_engine::{
    apply_to_all_leaves, build, combination_count, combinations, extract, fill_sku_codes,
    find_leaf, group_names, leaves, map_leaves, remove, sku_matrix, update_by_path, Combination,
    Leaf, LeafPatch, NodeId, SkuCodeTables, SkuMatrixView, VariantGroup, VariantNode, VariantTree,
};
use variant_format::ProductPayload;

use crate::config::EditorConfig;
use crate::error::EditError;
use crate::history::{DraftHistory, DraftSnapshot};
use crate::{log_debug, log_enter, log_exit, log_info, log_warn};

#[derive(Debug)]
pub struct DraftEditor {
    config: EditorConfig,
    groups: Vec<VariantGroup>,
    tree: VariantTree,
    history: DraftHistory,
}

impl Default for DraftEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftEditor {
    /// An empty draft with one placeholder group row.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let history = DraftHistory::with_max_size(config.max_history);
        DraftEditor {
            config,
            groups: vec![VariantGroup::placeholder()],
            tree: Vec::new(),
            history,
        }
    }

    /// Opens a saved tree for editing; the groups are recovered from it.
    /// Levels without a group name get a generated `Option <depth>` name.
    pub fn from_tree(tree: VariantTree, config: EditorConfig) -> Self {
        let mut editor = Self::with_config(config);
        editor.groups = name_levels(extract(&tree));
        editor.tree = tree;
        log_info!(
            "DRAFT",
            "opened draft: {} group(s), {} leaf variant(s)",
            editor.groups.len(),
            leaves(&editor.tree).len()
        );
        editor
    }

    pub fn from_payload(payload: &ProductPayload, config: EditorConfig) -> Self {
        Self::from_tree(payload.variants.clone(), config)
    }

    /// Packs the current tree into a payload for saving.
    pub fn to_payload(&self, name: &str, product_code: &str) -> ProductPayload {
        ProductPayload::new(name, product_code).with_variants(self.tree.clone())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn groups(&self) -> &[VariantGroup] {
        &self.groups
    }

    pub fn tree(&self) -> &[Arc<VariantNode>] {
        &self.tree
    }

    /// Names of the open groups, i.e. the tree's depth labels.
    pub fn group_names(&self) -> Vec<String> {
        group_names(&self.groups)
    }

    fn open_groups(&self) -> Vec<VariantGroup> {
        self.groups.iter().filter(|g| g.is_open()).cloned().collect()
    }

    /// Rows of the bulk edit table, in table order.
    pub fn combinations(&self) -> Vec<Combination> {
        combinations(&self.open_groups())
    }

    pub fn matrix(&self) -> SkuMatrixView {
        sku_matrix(&self.tree, &self.groups)
    }

    pub fn leaf(&self, combo: &[String]) -> Option<&Leaf> {
        find_leaf(&self.tree, &self.group_names(), combo)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &DraftHistory {
        &self.history
    }

    // ========================================================================
    // STRUCTURAL EDITS
    // ========================================================================

    fn group(&self, index: usize) -> Result<&VariantGroup, EditError> {
        self.groups.get(index).ok_or(EditError::GroupIndexOutOfRange(index))
    }

    fn check_name_free(&self, name: &str, except: Option<usize>) -> Result<(), EditError> {
        let taken = self
            .groups
            .iter()
            .enumerate()
            .any(|(i, g)| Some(i) != except && !name.is_empty() && g.name == name);
        if taken {
            return Err(EditError::DuplicateGroupName(name.to_string()));
        }
        Ok(())
    }

    /// Appends a group (or fills a trailing placeholder row) and returns its
    /// index. The name may be empty while the row is being edited.
    pub fn add_group(&mut self, name: &str) -> Result<usize, EditError> {
        log_enter!("DRAFT", "add_group", "name={}", name);
        self.check_name_free(name, None)?;

        let mut groups = self.groups.clone();
        let index = match groups.last_mut() {
            Some(last) if *last == VariantGroup::placeholder() => {
                last.name = name.to_string();
                groups.len() - 1
            }
            _ => {
                groups.push(VariantGroup::new(name, Vec::<String>::new()));
                groups.len() - 1
            }
        };

        self.commit_groups(format!("Add group '{}'", name), groups);
        log_exit!("DRAFT", "add_group", "index={}", index);
        Ok(index)
    }

    pub fn rename_group(&mut self, index: usize, name: &str) -> Result<(), EditError> {
        log_enter!("DRAFT", "rename_group", "index={} name={}", index, name);
        let old = self.group(index)?.name.clone();
        self.check_name_free(name, Some(index))?;

        let mut groups = self.groups.clone();
        groups[index].name = name.to_string();
        self.commit_groups(format!("Rename group '{}' to '{}'", old, name), groups);
        log_exit!("DRAFT", "rename_group");
        Ok(())
    }

    /// Removes a group row. The last row is replaced by a placeholder so the
    /// editor always has one.
    pub fn remove_group(&mut self, index: usize) -> Result<VariantGroup, EditError> {
        log_enter!("DRAFT", "remove_group", "index={}", index);
        self.group(index)?;

        let mut groups = self.groups.clone();
        let removed = groups.remove(index);
        if groups.is_empty() {
            groups.push(VariantGroup::placeholder());
        }
        self.commit_groups(format!("Remove group '{}'", removed.name), groups);
        log_exit!("DRAFT", "remove_group", "removed={}", removed.name);
        Ok(removed)
    }

    pub fn add_value(&mut self, index: usize, value: &str) -> Result<(), EditError> {
        log_enter!("DRAFT", "add_value", "index={} value={}", index, value);
        let value = value.trim();
        if value.is_empty() {
            return Err(EditError::EmptyValue);
        }
        let group = self.group(index)?;
        if group.contains_value(value) {
            return Err(EditError::DuplicateValue {
                group: group.name.clone(),
                value: value.to_string(),
            });
        }

        let mut groups = self.groups.clone();
        groups[index].values.push(value.to_string());
        let description = format!("Add value '{}' to '{}'", value, groups[index].name);
        self.commit_groups(description, groups);
        log_exit!("DRAFT", "add_value");
        Ok(())
    }

    pub fn remove_value(&mut self, index: usize, value: &str) -> Result<(), EditError> {
        log_enter!("DRAFT", "remove_value", "index={} value={}", index, value);
        let group = self.group(index)?;
        let position = group
            .values
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| EditError::UnknownValue {
                group: group.name.clone(),
                value: value.to_string(),
            })?;

        let mut groups = self.groups.clone();
        groups[index].values.remove(position);
        let description = format!("Remove value '{}' from '{}'", value, groups[index].name);
        self.commit_groups(description, groups);
        log_exit!("DRAFT", "remove_value");
        Ok(())
    }

    // ========================================================================
    // LEAF EDITS
    // ========================================================================

    /// Patches the leaf addressed by `combo`.
    pub fn set_leaf(&mut self, combo: &[String], patch: &LeafPatch) -> Result<(), EditError> {
        let names = self.group_names();
        if find_leaf(&self.tree, &names, combo).is_none() {
            return Err(EditError::UnknownCombination(combo.to_vec()));
        }

        let tree = update_by_path(&self.tree, &names, combo, patch);
        log_debug!("DRAFT", "set_leaf combo=[{}]", combo.join(", "));
        self.commit(format!("Edit variant {}", combo.join(" / ")), self.groups.clone(), tree);
        Ok(())
    }

    /// Sets the same price and stock on every variant.
    pub fn apply_to_all(&mut self, price: f64, stock: i64) {
        let tree = apply_to_all_leaves(&self.tree, price, stock);
        log_info!("DRAFT", "apply_to_all price={} stock={}", price, stock);
        self.commit_tree("Apply price/stock to all variants", tree);
    }

    /// Deletes the node with `id` and re-derives the groups from what is left.
    pub fn delete_variant(&mut self, id: &NodeId) -> Result<(), EditError> {
        log_enter!("DRAFT", "delete_variant", "id={}", id);
        if !contains_id(&self.tree, id) {
            return Err(EditError::UnknownVariant(id.to_string()));
        }

        let tree = remove(&self.tree, id);
        let groups = name_levels(extract(&tree));
        self.commit(format!("Delete variant '{}'", id), groups, tree);
        log_exit!("DRAFT", "delete_variant");
        Ok(())
    }

    /// Suggests codes for every variant without one.
    pub fn fill_sku_codes(
        &mut self,
        tables: &SkuCodeTables,
        product_code: &str,
        with_sequence: bool,
    ) {
        let tree = fill_sku_codes(&self.tree, tables, product_code, with_sequence);
        log_info!("DRAFT", "fill_sku_codes product_code={}", product_code);
        self.commit_tree("Fill SKU codes", tree);
    }

    // ========================================================================
    // HISTORY
    // ========================================================================

    pub fn undo(&mut self) -> Result<(), EditError> {
        let snapshot = self.history.pop_undo().ok_or(EditError::NothingToUndo)?;
        log_info!("DRAFT", "undo '{}'", snapshot.description);
        let current = self.snapshot(snapshot.description.clone());
        self.history.push_redo(current);
        self.restore(snapshot);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EditError> {
        let snapshot = self.history.pop_redo().ok_or(EditError::NothingToRedo)?;
        log_info!("DRAFT", "redo '{}'", snapshot.description);
        let current = self.snapshot(snapshot.description.clone());
        self.history.push_undo_for_redo(current);
        self.restore(snapshot);
        Ok(())
    }

    fn snapshot(&self, description: String) -> DraftSnapshot {
        DraftSnapshot {
            description,
            groups: self.groups.clone(),
            tree: self.tree.clone(),
        }
    }

    fn restore(&mut self, snapshot: DraftSnapshot) {
        self.groups = snapshot.groups;
        self.tree = snapshot.tree;
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    /// Replaces the draft state, recording the previous one for undo.
    fn commit(&mut self, description: String, groups: Vec<VariantGroup>, tree: VariantTree) {
        let previous = self.snapshot(description);
        self.history.record(previous);
        self.groups = groups;
        self.tree = tree;
    }

    /// Commits a tree-only edit. A tree sharing every root with the current
    /// one is unchanged, so no history entry is recorded for it.
    fn commit_tree(&mut self, description: &str, tree: VariantTree) {
        if same_roots(&self.tree, &tree) {
            log_debug!("DRAFT", "'{}' changed nothing", description);
            return;
        }
        self.commit(description.to_string(), self.groups.clone(), tree);
    }

    /// Rebuilds the tree for new groups and commits both.
    fn commit_groups(&mut self, description: String, groups: Vec<VariantGroup>) {
        match built_combination_count(&groups) {
            Some(count) if count <= self.config.combination_warn_threshold => {}
            Some(count) => log_warn!(
                "DRAFT",
                "{} combinations exceed the warning threshold of {}",
                count,
                self.config.combination_warn_threshold
            ),
            None => log_warn!("DRAFT", "combination count overflows"),
        }

        let mut tree = build(&groups);
        if self.config.carry_over_leaf_data {
            tree = carry_over(&self.tree, &tree);
        }
        self.commit(description, groups, tree);
    }
}

/// Copies editable leaf data from `previous` into `rebuilt` for every
/// combination present in both. Group names come from the rebuilt leaf.
fn carry_over(previous: &[Arc<VariantNode>], rebuilt: &[Arc<VariantNode>]) -> VariantTree {
    let old: FxHashMap<Combination, &Leaf> = leaves(previous).into_iter().collect();
    if old.is_empty() {
        return rebuilt.to_vec();
    }

    map_leaves(rebuilt, |path, leaf| {
        let key: Combination = path.iter().map(|s| s.to_string()).collect();
        old.get(&key).map(|prev| Leaf {
            name: leaf.name.clone(),
            value: leaf.value.clone(),
            ..(*prev).clone()
        })
    })
}

/// Combinations `build` would produce for `groups`: only open groups count.
fn built_combination_count(groups: &[VariantGroup]) -> Option<usize> {
    let open: Vec<VariantGroup> = groups.iter().filter(|g| g.is_open()).cloned().collect();
    combination_count(&open)
}

fn same_roots(a: &[Arc<VariantNode>], b: &[Arc<VariantNode>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
}

/// Names every level that came back without a group name `Option <depth>`
/// (1-based, skipping names already taken). Without a name the level could
/// not be addressed, and the next rebuild would drop it. Node names in the
/// tree are left as loaded; lookups accept unnamed nodes.
fn name_levels(mut groups: Vec<VariantGroup>) -> Vec<VariantGroup> {
    for depth in 0..groups.len() {
        if !groups[depth].name.is_empty() || !groups[depth].has_values() {
            continue;
        }
        let mut n = depth + 1;
        let name = loop {
            let candidate = format!("Option {}", n);
            if !groups.iter().any(|g| g.name == candidate) {
                break candidate;
            }
            n += 1;
        };
        log_warn!("DRAFT", "level {} has no group name, using '{}'", depth, name);
        groups[depth].name = name;
    }
    groups
}

fn contains_id(nodes: &[Arc<VariantNode>], id: &NodeId) -> bool {
    nodes
        .iter()
        .any(|n| n.id() == id || contains_id(n.children(), id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_draft_has_placeholder_row() {
        let editor = DraftEditor::new();
        assert_eq!(editor.groups(), &[VariantGroup::placeholder()]);
        assert!(editor.tree().is_empty());
        assert!(editor.combinations().is_empty());
    }

    #[test]
    fn test_add_group_fills_placeholder() {
        let mut editor = DraftEditor::new();
        assert_eq!(editor.add_group("Color").unwrap(), 0);
        assert_eq!(editor.add_group("Size").unwrap(), 1);
        assert_eq!(editor.groups().len(), 2);
        // Groups without values do not build anything yet.
        assert!(editor.tree().is_empty());
    }

    #[test]
    fn test_carry_over_keeps_prices_when_adding_values() {
        let mut editor = DraftEditor::new();
        editor.add_group("Size").unwrap();
        editor.add_value(0, "S").unwrap();
        editor.set_leaf(&strings(&["S"]), &LeafPatch::price_stock(10.0, 2)).unwrap();

        editor.add_value(0, "M").unwrap();
        assert_eq!(editor.leaf(&strings(&["S"])).unwrap().price, 10.0);
        assert_eq!(editor.leaf(&strings(&["M"])).unwrap().price, 0.0);
    }

    #[test]
    fn test_no_carry_over_when_disabled() {
        let config = EditorConfig {
            carry_over_leaf_data: false,
            ..EditorConfig::default()
        };
        let mut editor = DraftEditor::with_config(config);
        editor.add_group("Size").unwrap();
        editor.add_value(0, "S").unwrap();
        editor.set_leaf(&strings(&["S"]), &LeafPatch::price_stock(10.0, 2)).unwrap();

        editor.add_value(0, "M").unwrap();
        assert_eq!(editor.leaf(&strings(&["S"])).unwrap().price, 0.0);
    }

    #[test]
    fn test_combination_count_ignores_unnamed_groups() {
        let groups = vec![
            VariantGroup::new("Color", ["Red", "Blue"]),
            VariantGroup::new("", ["a", "b", "c"]),
        ];
        assert_eq!(built_combination_count(&groups), Some(2));
        assert_eq!(built_combination_count(&[VariantGroup::placeholder()]), Some(0));
    }

    #[test]
    fn test_name_levels() {
        let groups = name_levels(vec![
            VariantGroup::new("Option 2", ["Red"]),
            VariantGroup::new("", ["S"]),
            VariantGroup::new("Fit", ["Slim"]),
        ]);
        assert_eq!(groups[1].name, "Option 3");
        assert_eq!(groups[0].name, "Option 2");
        let empty = vec![VariantGroup::placeholder()];
        assert_eq!(name_levels(empty.clone()), empty);
    }

    #[test]
    fn test_no_op_edits_skip_history() {
        let mut editor = DraftEditor::new();
        editor.add_group("Size").unwrap();
        editor.add_value(0, "S").unwrap();
        let before = editor.history().stack_sizes();

        editor.apply_to_all(0.0, 0);
        assert_eq!(editor.history().stack_sizes(), before);

        editor.apply_to_all(4.0, 1);
        assert_eq!(editor.history().stack_sizes().0, before.0 + 1);
    }

    #[test]
    fn test_contains_id() {
        let tree = build(&[VariantGroup::new("Size", ["S"])]);
        let tree = update_by_path(
            &tree,
            &strings(&["Size"]),
            &strings(&["S"]),
            &LeafPatch {
                id: Some(NodeId::new("s")),
                ..LeafPatch::default()
            },
        );
        assert!(contains_id(&tree, &NodeId::new("s")));
        assert!(!contains_id(&tree, &NodeId::new("m")));
    }
}
