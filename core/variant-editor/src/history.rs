//! FILENAME: core/variant-editor/src/history.rs
//! PURPOSE: Undo/Redo history for a product draft.
//! CONTEXT: Stores whole-draft snapshots. Trees share unmodified subtrees, so
//! a snapshot costs roughly the nodes that changed, not the whole tree.

use std::collections::VecDeque;

use variant_engine::{VariantGroup, VariantTree};

use crate::config::DEFAULT_MAX_HISTORY;

/// The draft state before one edit.
#[derive(Debug, Clone)]
pub struct DraftSnapshot {
    /// Human-readable description (e.g., "Add value 'XL' to 'Size'")
    pub description: String,
    pub groups: Vec<VariantGroup>,
    pub tree: VariantTree,
}

/// The history stack for undo/redo.
#[derive(Debug)]
pub struct DraftHistory {
    /// Snapshots that can be restored by undo (most recent at back)
    undo_stack: VecDeque<DraftSnapshot>,
    /// Snapshots that can be restored by redo (most recent at back)
    redo_stack: VecDeque<DraftSnapshot>,
    max_size: usize,
}

impl DraftHistory {
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_HISTORY)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        DraftHistory {
            undo_stack: VecDeque::with_capacity(max_size.min(DEFAULT_MAX_HISTORY)),
            redo_stack: VecDeque::new(),
            max_size,
        }
    }

    /// Records the state before a new edit. Clears redo, since the redo
    /// branch no longer follows from the current state.
    pub fn record(&mut self, snapshot: DraftSnapshot) {
        self.redo_stack.clear();
        self.push_undo(snapshot);
    }

    /// Pushes a snapshot for undo without clearing redo (used while redoing).
    pub fn push_undo_for_redo(&mut self, snapshot: DraftSnapshot) {
        self.push_undo(snapshot);
    }

    fn push_undo(&mut self, snapshot: DraftSnapshot) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
    }

    pub fn pop_undo(&mut self) -> Option<DraftSnapshot> {
        self.undo_stack.pop_back()
    }

    pub fn push_redo(&mut self, snapshot: DraftSnapshot) {
        self.redo_stack.push_back(snapshot);
        while self.redo_stack.len() > self.max_size {
            self.redo_stack.pop_front();
        }
    }

    pub fn pop_redo(&mut self) -> Option<DraftSnapshot> {
        self.redo_stack.pop_back()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Description of the edit the next undo would revert.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|s| s.description.as_str())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(|s| s.description.as_str())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// (undo count, redo count)
    pub fn stack_sizes(&self) -> (usize, usize) {
        (self.undo_stack.len(), self.redo_stack.len())
    }
}

impl Default for DraftHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(description: &str) -> DraftSnapshot {
        DraftSnapshot {
            description: description.to_string(),
            groups: vec![VariantGroup::placeholder()],
            tree: Vec::new(),
        }
    }

    #[test]
    fn test_record_and_undo() {
        let mut history = DraftHistory::new();
        history.record(snapshot("Add group"));

        assert!(history.can_undo());
        assert_eq!(history.undo_description(), Some("Add group"));
        assert_eq!(history.pop_undo().unwrap().description, "Add group");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_redo_cleared_on_new_record() {
        let mut history = DraftHistory::new();
        history.push_redo(snapshot("Undone"));
        assert!(history.can_redo());

        history.record(snapshot("New edit"));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_push_undo_for_redo_preserves_redo() {
        let mut history = DraftHistory::new();
        history.push_redo(snapshot("A"));
        history.push_redo(snapshot("B"));
        history.pop_redo();

        history.push_undo_for_redo(snapshot("B"));
        assert!(history.can_redo());
        assert_eq!(history.redo_description(), Some("A"));
    }

    #[test]
    fn test_max_size_enforcement() {
        let mut history = DraftHistory::with_max_size(3);
        for i in 0..5 {
            history.record(snapshot(&format!("edit {}", i)));
        }
        assert_eq!(history.stack_sizes(), (3, 0));
        assert_eq!(history.undo_description(), Some("edit 4"));
    }

    #[test]
    fn test_zero_size_keeps_nothing() {
        let mut history = DraftHistory::with_max_size(0);
        history.record(snapshot("edit"));
        assert!(!history.can_undo());
    }
}
