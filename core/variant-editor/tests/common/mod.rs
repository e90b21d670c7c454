//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for draft editor integration tests.

#![allow(dead_code)]

use variant_editor::{DraftEditor, EditorConfig};

/// Test harness wrapping one editing session.
pub struct TestHarness {
    pub editor: DraftEditor,
}

impl TestHarness {
    /// An empty draft.
    pub fn new() -> Self {
        TestHarness {
            editor: DraftEditor::new(),
        }
    }

    pub fn with_config(config: EditorConfig) -> Self {
        TestHarness {
            editor: DraftEditor::with_config(config),
        }
    }

    /// A draft with Color [Red, Blue] x Size [S, M].
    pub fn with_apparel() -> Self {
        let mut harness = Self::new();
        harness.populate(&ApparelFixture::groups());
        harness
    }

    /// Adds groups and values through editor commands.
    pub fn populate(&mut self, groups: &[(&str, &[&str])]) {
        for (name, values) in groups {
            let index = self.editor.add_group(name).unwrap();
            for value in values.iter() {
                self.editor.add_value(index, value).unwrap();
            }
        }
    }

    pub fn leaf_price(&self, combo: &[&str]) -> Option<f64> {
        self.editor.leaf(&combo_of(combo)).map(|l| l.price)
    }

    pub fn leaf_stock(&self, combo: &[&str]) -> Option<i64> {
        self.editor.leaf(&combo_of(combo)).map(|l| l.stock)
    }
}

pub fn combo_of(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Apparel option space used across tests.
pub struct ApparelFixture;

impl ApparelFixture {
    pub fn groups() -> Vec<(&'static str, &'static [&'static str])> {
        vec![("Color", &["Red", "Blue"][..]), ("Size", &["S", "M"][..])]
    }

    pub fn combinations() -> Vec<Vec<String>> {
        vec![
            combo_of(&["Red", "S"]),
            combo_of(&["Red", "M"]),
            combo_of(&["Blue", "S"]),
            combo_of(&["Blue", "M"]),
        ]
    }
}
