//! FILENAME: core/variant-editor/src/error.rs

use thiserror::Error;
use variant_format::FormatError;

#[derive(Error, Debug)]
pub enum EditError {
    #[error("Group index {0} out of range")]
    GroupIndexOutOfRange(usize),

    #[error("Duplicate group name: {0}")]
    DuplicateGroupName(String),

    #[error("Duplicate value '{value}' in group '{group}'")]
    DuplicateValue { group: String, value: String },

    #[error("Option value must not be empty")]
    EmptyValue,

    #[error("Value '{value}' not found in group '{group}'")]
    UnknownValue { group: String, value: String },

    #[error("No variant for combination [{}]", .0.join(", "))]
    UnknownCombination(Vec<String>),

    #[error("No variant with id '{0}'")]
    UnknownVariant(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error(transparent)]
    Format(#[from] FormatError),
}
