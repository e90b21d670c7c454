//! FILENAME: core/variant-editor/src/lib.rs
//! PURPOSE: Product draft editing session for the variant engine.
//! CONTEXT: The engine crate is pure; this crate owns the mutable draft
//! (groups + tree), turns user commands into engine calls, keeps undo/redo
//! history and logs what happened.

pub mod logging;

pub mod config;
pub mod draft;
pub mod error;
pub mod history;

pub use config::EditorConfig;
pub use draft::DraftEditor;
pub use error::EditError;
pub use history::{DraftHistory, DraftSnapshot};
