//! FILENAME: core/variant-format/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid variant tree: {0}")]
    InvalidTree(String),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),
}
