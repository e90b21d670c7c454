//! FILENAME: core/variant-format/src/lib.rs
//! Variant Format Module
//!
//! Reads and writes the JSON product payload that carries a variant tree,
//! and loads the SKU code tables used by the suggester.

mod code_tables;
mod error;
mod payload;

pub use code_tables::{code_tables_from_str, load_code_tables};
pub use error::FormatError;
pub use payload::{
    check_payload, payload_from_str, payload_to_string, read_payload, write_payload,
    ProductPayload, PAYLOAD_VERSION,
};
