//! FILENAME: core/variant-editor/src/config.rs
//! PURPOSE: Tunables for a draft editing session.

use serde::{Deserialize, Serialize};
use variant_format::FormatError;

use crate::error::EditError;

/// Default number of undo steps kept per draft.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Combination count above which structural edits log a warning.
pub const DEFAULT_COMBINATION_WARN_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Undo steps kept; older steps are dropped.
    pub max_history: usize,

    /// Copy price/stock/image/id/code from the previous tree into rebuilt
    /// leaves whose combination still exists.
    pub carry_over_leaf_data: bool,

    pub combination_warn_threshold: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            max_history: DEFAULT_MAX_HISTORY,
            carry_over_leaf_data: true,
            combination_warn_threshold: DEFAULT_COMBINATION_WARN_THRESHOLD,
        }
    }
}

impl EditorConfig {
    /// Parses a config object; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, EditError> {
        serde_json::from_str(json).map_err(|e| EditError::Format(FormatError::Json(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = EditorConfig::from_json_str(r#"{ "maxHistory": 5 }"#).unwrap();
        assert_eq!(config.max_history, 5);
        assert!(config.carry_over_leaf_data);
        assert_eq!(config.combination_warn_threshold, DEFAULT_COMBINATION_WARN_THRESHOLD);
    }

    #[test]
    fn test_invalid_config() {
        let err = EditorConfig::from_json_str(r#"{ "maxHistory": "lots" }"#).unwrap_err();
        assert!(matches!(err, EditError::Format(FormatError::Json(_))));
    }
}
