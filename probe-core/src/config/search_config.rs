//! Search subsystem configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the search subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// Case-sensitive path-spec comparison. Default: true.
    pub case_sensitive_paths: Option<bool>,
}

impl SearchConfig {
    /// Returns the effective case sensitivity, defaulting to case-sensitive.
    pub fn effective_case_sensitive(&self) -> bool {
        self.case_sensitive_paths
            .unwrap_or(constants::DEFAULT_CASE_SENSITIVE_PATHS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_case_sensitive() {
        let config = SearchConfig::default();
        assert!(config.effective_case_sensitive());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = SearchConfig {
            case_sensitive_paths: Some(false),
        };
        assert!(!config.effective_case_sensitive());
    }
}
