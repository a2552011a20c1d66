//! Probe configuration: serde-backed, loaded from TOML.

pub mod search_config;

pub use search_config::SearchConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level Probe configuration.
///
/// All sections are optional; missing sections take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProbeConfig {
    /// Search subsystem configuration.
    pub search: SearchConfig,
}

impl ProbeConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
