//! Configuration errors.

use std::path::PathBuf;

use super::error_code::{self, ProbeErrorCode};

/// Errors that can occur while loading or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl ProbeErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            Self::Parse { .. } => error_code::CONFIG_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_string_includes_code_and_message() {
        let err = ConfigError::Parse {
            path: PathBuf::from("probe.toml"),
            message: "expected table".to_string(),
        };
        let rendered = err.host_string();
        assert!(rendered.starts_with("[CONFIG_ERROR]"));
        assert!(rendered.contains("probe.toml"));
    }
}
