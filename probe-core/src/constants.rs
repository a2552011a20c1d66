//! Shared constants for the Probe search engine.

/// Probe version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default case sensitivity for path-spec comparison.
pub const DEFAULT_CASE_SENSITIVE_PATHS: bool = true;

/// Maximum number of specs a filter description prints before eliding.
pub const DEFAULT_MAX_DESCRIBED_SPECS: usize = 8;
