//! Foundation crate for the Probe search engine.
//!
//! Carries the concerns shared by every Probe crate:
//! - **types** — typed identifiers and performance collection re-exports
//! - **errors** — thiserror enums with structured error codes
//! - **config** — serde/toml configuration with effective-value accessors
//! - **tracing** — subscriber setup driven by `PROBE_LOG`
//! - **constants** — version string and default knobs

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;
