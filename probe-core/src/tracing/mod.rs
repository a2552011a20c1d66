//! Tracing setup for Probe.

pub mod setup;

pub use setup::init_tracing;
