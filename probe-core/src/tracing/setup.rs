//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Probe tracing/logging system.
///
/// Reads the `PROBE_LOG` environment variable for per-subsystem log levels.
/// Format: `PROBE_LOG=probe_search=debug,probe_core=warn`
///
/// Falls back to `probe=info` if `PROBE_LOG` is not set or is invalid.
///
/// This function is idempotent — calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("PROBE_LOG").unwrap_or_else(|_| EnvFilter::new("probe=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
