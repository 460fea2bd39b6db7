//! Development-time tracing for debugging plan builds.
//!
//! Diagnostics go to stderr so that `loadplan build` can stream plan JSON on
//! stdout without interleaving.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber for development logging.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset, so the
/// ignored-body warning is visible without opting in.
///
/// # Example
/// ```bash
/// RUST_LOG=loadplan=debug loadplan build scenario.toml
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
