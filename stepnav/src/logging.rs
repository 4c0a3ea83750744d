//! Diagnostic tracing for the navigator and CLI.
//!
//! Library code only emits `tracing` events (unknown steps, skipped steps,
//! blocked back navigation). Installing a subscriber is up to the host; the
//! CLI does it through [`init`].

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG` env var. Falls back to `default_filter` (the configured
/// `log_filter`) if unset or invalid. Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=stepnav=debug stepnav next --task task.json --from step1
/// ```
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
