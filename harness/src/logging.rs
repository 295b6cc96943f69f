//! Diagnostic tracing setup.
//!
//! Tracing output is never part of a report: logs go to stderr and no
//! artifact hash depends on them.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn`. Compact format on stderr.
/// Calling it a second time in the same process is a no-op.
///
/// ```bash
/// RUST_LOG=gridwalk_search=trace cargo run --bin search_fixture -- detour
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
