//! Structured logging setup.

use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for structured logging.
///
/// Respects `RUST_LOG`; defaults to info-level output for this crate.
/// Safe to call more than once — later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smartsales_client=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}
