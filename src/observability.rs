//! Tracing setup for the client core.
//!
//! All store and transport logging goes through `tracing`; the host
//! application calls [`init_tracing`] once at startup. Honors `RUST_LOG`
//! when set.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobdeck=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}
