//! Tracing initialization (fmt subscriber with env-filter).
//!
//! Log verbosity is controlled through `RUST_LOG`; when unset the filter
//! defaults to `info`.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process.
pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
