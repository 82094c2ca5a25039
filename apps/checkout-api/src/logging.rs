//! Tracing subscriber setup.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages
//! - `RUST_LOG=checkout_service=trace` - Trace the pipeline only
//! - Default: `CHECKOUT_LOG_LEVEL` for everything, with sqlx quieted

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Builds the filter used when `RUST_LOG` is not set.
pub fn default_filter(level: &str) -> String {
    format!("{level},sqlx=warn")
}

/// Installs the global subscriber. Call once, before anything logs.
pub fn init_tracing(level: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
