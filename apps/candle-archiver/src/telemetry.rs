//! Tracing Setup
//!
//! Installs the global `tracing` subscriber for the batch job. Log lines go to
//! stderr; stdout carries only the final response document.
//!
//! # Configuration
//!
//! - `RUST_LOG`: filter directives; when unset, `candle_archiver={level}` from
//!   `observability.logging.level`
//! - `observability.logging.format`: `json` (default) or `pretty`
//!
//! # Usage
//!
//! ```rust,ignore
//! use candle_archiver::config::LoggingConfig;
//! use candle_archiver::telemetry::init_tracing;
//!
//! init_tracing(&LoggingConfig::default())?;
//! ```

use tracing_subscriber::EnvFilter;

/// Error returned when a global subscriber is already installed.
pub type TelemetryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Filter used when `RUST_LOG` is unset.
#[must_use]
pub fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("candle_archiver={level}"))
        .unwrap_or_else(|_| EnvFilter::new("candle_archiver=info"))
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns error if a global subscriber has already been set.
pub fn init_tracing(config: &crate::config::LoggingConfig) -> Result<(), TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&config.level));

    if config.is_pretty() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .pretty()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .json()
            .try_init()
    }
}
