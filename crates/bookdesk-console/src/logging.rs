//! Subscriber setup for hosts embedding the console.

use bookdesk_config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

use crate::error::{ConsoleError, Result};

/// Builds the event filter. `RUST_LOG` wins over the configured directives.
pub fn filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_filter(&config.filter),
    }
}

fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| ConsoleError::Logging(format!("invalid filter {directives:?}: {e}")))
}

/// Installs the global `tracing` subscriber.
///
/// # Errors
///
/// Fails on an invalid filter, or when a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(config)?);

    let installed = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    installed.map_err(|e| ConsoleError::Logging(e.to_string()))
}
