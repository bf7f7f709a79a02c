//! Logging initialization.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `log_level` accepts any `EnvFilter` directive (`info`,
/// `shortlink_backend=debug,tower_http=info`, ...). `log_format` is either
/// `text` or `json`.
///
/// # Errors
///
/// Returns an error if the filter directive is malformed or a subscriber
/// is already installed.
pub fn init(log_level: &str, log_format: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if log_format == "json" {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    } else {
        builder.try_init().map_err(|e| anyhow::anyhow!(e))?;
    }

    Ok(())
}
