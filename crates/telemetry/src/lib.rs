//! Logging and tracing bootstrap.

use anyhow::anyhow;
use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Build the log filter: `RUST_LOG` wins, otherwise the configured level.
pub fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => level_filter(&settings.log_level),
    }
}

/// Parse a filter directive such as `info` or `bookshelf=debug,tower_http=warn`.
pub fn level_filter(level: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{}': {}", level, e))
}

/// Install the global tracing subscriber.
///
/// Calling this twice is harmless; the second install is skipped.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().flatten_event(true).try_init().is_ok(),
    };

    tracing::info!(
        target: "bookshelf-telemetry",
        format = ?settings.log_format,
        installed,
        "telemetry initialized"
    );

    Ok(())
}
