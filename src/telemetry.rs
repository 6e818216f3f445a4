//! Tracing subscriber setup.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; `default_level` is used when it is unset or
/// unparsable. `format` is `text` (human-readable) or `json` (one object per
/// line).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(default_level: &str, format: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if format == "json" {
        builder
            .json()
            .with_current_span(true)
            .with_target(true)
            .try_init()
    } else {
        builder.with_target(false).try_init()
    };

    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}
