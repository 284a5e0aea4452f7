//! Tracing subscriber setup for the `ledgerlink` binary.
//!
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{LedgerLinkError, LogConfig, LogFormat};

/// Install the global subscriber. Only the first call in a process succeeds.
pub fn init_tracing(config: &LogConfig) -> Result<(), LedgerLinkError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let registry =
        tracing_subscriber::registry().with(env_filter(&config.level, rust_log.as_deref()));

    let installed = match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    };

    installed.map_err(|e| {
        LedgerLinkError::Logging(format!(
            "failed to initialize {} tracing subscriber: {e}",
            config.format
        ))
    })
}

/// Directives from `rust_log` when present and parseable, else `level`.
fn env_filter(level: &str, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}
