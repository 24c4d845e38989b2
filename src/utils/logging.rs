//! Logging setup

use tracing_subscriber::EnvFilter;

use crate::domain::errors::DomainError;

/// Levels accepted by `--log-level` and the `[logging]` config table
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Check a configured level name
pub fn parse_level(level: &str) -> Result<tracing::Level, DomainError> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(tracing::Level::TRACE),
        "debug" => Ok(tracing::Level::DEBUG),
        "info" => Ok(tracing::Level::INFO),
        "warn" => Ok(tracing::Level::WARN),
        "error" => Ok(tracing::Level::ERROR),
        other => Err(DomainError::BadArgs(format!(
            "Invalid log level: {}. Valid levels: {}",
            other,
            LOG_LEVELS.join(", ")
        ))),
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set. Calling this more than
/// once keeps the first subscriber.
pub fn init_logging(level: &str, json: bool) -> Result<(), DomainError> {
    let level = parse_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
    Ok(())
}
