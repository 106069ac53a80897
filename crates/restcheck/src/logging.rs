//! Structured logging with tracing
//!
//! Logs go to stderr so reports on stdout stay machine-readable.

use anyhow::{Result, anyhow, bail};
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a full `EnvFilter` directive
pub const LOG_ENV_VAR: &str = "RESTCHECK_LOG";

/// Initialize logging; `RESTCHECK_LOG` takes precedence over `level`
pub fn init_logging(level: &str, json_format: bool) -> Result<()> {
    let level = parse_log_level(level)?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    // The layer types differ, so each format gets its own branch
    let registry = Registry::default().with(filter);
    let initialized = if json_format {
        let stderr = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true);
        registry.with(stderr).try_init()
    } else {
        let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);
        registry.with(stderr).try_init()
    };
    initialized.map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    debug!("Logging initialized with level: {}", level);
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => bail!("Invalid log level: {level}. Use trace, debug, info, warn, or error"),
    }
}
