// Logging module - Logging infrastructure
use crate::domain::error::{CliError, CliResult};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Effective log level for the configured level and CLI flags
pub fn log_level(configured: &str, verbose: bool, debug: bool) -> &'static str {
    if debug {
        return "debug";
    }
    if verbose {
        return "info";
    }

    match configured.to_lowercase().as_str() {
        "error" => "error",
        "info" => "info",
        "debug" => "debug",
        "trace" => "trace",
        _ => "warn",
    }
}

/// Initialize logging system, `RUST_LOG` takes precedence over `level`
pub fn init_logging(level: &str) -> CliResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("o365cli={},warn", level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .try_init()
        .map_err(|e| CliError::Config {
            message: format!("Failed to initialize logging: {}", e),
        })?;

    tracing::debug!(log_level = level, "o365cli logging system initialized");
    Ok(())
}
