//! Logging
//!
//! Structured logging via the `tracing` crate: configurable level and output
//! format, UTC timestamps, `RUST_LOG` taking precedence when set.

use crate::error::ViewError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Fails if the level is unparseable or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ViewError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|err| {
            ViewError::ConfigError(format!("invalid log level {:?}: {}", config.level, err))
        })?;

    let registry = Registry::default().with(filter);
    let result = match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()))
            .try_init(),
        _ => registry
            .with(fmt::layer().with_timer(ChronoUtc::rfc_3339()))
            .try_init(),
    };

    result.map_err(|err| ViewError::ConfigError(format!("failed to initialize logging: {}", err)))
}
