//! # Logging & Tracing Infrastructure
//!
//! Configures the `tracing-subscriber` stack used across the workspace:
//! - Pretty, JSON and compact output formats
//! - Module-level filtering via `EnvFilter` (`RUST_LOG` or an explicit string)
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LoggingConfig, LogFormat};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Pretty)
//!     .with_filter("core_settings=debug,core_api=info");
//!
//! init_logging(config).expect("Failed to initialize logging");
//!
//! tracing::info!("Client core started");
//! ```

use crate::error::{Error, Result};
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact format for production
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Minimum log level when no filter is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Minimum log level applied when no custom filter is set
    pub level: LogLevel,
    /// Custom filter string (e.g., "core_settings=debug,core_api=trace").
    /// Takes precedence over `level` and `RUST_LOG`.
    pub filter: Option<String>,
    /// Display target module in logs
    pub display_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::Info,
            filter: None,
            display_target: true,
        }
    }
}

impl LoggingConfig {
    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the fallback log level
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set a custom filter string
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        match &self.filter {
            Some(custom) => EnvFilter::try_new(custom)
                .map_err(|e| Error::Config(format!("Invalid log filter '{}': {}", custom, e))),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error when the filter string is invalid or a global subscriber
/// has already been installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(config.display_target),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(config.display_target),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(config.display_target),
            )
            .try_init(),
    };

    result.map_err(|e| Error::Internal(format!("Failed to initialize logging: {}", e)))
}
