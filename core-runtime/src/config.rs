//! # Client Configuration Module
//!
//! Provides configuration management for the client core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! [`ClientConfig`] holding the connection and cadence settings every module
//! shares. It enforces fail-fast validation so a bad server URL or a
//! nonsensical poll interval is rejected before anything starts polling.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .server_url("http://localhost:5055/api/v1")
//!     .api_key("secret")
//!     .build()
//!     .expect("Failed to build config");
//!
//! assert_eq!(config.poll_interval.as_millis(), 1000);
//! ```

use crate::error::{Error, Result};
use std::time::Duration;

/// Default status poll cadence.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration shared by the API client and the view-model layer.
///
/// Use [`ClientConfigBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the media-request server API, without a trailing slash
    /// (e.g. `http://localhost:5055/api/v1`)
    pub server_url: String,

    /// API key sent as `X-Api-Key` on every request, if the server requires one
    pub api_key: Option<String>,

    /// Cadence of the scan status poll
    pub poll_interval: Duration,

    /// Per-request timeout applied by the HTTP bridge
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Server URL is present and http(s)
    /// - Poll interval is within a sane band (100ms ..= 60s)
    /// - Request timeout is non-zero
    pub fn validate(&self) -> Result<()> {
        if self.server_url.is_empty() {
            return Err(Error::Config("Server URL cannot be empty".to_string()));
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "Server URL must start with http:// or https://, got '{}'",
                self.server_url
            )));
        }

        if self.poll_interval < Duration::from_millis(100) {
            return Err(Error::Config(
                "Poll interval below 100ms would hammer the status endpoint".to_string(),
            ));
        }

        if self.poll_interval > Duration::from_secs(60) {
            return Err(Error::Config(
                "Poll interval exceeds maximum of 60 seconds".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for constructing [`ClientConfig`] instances.
///
/// Call [`build()`](ClientConfigBuilder::build) to validate and create the
/// final config; missing required fields produce actionable error messages.
#[derive(Default)]
pub struct ClientConfigBuilder {
    server_url: Option<String>,
    api_key: Option<String>,
    poll_interval: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Sets the server API base URL (required).
    ///
    /// A trailing slash is trimmed so endpoint paths can always be appended
    /// with a leading slash.
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.server_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// Sets the API key sent with every request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the scan status poll cadence.
    ///
    /// Default: 1000 ms
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Sets the per-request timeout.
    ///
    /// Default: 30 s
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the final `ClientConfig` instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the server URL is missing or any value fails
    /// [`ClientConfig::validate`].
    pub fn build(self) -> Result<ClientConfig> {
        let server_url = self.server_url.ok_or_else(|| {
            Error::Config("Server URL is required. Use .server_url() to set it.".to_string())
        })?;

        let config = ClientConfig {
            server_url,
            api_key: self.api_key,
            poll_interval: self.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        };

        config.validate()?;

        Ok(config)
    }
}
