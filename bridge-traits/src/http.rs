//! HTTP Client Abstraction
//!
//! Provides async HTTP operations with retry logic and TLS support.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{BridgeError, Result};

/// HTTP method types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// HTTP request builder
///
/// Query parameters are kept separate from the URL so implementations control
/// the encoding. A parameter added with [`query_opt`](HttpRequest::query_opt)
/// and a `None` value is omitted from the request entirely, never sent as an
/// empty string; several server endpoints treat "absent" and "empty" as
/// different instructions.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Attach an API key as the `X-Api-Key` header
    pub fn api_key(self, key: impl Into<String>) -> Self {
        self.header("X-Api-Key", key)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a query parameter only when a value is present.
    ///
    /// `None` omits the key entirely.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body).map_err(|e| {
            BridgeError::InvalidRequest(format!("JSON serialization failed: {}", e))
        })?;
        self.body = Some(Bytes::from(json));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}

/// HTTP response
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Parse response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            BridgeError::OperationFailed(format!("JSON deserialization failed: {}", e))
        })
    }

    /// Get response body as UTF-8 string
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| BridgeError::OperationFailed(format!("Invalid UTF-8: {}", e)))
    }

    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if response status indicates a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if response status indicates a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_attempts: u32,
    /// Base delay between retries
    pub base_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Whether to use exponential backoff
    pub use_exponential_backoff: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(30),
            use_exponential_backoff: true,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    ///
    /// Polling loops use this: a missed tick is cheaper than a stale snapshot
    /// delivered after three backoff rounds.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

/// Async HTTP client trait
///
/// Abstracts HTTP operations so fetch logic can be exercised against mocks
/// and platform transports can be swapped. Implementations should handle:
/// - Automatic retry with exponential backoff on transient failures
/// - TLS certificate validation
/// - Connection pooling and keep-alive
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpRequest, HttpMethod};
///
/// async fn fetch_status(client: &dyn HttpClient) -> Result<String> {
///     let request = HttpRequest::new(HttpMethod::Get, "http://localhost:5055/api/v1/status");
///     let response = client.execute(request).await?;
///     response.text()
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network connection fails
    /// - TLS validation fails
    /// - Request times out
    /// - Maximum retries exceeded
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Execute an HTTP request with custom retry policy
    async fn execute_with_retry(
        &self,
        request: HttpRequest,
        policy: RetryPolicy,
    ) -> Result<HttpResponse> {
        // Default implementation: just call execute
        // Implementations can override for custom retry logic
        let _ = policy;
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_request_builder() {
        let request = HttpRequest::new(HttpMethod::Get, "http://example.com/api/v1/settings")
            .header("User-Agent", "test")
            .api_key("secret")
            .timeout(Duration::from_secs(30));

        assert_eq!(request.url, "http://example.com/api/v1/settings");
        assert_eq!(request.headers.get("User-Agent"), Some(&"test".to_string()));
        assert_eq!(request.headers.get("X-Api-Key"), Some(&"secret".to_string()));
    }

    #[test]
    fn test_query_opt_omits_missing_values() {
        let request = HttpRequest::new(HttpMethod::Get, "http://example.com/library")
            .query("sync", "true")
            .query_opt("enable", Some("a,b"))
            .query_opt("page", None::<String>);

        assert_eq!(
            request.query,
            vec![
                ("sync".to_string(), "true".to_string()),
                ("enable".to_string(), "a,b".to_string()),
            ]
        );
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = HttpRequest::new(HttpMethod::Post, "http://example.com/sync")
            .json(&serde_json::json!({"start": true}))
            .unwrap();

        assert_eq!(
            request.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert!(request.body.is_some());
    }

    #[test]
    fn test_http_response_status_checks() {
        let response = HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from("test"),
        };

        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn test_retry_policy_none_is_single_attempt() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_attempts, 1);
    }
}
