//! Settings & sync endpoint client
//!
//! Implements [`SettingsApi`] against the media-request server's REST API
//! over the `bridge-traits` transport. The trait is the seam the view-model
//! layer mocks in tests; the server stays authoritative for all state.

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
use core_runtime::config::ClientConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::error::{ApiError, Result};
use crate::models::{
    ApiErrorBody, JellyfinSettings, JellyfinSettingsUpdate, Library, ScanControl, SyncStatus,
};

const SETTINGS_PATH: &str = "/settings/jellyfin";
const LIBRARY_PATH: &str = "/settings/jellyfin/library";
const SYNC_PATH: &str = "/settings/jellyfin/sync";

/// Operations the settings page needs from the server.
///
/// Split into a trait so the view-model layer can be exercised against mocks;
/// [`JellyfinSettingsClient`] is the production implementation.
#[async_trait]
pub trait SettingsApi: Send + Sync {
    /// Fetch the persisted settings snapshot.
    async fn get_settings(&self) -> Result<JellyfinSettings>;

    /// Replace all writable settings fields atomically.
    async fn update_settings(&self, update: &JellyfinSettingsUpdate) -> Result<()>;

    /// Replace the enabled-library set.
    ///
    /// `enable` is the complete target set (set-replacement, not a delta);
    /// an empty slice means "enable none" and omits the parameter entirely.
    async fn set_enabled_libraries(&self, enable: &[String]) -> Result<Vec<Library>>;

    /// Run library discovery, keeping the given libraries enabled.
    ///
    /// Passing the currently active ids stops discovery from silently
    /// disabling them. The same csv/omitted rule as
    /// [`set_enabled_libraries`](SettingsApi::set_enabled_libraries) applies.
    async fn sync_libraries(&self, enable: &[String]) -> Result<Vec<Library>>;

    /// Fetch the current scan status snapshot.
    async fn scan_status(&self) -> Result<SyncStatus>;

    /// Ask the server to start a full scan. Acknowledgement only; the real
    /// state shows up on the next status poll.
    async fn start_scan(&self) -> Result<()>;

    /// Ask the server to cancel the running scan. Acknowledgement only.
    async fn cancel_scan(&self) -> Result<()>;
}

/// HTTP implementation of [`SettingsApi`].
pub struct JellyfinSettingsClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    api_key: Option<String>,
    request_timeout: Duration,
}

impl JellyfinSettingsClient {
    /// Create a client against the given API base URL.
    pub fn new(
        http: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Create a client from a validated [`ClientConfig`].
    pub fn from_config(http: Arc<dyn HttpClient>, config: &ClientConfig) -> Self {
        let mut client = Self::new(http, config.server_url.clone(), config.api_key.clone());
        client.request_timeout = config.request_timeout;
        client
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let request = HttpRequest::new(method, format!("{}{}", self.base_url, path))
            .timeout(self.request_timeout);

        match &self.api_key {
            Some(key) => request.api_key(key.clone()),
            None => request,
        }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self.http.execute(request).await?;
        Self::check_status(response)
    }

    /// Send without retries. Used by the status poll, where a late stale
    /// snapshot is worse than a skipped tick.
    async fn send_no_retry(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self
            .http
            .execute_with_retry(request, RetryPolicy::none())
            .await?;
        Self::check_status(response)
    }

    fn check_status(response: HttpResponse) -> Result<HttpResponse> {
        if response.is_success() {
            return Ok(response);
        }

        // Errors are classified by the server-supplied discriminant, not the
        // HTTP status alone; a missing or malformed body just means "generic".
        let body: ApiErrorBody = serde_json::from_slice(&response.body).unwrap_or_default();
        debug!(
            status = response.status,
            code = body.message.as_deref().unwrap_or("none"),
            "Server rejected request"
        );

        Err(ApiError::Status {
            status: response.status,
            code: body.message,
        })
    }

    fn decode<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T> {
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn library_request(&self, sync: bool, enable: &[String]) -> Result<Vec<Library>> {
        let enable_csv = if enable.is_empty() {
            None
        } else {
            Some(enable.join(","))
        };

        let mut request = self.request(HttpMethod::Get, LIBRARY_PATH);
        if sync {
            request = request.query("sync", "true");
        }
        let request = request.query_opt("enable", enable_csv);

        let response = self.send(request).await?;
        Self::decode(&response)
    }
}

#[async_trait]
impl SettingsApi for JellyfinSettingsClient {
    #[instrument(skip(self))]
    async fn get_settings(&self) -> Result<JellyfinSettings> {
        let response = self.send(self.request(HttpMethod::Get, SETTINGS_PATH)).await?;
        Self::decode(&response)
    }

    #[instrument(skip(self, update))]
    async fn update_settings(&self, update: &JellyfinSettingsUpdate) -> Result<()> {
        let request = self.request(HttpMethod::Post, SETTINGS_PATH).json(update)?;
        self.send(request).await?;
        info!("Updated Jellyfin settings");
        Ok(())
    }

    #[instrument(skip(self), fields(count = enable.len()))]
    async fn set_enabled_libraries(&self, enable: &[String]) -> Result<Vec<Library>> {
        let libraries = self.library_request(false, enable).await?;
        info!(enabled = enable.len(), "Updated library enablement");
        Ok(libraries)
    }

    #[instrument(skip(self), fields(count = enable.len()))]
    async fn sync_libraries(&self, enable: &[String]) -> Result<Vec<Library>> {
        let libraries = self.library_request(true, enable).await?;
        info!(discovered = libraries.len(), "Library discovery finished");
        Ok(libraries)
    }

    async fn scan_status(&self) -> Result<SyncStatus> {
        let request = self.request(HttpMethod::Get, SYNC_PATH);
        let response = self.send_no_retry(request).await?;
        Self::decode(&response)
    }

    #[instrument(skip(self))]
    async fn start_scan(&self) -> Result<()> {
        let request = self
            .request(HttpMethod::Post, SYNC_PATH)
            .json(&ScanControl::start())?;
        self.send(request).await?;
        info!("Requested scan start");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn cancel_scan(&self) -> Result<()> {
        let request = self
            .request(HttpMethod::Post, SYNC_PATH)
            .json(&ScanControl::cancel())?;
        self.send(request).await?;
        info!("Requested scan cancellation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncFailure;
    use bridge_traits::error::Result as BridgeResult;
    use bytes::Bytes;
    use mockall::mock;
    use std::collections::HashMap;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    fn ok_response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from(body.as_bytes().to_vec()),
        }
    }

    fn client(mock: MockHttpClient) -> JellyfinSettingsClient {
        JellyfinSettingsClient::new(
            Arc::new(mock),
            "http://localhost:5055/api/v1",
            Some("test-key".to_string()),
        )
    }

    fn query_value<'a>(request: &'a HttpRequest, key: &str) -> Option<&'a str> {
        request
            .query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[tokio::test]
    async fn test_get_settings_parses_snapshot() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|req| {
                req.url == "http://localhost:5055/api/v1/settings/jellyfin"
                    && req.headers.get("X-Api-Key").map(String::as_str) == Some("test-key")
            })
            .times(1)
            .returning(|_| {
                Ok(ok_response(
                    r#"{
                        "customName": "Home Media",
                        "hostname": "http://jellyfin:8096",
                        "libraries": [{"id": "a", "name": "Movies", "enabled": true}]
                    }"#,
                ))
            });

        let settings = client(mock_http).get_settings().await.unwrap();
        assert_eq!(settings.hostname, "http://jellyfin:8096");
        assert_eq!(settings.libraries.len(), 1);
    }

    #[tokio::test]
    async fn test_set_enabled_libraries_joins_ids() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|req| {
                query_value(req, "enable") == Some("a,b") && query_value(req, "sync").is_none()
            })
            .times(1)
            .returning(|_| Ok(ok_response("[]")));

        client(mock_http)
            .set_enabled_libraries(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_enable_set_omits_parameter() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|req| query_value(req, "enable").is_none())
            .times(1)
            .returning(|_| Ok(ok_response("[]")));

        client(mock_http).set_enabled_libraries(&[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_sync_libraries_sets_sync_flag() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|req| {
                query_value(req, "sync") == Some("true") && query_value(req, "enable") == Some("a")
            })
            .times(1)
            .returning(|_| {
                Ok(ok_response(
                    r#"[{"id": "a", "name": "Movies", "enabled": true}]"#,
                ))
            });

        let libraries = client(mock_http)
            .sync_libraries(&["a".to_string()])
            .await
            .unwrap();
        assert_eq!(libraries.len(), 1);
    }

    #[tokio::test]
    async fn test_error_body_discriminant_is_classified() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 500,
                headers: HashMap::new(),
                body: Bytes::from(r#"{"message": "SYNC_ERROR_NO_LIBRARIES"}"#),
            })
        });

        let err = client(mock_http).sync_libraries(&[]).await.unwrap_err();
        assert_eq!(err.sync_failure(), SyncFailure::NoLibraries);
    }

    #[tokio::test]
    async fn test_error_without_body_is_generic() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 502,
                headers: HashMap::new(),
                body: Bytes::new(),
            })
        });

        let err = client(mock_http).sync_libraries(&[]).await.unwrap_err();
        assert_eq!(err.sync_failure(), SyncFailure::Other);
    }

    #[tokio::test]
    async fn test_update_settings_posts_full_body() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|req| {
                let body = req.body.as_ref().expect("body");
                let json: serde_json::Value = serde_json::from_slice(body).unwrap();
                req.method == HttpMethod::Post
                    && json["customName"] == "Home Media"
                    && json["hostname"] == "jellyfin:8096"
                    && json["externalHostname"] == "media.example.com"
                    && json["jellyfinForgotPasswordUrl"] == "media.example.com/forgot"
            })
            .times(1)
            .returning(|_| Ok(ok_response("{}")));

        let update = JellyfinSettingsUpdate {
            custom_name: "Home Media".to_string(),
            hostname: "jellyfin:8096".to_string(),
            external_hostname: "media.example.com".to_string(),
            forgot_password_url: "media.example.com/forgot".to_string(),
        };

        client(mock_http).update_settings(&update).await.unwrap();
    }

    #[tokio::test]
    async fn test_scan_control_bodies_on_sync_endpoint() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|req| {
                req.url == "http://localhost:5055/api/v1/settings/jellyfin/sync"
                    && req.body.as_ref().map(|b| b.as_ref()) == Some(br#"{"start":true}"#.as_ref())
            })
            .times(1)
            .returning(|_| Ok(ok_response("{}")));

        client(mock_http).start_scan().await.unwrap();
    }
}
