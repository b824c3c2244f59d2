//! Wire data model for the settings and sync endpoints.
//!
//! Field names follow the server's camelCase JSON convention.

use serde::{Deserialize, Serialize};

/// A media library exposed by the external media server.
///
/// The id is opaque and unique within one server. Enablement is the only
/// field the client can change, and only through the enable endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub id: String,
    pub name: String,
    pub enabled: bool,
}

/// Snapshot of the background scan, as reported by the sync endpoint.
///
/// The server owns the `Idle -> Running -> (Completed | Cancelled) -> Idle`
/// lifecycle; the client only renders whatever the latest snapshot says.
/// While `running` is true the server guarantees `progress <= total`. When
/// `running` is false the counters are stale leftovers from the previous run
/// and must not be shown as a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub running: bool,
    #[serde(default)]
    pub progress: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_library: Option<Library>,
    #[serde(default)]
    pub libraries: Vec<Library>,
}

impl SyncStatus {
    /// Progress as a rounded percentage, or `None` when no scan is running.
    ///
    /// A zero total reports 0%; the client never clamps, the `total` bound is
    /// the server's responsibility.
    pub fn percent_complete(&self) -> Option<u8> {
        if !self.running {
            return None;
        }

        if self.total == 0 {
            return Some(0);
        }

        Some(((self.progress as f64 / self.total as f64) * 100.0).round() as u8)
    }

    /// Number of libraries strictly after the current one, matched by id.
    ///
    /// 0 when there is no current library or it is not in the list.
    pub fn remaining(&self) -> usize {
        let Some(current) = &self.current_library else {
            return 0;
        };

        match self.libraries.iter().position(|lib| lib.id == current.id) {
            Some(position) => self.libraries.len() - position - 1,
            None => 0,
        }
    }
}

/// Persisted Jellyfin connection settings, as read from the server.
///
/// `libraries` is read-only in this snapshot; toggling goes through the
/// enable endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JellyfinSettings {
    #[serde(default)]
    pub custom_name: Option<String>,
    /// Internal URL of the media server
    pub hostname: String,
    /// Externally reachable URL, if different from the internal one
    #[serde(default)]
    pub external_hostname: Option<String>,
    #[serde(default, rename = "jellyfinForgotPasswordUrl")]
    pub forgot_password_url: Option<String>,
    #[serde(default)]
    pub libraries: Vec<Library>,
}

impl JellyfinSettings {
    /// Ids of the currently enabled libraries, in snapshot order.
    pub fn enabled_library_ids(&self) -> Vec<String> {
        self.libraries
            .iter()
            .filter(|lib| lib.enabled)
            .map(|lib| lib.id.clone())
            .collect()
    }
}

/// Write body for the settings endpoint.
///
/// All four fields are replaced atomically from the server's point of view;
/// the client never sends partial updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JellyfinSettingsUpdate {
    pub custom_name: String,
    pub hostname: String,
    pub external_hostname: String,
    #[serde(rename = "jellyfinForgotPasswordUrl")]
    pub forgot_password_url: String,
}

/// Control body for the sync endpoint: `{"start":true}` or `{"cancel":true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanControl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel: Option<bool>,
}

impl ScanControl {
    pub fn start() -> Self {
        Self {
            start: Some(true),
            cancel: None,
        }
    }

    pub fn cancel() -> Self {
        Self {
            start: None,
            cancel: Some(true),
        }
    }
}

/// Error body returned by the library endpoint on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
