//! # Settings Controller
//!
//! Orchestrates the settings page's mutations against the server API:
//! library enablement toggling, library discovery, and atomic settings
//! submission. Holds the latest settings snapshot and revalidates it after
//! every mutating call, success or failure, so callers always render server
//! truth rather than optimistic local state.
//!
//! ## Consistency model
//!
//! There is no coordination beyond the controller's own in-flight guards
//! (`syncing`, `submitting`). Writes are last-write-wins, reconciled by
//! re-fetching. The scan poller in [`crate::scan`] runs independently; its
//! snapshots and this controller's snapshot are not guaranteed to agree at
//! any instant.

use core_api::{ApiError, JellyfinSettings, Library, SettingsApi, SyncFailure};
use core_runtime::notices::{Notice, NoticeBus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::error::{Result, SettingsError};
use crate::form::SettingsForm;

/// Callback invoked after a library toggle has fully settled (request done,
/// settings revalidated). Lets a wrapping setup wizard auto-advance.
pub type LibraryChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// View-model for the settings page.
///
/// Construct it, call [`refresh`](SettingsController::refresh) once on mount,
/// then drive it from user interactions. All user-visible outcomes are
/// reported through the [`NoticeBus`]; returned errors exist for programmatic
/// callers and tests.
pub struct SettingsController {
    api: Arc<dyn SettingsApi>,
    notices: NoticeBus,
    settings: RwLock<Option<JellyfinSettings>>,
    syncing: AtomicBool,
    submitting: AtomicBool,
    on_library_change: Option<LibraryChangeCallback>,
}

impl SettingsController {
    pub fn new(api: Arc<dyn SettingsApi>, notices: NoticeBus) -> Self {
        Self {
            api,
            notices,
            settings: RwLock::new(None),
            syncing: AtomicBool::new(false),
            submitting: AtomicBool::new(false),
            on_library_change: None,
        }
    }

    /// Register a callback fired after every completed library toggle.
    pub fn with_library_change_callback(mut self, callback: LibraryChangeCallback) -> Self {
        self.on_library_change = Some(callback);
        self
    }

    /// Fetch the settings snapshot from the server and cache it.
    pub async fn refresh(&self) -> Result<JellyfinSettings> {
        let snapshot = self.api.get_settings().await?;
        *self.settings.write().await = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// The last fetched snapshot, if any.
    pub async fn settings(&self) -> Option<JellyfinSettings> {
        self.settings.read().await.clone()
    }

    /// Ids of the currently enabled libraries, in snapshot order.
    pub async fn enabled_library_ids(&self) -> Vec<String> {
        self.settings
            .read()
            .await
            .as_ref()
            .map(|s| s.enabled_library_ids())
            .unwrap_or_default()
    }

    /// Whether a library discovery is in flight.
    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::SeqCst)
    }

    /// Whether a settings submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Set-replacement toggle: the result is `enabled` without `target` if
    /// present, with it appended otherwise.
    pub fn toggled(enabled: &[String], target: &str) -> Vec<String> {
        if enabled.iter().any(|id| id == target) {
            enabled.iter().filter(|id| *id != target).cloned().collect()
        } else {
            let mut next = enabled.to_vec();
            next.push(target.to_string());
            next
        }
    }

    /// Toggle one library and submit the full recomputed enabled set.
    ///
    /// The settings snapshot is revalidated whether or not the request
    /// succeeded, then the library-change callback (if any) fires.
    #[instrument(skip(self))]
    pub async fn toggle_library(&self, library_id: &str) -> Result<Vec<Library>> {
        let current = self.enabled_library_ids().await;
        let target = Self::toggled(&current, library_id);

        let result = self.api.set_enabled_libraries(&target).await;
        if let Err(err) = &result {
            warn!(error = %err, "Library toggle failed");
            self.notices
                .emit(Notice::error(
                    "Failed to update libraries",
                    "The library change was not saved. The list below reflects the server's current state.",
                ))
                .ok();
        }

        self.revalidate().await;

        if let Some(callback) = &self.on_library_change {
            callback();
        }

        result.map_err(Into::into)
    }

    /// Run library discovery, keeping the currently enabled set active.
    ///
    /// Exactly one notice is emitted per call: success, or one of the three
    /// classified failures. The `syncing` flag is cleared and the settings
    /// snapshot revalidated in every case; a failed discovery may still have
    /// changed library state server-side.
    #[instrument(skip(self))]
    pub async fn sync_libraries(&self) -> Result<Vec<Library>> {
        if self.syncing.swap(true, Ordering::SeqCst) {
            return Err(SettingsError::SyncInProgress);
        }

        let active = self.enabled_library_ids().await;
        let result = self.api.sync_libraries(&active).await;

        match &result {
            Ok(libraries) => {
                info!(count = libraries.len(), "Library discovery finished");
                self.notices
                    .emit(Notice::success(
                        "Libraries synced",
                        "Library discovery finished.",
                    ))
                    .ok();
            }
            Err(err) => {
                warn!(error = %err, "Library discovery failed");
                self.notices.emit(Self::failure_notice(err)).ok();
            }
        }

        self.syncing.store(false, Ordering::SeqCst);
        self.revalidate().await;

        result.map_err(Into::into)
    }

    /// Validate and submit the settings form as one atomic write.
    ///
    /// Refused while any field is invalid or another submission is in
    /// flight. Emits a success or failure notice and revalidates afterward in
    /// both cases.
    #[instrument(skip(self, form))]
    pub async fn submit(&self, form: &SettingsForm) -> Result<()> {
        form.validate()?;

        if self.submitting.swap(true, Ordering::SeqCst) {
            return Err(SettingsError::SubmitInProgress);
        }

        let result = self.api.update_settings(&form.to_update()).await;

        match &result {
            Ok(()) => {
                info!("Settings saved");
                self.notices
                    .emit(Notice::success(
                        "Settings saved",
                        "Jellyfin settings were updated.",
                    ))
                    .ok();
            }
            Err(err) => {
                warn!(error = %err, "Settings submission failed");
                self.notices
                    .emit(Notice::error(
                        "Failed to save settings",
                        "Jellyfin settings were not updated.",
                    ))
                    .ok();
            }
        }

        self.submitting.store(false, Ordering::SeqCst);
        self.revalidate().await;

        result.map_err(Into::into)
    }

    fn failure_notice(err: &ApiError) -> Notice {
        match err.sync_failure() {
            SyncFailure::GroupedFolders => Notice::warning(
                "Libraries partially synced",
                "Custom authentication is incompatible with automatic library grouping on the media server.",
            ),
            SyncFailure::NoLibraries => Notice::error(
                "No libraries found",
                "Library discovery returned zero libraries.",
            ),
            SyncFailure::Other => Notice::error(
                "Failed to sync libraries",
                "Something went wrong while syncing libraries.",
            ),
        }
    }

    /// Best-effort re-fetch after a mutation. A failed revalidation keeps the
    /// previous snapshot and is logged rather than surfaced; the next
    /// successful fetch repairs it.
    async fn revalidate(&self) {
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "Settings revalidation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_toggled_adds_missing_id() {
        assert_eq!(
            SettingsController::toggled(&ids(&["a", "b"]), "c"),
            ids(&["a", "b", "c"])
        );
    }

    #[test]
    fn test_toggled_removes_present_id() {
        assert_eq!(
            SettingsController::toggled(&ids(&["a", "b", "c"]), "b"),
            ids(&["a", "c"])
        );
    }

    #[test]
    fn test_toggled_empties_singleton_set() {
        assert_eq!(
            SettingsController::toggled(&ids(&["a"]), "a"),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_toggled_from_empty_set() {
        assert_eq!(SettingsController::toggled(&[], "a"), ids(&["a"]));
    }

    #[test]
    fn test_toggled_preserves_order() {
        assert_eq!(
            SettingsController::toggled(&ids(&["c", "a", "b"]), "a"),
            ids(&["c", "b"])
        );
    }
}
