//! # Background Scan Monitor
//!
//! Polls the sync endpoint at a fixed cadence and republishes snapshots on a
//! watch channel. The server owns the scan lifecycle
//! (`Idle -> Running -> (Completed | Cancelled) -> Idle`); this monitor only
//! issues start/cancel requests and renders whatever the latest snapshot
//! says.
//!
//! The poll loop stops when the monitor is dropped or explicitly stopped.
//! A request already in flight at that moment runs to completion and its
//! result is discarded; mid-request aborts are not part of this design.

use core_api::{SettingsApi, SyncStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::error::Result;

/// Render model for the scan progress area.
///
/// Computed fresh from a [`SyncStatus`] snapshot; the stale counters of an
/// idle status never leak into a percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanView {
    /// No scan is running
    NotRunning,
    /// A scan is in progress
    Running {
        /// `round(100 * progress / total)`, as reported by the server
        percent: u8,
        /// Name of the library currently being walked, if known
        current_library: Option<String>,
        /// Libraries still queued after the current one
        remaining: usize,
    },
}

impl ScanView {
    pub fn from_status(status: &SyncStatus) -> Self {
        match status.percent_complete() {
            Some(percent) => ScanView::Running {
                percent,
                current_library: status.current_library.as_ref().map(|lib| lib.name.clone()),
                remaining: status.remaining(),
            },
            None => ScanView::NotRunning,
        }
    }
}

/// Cancellable fixed-interval poller for the background scan.
///
/// [`spawn`](ScanMonitor::spawn) starts the loop immediately (the first poll
/// fires right away, matching a fetch-on-mount), and every subscriber sees
/// the latest snapshot through the watch channel.
pub struct ScanMonitor {
    api: Arc<dyn SettingsApi>,
    status: Arc<watch::Sender<SyncStatus>>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ScanMonitor {
    /// Start polling at the given cadence.
    pub fn spawn(api: Arc<dyn SettingsApi>, poll_interval: Duration) -> Self {
        let (status, _) = watch::channel(SyncStatus::default());
        let status = Arc::new(status);
        let cancel = CancellationToken::new();

        let task_api = api.clone();
        let task_status = status.clone();
        let task_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => {
                        debug!("Scan poll loop stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        match task_api.scan_status().await {
                            Ok(snapshot) => {
                                task_status.send_replace(snapshot);
                            }
                            // Keep the previous snapshot; a missed tick is
                            // not an error state for the page.
                            Err(err) => warn!(error = %err, "Scan status poll failed"),
                        }
                    }
                }
            }
        });

        Self {
            api,
            status,
            cancel,
            handle: Some(handle),
        }
    }

    /// Receiver for status snapshots as they arrive.
    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    /// The render model for the most recent snapshot.
    pub fn view(&self) -> ScanView {
        ScanView::from_status(&self.latest())
    }

    /// Ask the server to start a full scan, then refresh the status once
    /// out-of-band so subscribers don't wait a full tick.
    #[instrument(skip(self))]
    pub async fn start_scan(&self) -> Result<()> {
        let result = self.api.start_scan().await;
        self.refresh_now().await;
        result.map_err(Into::into)
    }

    /// Ask the server to cancel the running scan.
    ///
    /// Fire-and-forget: the request is sent and the status refreshed once
    /// immediately, but the snapshot may keep reporting `running` until the
    /// server actually halts the job.
    #[instrument(skip(self))]
    pub async fn cancel_scan(&self) -> Result<()> {
        let result = self.api.cancel_scan().await;
        self.refresh_now().await;
        result.map_err(Into::into)
    }

    /// One immediate status fetch outside the tick cadence.
    pub async fn refresh_now(&self) {
        match self.api.scan_status().await {
            Ok(snapshot) => {
                self.status.send_replace(snapshot);
            }
            Err(err) => warn!(error = %err, "Scan status refresh failed"),
        }
    }

    /// Stop the poll loop. Idempotent; the task exits at its next loop turn.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Stop the poll loop and wait for the task to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            handle.await.ok();
        }
    }
}

impl Drop for ScanMonitor {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
