//! # Notice Broadcasting
//!
//! The notification sink: fetch logic reports user-facing outcomes as
//! [`Notice`] values on a broadcast channel, and whatever presentation layer
//! is attached decides how (or whether) to show them. Built on
//! `tokio::sync::broadcast`, so multiple independent subscribers each see
//! every notice.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::notices::{Notice, NoticeBus};
//!
//! let bus = NoticeBus::new(16);
//! let mut stream = bus.subscribe();
//!
//! bus.emit(Notice::success("Settings saved", "Jellyfin settings were updated."))
//!     .ok();
//! ```
//!
//! Subscribers that fall behind receive `RecvError::Lagged` and keep going;
//! notices are transient by design, a dropped one is not an error state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;
use uuid::Uuid;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the notice channel.
pub const DEFAULT_NOTICE_BUFFER_SIZE: usize = 64;

/// Severity of a user-facing notice.
///
/// Ordered so subscribers can filter with a simple `>=` threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeSeverity {
    /// Operation completed as requested
    Success,
    /// Informational, no action needed
    Info,
    /// Something degraded but the operation continued
    Warning,
    /// The operation failed
    Error,
}

impl NoticeSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeSeverity::Success => "success",
            NoticeSeverity::Info => "info",
            NoticeSeverity::Warning => "warning",
            NoticeSeverity::Error => "error",
        }
    }
}

impl fmt::Display for NoticeSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transient, auto-dismissing user-facing notice.
///
/// Notices are never fatal; the emitting operation has already handled the
/// underlying condition and re-synced its state by the time one is broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Unique id, used by sinks to deduplicate or dismiss
    pub id: Uuid,
    /// Severity level
    pub severity: NoticeSeverity,
    /// Short headline
    pub title: String,
    /// Longer human-readable detail
    pub message: String,
    /// When the notice was created
    pub at: DateTime<Utc>,
}

impl Notice {
    /// Create a notice with the given severity.
    pub fn new(
        severity: NoticeSeverity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity,
            title: title.into(),
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeSeverity::Success, title, message)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeSeverity::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeSeverity::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeSeverity::Error, title, message)
    }
}

/// Broadcast channel for publishing notices to any number of subscribers.
///
/// Cloning the bus produces another handle to the same channel; each
/// [`subscribe`](NoticeBus::subscribe) call creates an independent receiver.
#[derive(Clone)]
pub struct NoticeBus {
    sender: broadcast::Sender<Notice>,
}

impl NoticeBus {
    /// Creates a new notice bus with the specified buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes a notice to all subscribers.
    ///
    /// Returns the number of subscribers that received it, or an error when
    /// there are none. Emitters treat that error as "nobody is listening" and
    /// ignore it.
    pub fn emit(&self, notice: Notice) -> Result<usize, SendError<Notice>> {
        self.sender.send(notice)
    }

    /// Creates a new subscriber receiving all future notices.
    pub fn subscribe(&self) -> NoticeStream {
        NoticeStream::new(self.sender.subscribe())
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_BUFFER_SIZE)
    }
}

impl fmt::Debug for NoticeBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoticeBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

/// A receiver with an optional severity floor.
///
/// [`recv`](NoticeStream::recv) skips notices below the configured minimum
/// severity and returns the next one that qualifies.
pub struct NoticeStream {
    receiver: Receiver<Notice>,
    min_severity: Option<NoticeSeverity>,
}

impl NoticeStream {
    /// Creates a new stream from a raw receiver.
    pub fn new(receiver: Receiver<Notice>) -> Self {
        Self {
            receiver,
            min_severity: None,
        }
    }

    /// Only deliver notices at or above the given severity.
    pub fn min_severity(mut self, severity: NoticeSeverity) -> Self {
        self.min_severity = Some(severity);
        self
    }

    fn passes(&self, notice: &Notice) -> bool {
        match self.min_severity {
            Some(min) => notice.severity >= min,
            None => true,
        }
    }

    /// Receives the next notice that passes the severity filter.
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged(n)` if the subscriber fell behind by `n`
    /// notices, `RecvError::Closed` when all senders are gone.
    pub async fn recv(&mut self) -> Result<Notice, RecvError> {
        loop {
            let notice = self.receiver.recv().await?;
            if self.passes(&notice) {
                return Ok(notice);
            }
        }
    }

    /// Attempts to receive a notice without blocking.
    ///
    /// Returns `None` if no qualifying notice is currently buffered.
    pub fn try_recv(&mut self) -> Option<Result<Notice, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(notice) => {
                    if self.passes(&notice) {
                        return Some(Ok(notice));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for NoticeStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoticeStream")
            .field("min_severity", &self.min_severity)
            .finish()
    }
}
