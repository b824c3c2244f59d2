use thiserror::Error;

use bridge_traits::BridgeError;

/// Discriminants for failed library discovery, as reported by the server.
pub const SYNC_ERROR_GROUPED_FOLDERS: &str = "SYNC_ERROR_GROUPED_FOLDERS";
pub const SYNC_ERROR_NO_LIBRARIES: &str = "SYNC_ERROR_NO_LIBRARIES";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] BridgeError),

    #[error("Server returned status {status} ({})", .code.as_deref().unwrap_or("no error code"))]
    Status { status: u16, code: Option<String> },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Classified outcome of a failed library discovery.
///
/// The server's error taxonomy is open-ended; anything unrecognized (or a
/// response with no discriminant at all) classifies as [`SyncFailure::Other`]
/// rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncFailure {
    /// Custom authentication is incompatible with automatic library grouping
    /// on the media server
    GroupedFolders,
    /// Discovery returned zero libraries
    NoLibraries,
    /// Any other or unknown failure
    Other,
}

impl SyncFailure {
    /// Classify a server-supplied discriminant string.
    pub fn classify(code: Option<&str>) -> Self {
        match code {
            Some(SYNC_ERROR_GROUPED_FOLDERS) => SyncFailure::GroupedFolders,
            Some(SYNC_ERROR_NO_LIBRARIES) => SyncFailure::NoLibraries,
            _ => SyncFailure::Other,
        }
    }
}

impl ApiError {
    /// Classify this error as a sync failure.
    ///
    /// Only [`ApiError::Status`] carries a discriminant; transport and parse
    /// errors classify as [`SyncFailure::Other`].
    pub fn sync_failure(&self) -> SyncFailure {
        match self {
            ApiError::Status { code, .. } => SyncFailure::classify(code.as_deref()),
            _ => SyncFailure::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_discriminants() {
        assert_eq!(
            SyncFailure::classify(Some("SYNC_ERROR_GROUPED_FOLDERS")),
            SyncFailure::GroupedFolders
        );
        assert_eq!(
            SyncFailure::classify(Some("SYNC_ERROR_NO_LIBRARIES")),
            SyncFailure::NoLibraries
        );
    }

    #[test]
    fn test_classify_fails_safe() {
        assert_eq!(
            SyncFailure::classify(Some("SYNC_ERROR_FROM_THE_FUTURE")),
            SyncFailure::Other
        );
        assert_eq!(SyncFailure::classify(None), SyncFailure::Other);
    }

    #[test]
    fn test_transport_errors_classify_as_other() {
        let err = ApiError::Transport(BridgeError::OperationFailed("boom".to_string()));
        assert_eq!(err.sync_failure(), SyncFailure::Other);
    }

    #[test]
    fn test_status_error_display_without_code() {
        let err = ApiError::Status {
            status: 500,
            code: None,
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("no error code"));
    }
}
