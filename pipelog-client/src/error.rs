//! Error types for the Pipelog client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Pipelog client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Endpoint could not be turned into a usable base URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The server ended the log stream with a non-OK status frame
    #[error("Stream closed with status {code}: {message}")]
    StreamStatus {
        /// Status code reported by the server (e.g. "UNAVAILABLE")
        code: String,
        /// Error message from the server
        message: String,
    },

    /// The transport gave up because the call deadline passed
    #[error("Deadline exceeded: {0}")]
    DeadlineExceeded(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// HTTP status attached to this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::RequestFailed(err) => err.status().map(|s| s.as_u16()),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if the server could not be reached at all
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::RequestFailed(err) => err.is_connect(),
            Self::ApiError { status, .. } => *status == 503,
            Self::StreamStatus { code, .. } => code == "UNAVAILABLE",
            _ => false,
        }
    }

    /// Check if the transport reported that the call deadline passed
    ///
    /// This is the graceful-truncation case while draining a stream, not a
    /// failure. A connect timeout means the service was never reached and
    /// counts as unavailable instead.
    pub fn is_deadline_exceeded(&self) -> bool {
        match self {
            Self::DeadlineExceeded(_) => true,
            Self::RequestFailed(err) => err.is_timeout() && !err.is_connect(),
            _ => false,
        }
    }
}
