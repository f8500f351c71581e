//! Structured error payloads
//!
//! Tool failures are reported to the caller as a small JSON document instead
//! of a transport-level error, so the model on the other side can read them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidArgument,
    ClientError,
    NotFound,
    Unauthenticated,
    PermissionDenied,
    Unavailable,
    StreamError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::ClientError => "CLIENT_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::Unavailable => "UNAVAILABLE",
            Self::StreamError => "STREAM_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        };
        f.write_str(name)
    }
}

/// Error document returned in place of a tool result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorCode,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse::new(ErrorCode::InvalidArgument, "pipeline_id is required");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "error": "INVALID_ARGUMENT",
                "message": "pipeline_id is required"
            })
        );
    }

    #[test]
    fn test_display_matches_serialized_code() {
        for code in [
            ErrorCode::ClientError,
            ErrorCode::PermissionDenied,
            ErrorCode::StreamError,
        ] {
            let serialized = serde_json::to_value(code).unwrap();
            assert_eq!(serialized, code.to_string());
        }
    }
}
