//! Tool-level errors
//!
//! Every failure a tool can hit ends up as an [`ErrorResponse`] document in
//! the tool result, never as a JSON-RPC error.

use pipelog_client::ClientError;
use pipelog_core::dto::error::{ErrorCode, ErrorResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// Caller supplied unusable arguments; nothing was sent to the service
    #[error("{0}")]
    InvalidArgument(String),

    /// The HTTP client could not be built from the configuration
    #[error("Failed to create client: {0}")]
    ClientSetup(#[source] ClientError),

    /// A call to the service failed before any data came back
    #[error("Failed to {action} for pipeline '{pipeline_id}': {source}")]
    Request {
        action: &'static str,
        pipeline_id: String,
        #[source]
        source: ClientError,
    },

    /// The log stream broke partway through
    #[error("Error receiving log entry: {0}")]
    Stream(#[source] ClientError),

    #[error("Failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn request(action: &'static str, pipeline_id: &str, source: ClientError) -> Self {
        Self::Request {
            action,
            pipeline_id: pipeline_id.to_string(),
            source,
        }
    }

    /// Error category reported to the caller
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::ClientSetup(_) => ErrorCode::ClientError,
            Self::Request { source, .. } => classify(source),
            Self::Stream(_) => ErrorCode::StreamError,
            Self::Serialization(_) => ErrorCode::InternalError,
        }
    }

    /// Structured payload for the tool result
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            Self::Request {
                pipeline_id,
                source,
                ..
            } if source.is_not_found() => format!("Pipeline '{}' not found", pipeline_id),
            other => other.to_string(),
        };
        ErrorResponse::new(self.code(), message)
    }
}

/// Map a failed one-shot call onto an error category
fn classify(err: &ClientError) -> ErrorCode {
    if err.is_not_found() {
        return ErrorCode::NotFound;
    }
    if err.is_unavailable() {
        return ErrorCode::Unavailable;
    }
    match err {
        ClientError::InvalidRequest(_) => ErrorCode::InvalidArgument,
        _ => match err.status() {
            Some(401) => ErrorCode::Unauthenticated,
            Some(403) => ErrorCode::PermissionDenied,
            _ if err.is_client_error() => ErrorCode::InvalidArgument,
            _ => ErrorCode::InternalError,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_error(source: ClientError) -> ToolError {
        ToolError::request("open log stream", "pipe-1", source)
    }

    #[test]
    fn test_http_status_classification() {
        assert_eq!(
            request_error(ClientError::NotFound("pipe-1".to_string())).code(),
            ErrorCode::NotFound
        );
        assert_eq!(
            request_error(ClientError::api_error(401, "bad token")).code(),
            ErrorCode::Unauthenticated
        );
        assert_eq!(
            request_error(ClientError::api_error(403, "forbidden")).code(),
            ErrorCode::PermissionDenied
        );
        assert_eq!(
            request_error(ClientError::api_error(503, "down")).code(),
            ErrorCode::Unavailable
        );
        assert_eq!(
            request_error(ClientError::api_error(500, "boom")).code(),
            ErrorCode::InternalError
        );
        assert_eq!(
            request_error(ClientError::api_error(422, "bad id")).code(),
            ErrorCode::InvalidArgument
        );
    }

    #[test]
    fn test_not_found_message_names_pipeline() {
        let response = request_error(ClientError::NotFound("pipe-1".to_string())).to_response();
        assert_eq!(response.error, ErrorCode::NotFound);
        assert_eq!(response.message, "Pipeline 'pipe-1' not found");
    }

    #[test]
    fn test_stream_and_setup_codes() {
        let stream = ToolError::Stream(ClientError::StreamStatus {
            code: "INTERNAL".to_string(),
            message: "reset".to_string(),
        });
        assert_eq!(stream.code(), ErrorCode::StreamError);
        assert!(stream.to_response().message.starts_with("Error receiving log entry"));

        let setup = ToolError::ClientSetup(ClientError::InvalidEndpoint("".to_string()));
        assert_eq!(setup.code(), ErrorCode::ClientError);
    }

    #[test]
    fn test_invalid_argument_keeps_message() {
        let response = ToolError::invalid_argument("pipeline_id is required").to_response();
        assert_eq!(response.error, ErrorCode::InvalidArgument);
        assert_eq!(response.message, "pipeline_id is required");
    }
}
