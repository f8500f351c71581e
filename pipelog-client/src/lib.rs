//! Pipelog HTTP Client
//!
//! An authenticated client for the pipeline service plus the machinery that
//! turns an unbounded build-log stream into a single bounded page.
//!
//! The crate is split into:
//! - [`PipelineClient`]: bearer-authenticated HTTP calls (one-shot and streaming)
//! - [`stream`]: the [`LogSource`] abstraction, the drainer that consumes a
//!   source under an entry cap and a deadline, and the assembler that turns
//!   the drained records into a [`PagedLogResponse`]
//!
//! # Example
//!
//! ```no_run
//! use pipelog_client::{PipelineClient, DrainRequest, assemble, drain};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PipelineClient::new("localhost:8080", "my-api-key")?;
//!
//!     let request = DrainRequest::new(100, 0)?;
//!     let stream = client.log_stream("pipe-abc123").await?;
//!     let page = assemble(drain(stream, &request).await)?;
//!
//!     println!("Fetched {} log entries", page.total_returned);
//!     Ok(())
//! }
//! ```
//!
//! [`PagedLogResponse`]: pipelog_core::dto::log::PagedLogResponse

mod api;
pub mod endpoint;
pub mod error;
mod logs;
mod ndjson;
mod pipelines;
pub mod stream;

// Re-export commonly used types
pub use api::PipelineApi;
pub use error::{ClientError, Result};
pub use logs::HttpLogStream;
pub use stream::{
    DrainOutcome, DrainRequest, LogSource, MemorySource, StopReason, assemble, drain,
};

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::info;

/// How long to wait for a TCP/TLS connection before giving up
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the pipeline service API
///
/// Every request carries the caller's API key as a bearer token, so the
/// service evaluates permissions for the actual user rather than a shared
/// machine account.
#[derive(Clone)]
pub struct PipelineClient {
    /// Base URL of the service (e.g., "https://api.pipelog.dev:443")
    base_url: String,
    /// Bearer credential attached to every request
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl PipelineClient {
    /// Create a new pipeline client
    ///
    /// # Arguments
    /// * `endpoint` - Full URL or bare `host:port` (port 443 implies TLS)
    /// * `api_key` - The user's API key or JWT
    ///
    /// # Example
    /// ```
    /// use pipelog_client::PipelineClient;
    ///
    /// let client = PipelineClient::new("localhost:8080", "key").unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:8080");
    /// ```
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;
        Self::with_client(endpoint, api_key, client)
    }

    /// Create a new pipeline client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, etc. Avoid setting
    /// an overall request timeout: log streams are bounded by the drain
    /// deadline instead.
    pub fn with_client(endpoint: &str, api_key: impl Into<String>, client: Client) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "API key cannot be empty".to_string(),
            ));
        }

        let base_url = endpoint::resolve_base_url(endpoint)?;
        if endpoint::uses_tls(&base_url) {
            info!("Using TLS transport for endpoint: {}", base_url);
        } else {
            info!("Using insecure transport for endpoint: {}", base_url);
        }

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Building
    // =============================================================================

    /// Build a URL below the base URL, escaping each path segment
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidEndpoint(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start an authenticated GET request
    fn get(&self, url: Url, accept: &'static str) -> RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, HeaderValue::from_static(accept))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let response = self.check_status(response, resource).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code, turning failures into typed errors
    ///
    /// The response is handed back untouched on success so streaming callers
    /// can keep reading the body.
    async fn check_status(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(resource.to_string()));
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ClientError::api_error(status.as_u16(), error_text))
    }
}

impl fmt::Debug for PipelineClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
