//! `get_pipeline_build_logs` tool
//!
//! Fetches one bounded page of a pipeline's build logs. The entry cap and
//! the stream deadline both end the page early; either way the caller gets
//! whatever was collected plus a note on how to continue.

use async_trait::async_trait;
use pipelog_client::{
    ClientError, DrainOutcome, DrainRequest, PipelineApi, StopReason, assemble, drain,
};
use pipelog_core::dto::log::PagedLogResponse;
use pipelog_core::limits::{MAX_LOG_ENTRIES, MAX_LOG_STREAM_DURATION};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::time::Instant;
use tokio::time;
use tracing::{info, warn};

use super::args::{optional_int, required_str};
use super::{Connector, Tool, ToolDefinition, ToolOutput};
use crate::error::ToolError;

pub const NAME: &str = "get_pipeline_build_logs";

/// Parsed tool arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogsArgs {
    pub pipeline_id: String,
    pub max_entries: Option<i64>,
    pub skip_entries: Option<i64>,
}

impl LogsArgs {
    pub fn new(pipeline_id: impl Into<String>) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            max_entries: None,
            skip_entries: None,
        }
    }

    pub fn parse(args: &Map<String, Value>) -> Result<Self, ToolError> {
        Ok(Self {
            pipeline_id: required_str(args, "pipeline_id")?.to_string(),
            max_entries: optional_int(args, "max_entries")?,
            skip_entries: optional_int(args, "skip_entries")?,
        })
    }

    /// Validated drain parameters; the deadline starts now
    fn drain_request(&self) -> Result<DrainRequest, ToolError> {
        if self.pipeline_id.trim().is_empty() {
            return Err(ToolError::invalid_argument("pipeline_id is required"));
        }
        let max_entries = self.max_entries.unwrap_or(MAX_LOG_ENTRIES as i64);
        DrainRequest::new(max_entries, self.skip_entries.unwrap_or(0)).map_err(|e| match e {
            ClientError::InvalidRequest(message) => ToolError::InvalidArgument(message),
            other => ToolError::invalid_argument(other.to_string()),
        })
    }
}

/// Open the log stream and drain one page from it
///
/// Opening the stream counts against the same deadline as draining it; an
/// open that runs out the clock yields an empty truncated page. A transport
/// timeout before the deadline (a slow connect) is an error, not a page.
pub async fn fetch_page(
    api: &dyn PipelineApi,
    args: &LogsArgs,
) -> Result<PagedLogResponse, ToolError> {
    let request = args.drain_request()?;
    let pipeline_id = args.pipeline_id.as_str();

    info!(
        "Pipeline logs request: pipeline={}, max_entries={}, skip_entries={}",
        pipeline_id,
        request.max_entries(),
        request.skip_entries()
    );

    let outcome = match time::timeout_at(request.deadline(), api.open_log_stream(pipeline_id)).await
    {
        Err(_) => DrainOutcome::deadline_exceeded(&request),
        Ok(Err(e)) if e.is_deadline_exceeded() && time::Instant::now() >= request.deadline() => {
            DrainOutcome::deadline_exceeded(&request)
        }
        Ok(Err(e)) => return Err(ToolError::request("open log stream", pipeline_id, e)),
        Ok(Ok(stream)) => drain(stream, &request).await,
    };

    match &outcome.stop_reason {
        StopReason::DeadlineExceeded => info!(
            "Log stream deadline reached for pipeline {} after {} entries",
            pipeline_id,
            outcome.records.len()
        ),
        StopReason::LimitReached => info!(
            "Log entry limit reached for pipeline {} ({} entries)",
            pipeline_id,
            outcome.records.len()
        ),
        StopReason::SourceError(e) => warn!(
            "Log stream for pipeline {} failed after {} entries: {}",
            pipeline_id,
            outcome.records.len(),
            e
        ),
        StopReason::Exhausted => {}
    }

    assemble(outcome).map_err(ToolError::Stream)
}

pub struct GetPipelineBuildLogs {
    connector: Arc<dyn Connector>,
}

impl GetPipelineBuildLogs {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }

    async fn run(&self, arguments: &Map<String, Value>) -> Result<PagedLogResponse, ToolError> {
        let args = LogsArgs::parse(arguments)?;
        let api = self.connector.connect().map_err(ToolError::ClientSetup)?;
        fetch_page(api.as_ref(), &args).await
    }
}

#[async_trait]
impl Tool for GetPipelineBuildLogs {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: NAME,
            description: format!(
                "Retrieve build logs for a pipeline execution, including build output, \
                 errors and diagnostic messages from every task. Use this to troubleshoot \
                 build failures. Returns up to {} log entries per request and stops \
                 streaming after {} minutes. Use 'max_entries' and 'skip_entries' to page \
                 through long logs; when a limit is hit the partial result says how to \
                 fetch the next page.",
                MAX_LOG_ENTRIES,
                MAX_LOG_STREAM_DURATION.as_secs() / 60
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "pipeline_id": {
                        "type": "string",
                        "description": "Pipeline ID (e.g., 'pipe-abc123')"
                    },
                    "max_entries": {
                        "type": "number",
                        "description": format!(
                            "Maximum number of log entries to return (default: {}, max: {})",
                            MAX_LOG_ENTRIES, MAX_LOG_ENTRIES
                        )
                    },
                    "skip_entries": {
                        "type": "number",
                        "description": "Number of log entries to skip for pagination (default: 0)"
                    }
                },
                "required": ["pipeline_id"]
            }),
        }
    }

    async fn call(&self, arguments: &Map<String, Value>) -> ToolOutput {
        info!("Tool invoked: {}", NAME);
        let started = Instant::now();

        match self.run(arguments).await {
            Ok(page) => {
                info!(
                    "Returned {} log entries (skipped {}, limited: {}) in {:?}",
                    page.total_returned,
                    page.total_skipped,
                    page.limit_reached,
                    started.elapsed()
                );
                ToolOutput::json(&page)
            }
            Err(e) => {
                warn!("{} failed: {}", NAME, e);
                ToolOutput::error(&e)
            }
        }
    }
}
