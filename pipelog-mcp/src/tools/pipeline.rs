//! `get_pipeline_by_id` tool

use async_trait::async_trait;
use pipelog_client::PipelineApi;
use pipelog_core::domain::pipeline::Pipeline;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use super::args::required_str;
use super::{Connector, Tool, ToolDefinition, ToolOutput};
use crate::error::ToolError;

pub const NAME: &str = "get_pipeline_by_id";

/// Fetch a single pipeline
pub async fn fetch_pipeline(api: &dyn PipelineApi, pipeline_id: &str) -> Result<Pipeline, ToolError> {
    if pipeline_id.trim().is_empty() {
        return Err(ToolError::invalid_argument("pipeline_id is required"));
    }

    api.get_pipeline(pipeline_id)
        .await
        .map_err(|e| ToolError::request("get pipeline", pipeline_id, e))
}

pub struct GetPipelineById {
    connector: Arc<dyn Connector>,
}

impl GetPipelineById {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }

    async fn run(&self, arguments: &Map<String, Value>) -> Result<Pipeline, ToolError> {
        let pipeline_id = required_str(arguments, "pipeline_id")?;
        let api = self.connector.connect().map_err(ToolError::ClientSetup)?;
        fetch_pipeline(api.as_ref(), pipeline_id).await
    }
}

#[async_trait]
impl Tool for GetPipelineById {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: NAME,
            description: "Get a pipeline execution by ID: its status, timestamps and the \
                          status of each task. Check this before reading logs to see \
                          whether the pipeline is still running."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "pipeline_id": {
                        "type": "string",
                        "description": "Pipeline ID (e.g., 'pipe-abc123')"
                    }
                },
                "required": ["pipeline_id"]
            }),
        }
    }

    async fn call(&self, arguments: &Map<String, Value>) -> ToolOutput {
        info!("Tool invoked: {}", NAME);

        match self.run(arguments).await {
            Ok(pipeline) => ToolOutput::json(&pipeline),
            Err(e) => {
                warn!("{} failed: {}", NAME, e);
                ToolOutput::error(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::FakeConnector;

    fn tool() -> GetPipelineById {
        GetPipelineById::new(Arc::new(FakeConnector { count: 0 }))
    }

    #[tokio::test]
    async fn test_returns_pipeline_json() {
        let args = json!({"pipeline_id": "pipe-1"});
        let output = tool().call(args.as_object().unwrap()).await;
        let pipeline: Value = serde_json::from_str(&output.text).unwrap();

        assert!(!output.is_error);
        assert_eq!(pipeline["name"], "api-build");
        assert_eq!(pipeline["status"], "running");
    }

    #[tokio::test]
    async fn test_missing_pipeline() {
        let args = json!({"pipeline_id": "pipe-9"});
        let output = tool().call(args.as_object().unwrap()).await;
        let err: Value = serde_json::from_str(&output.text).unwrap();

        assert!(output.is_error);
        assert_eq!(err["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_requires_pipeline_id() {
        let output = tool().call(&Map::new()).await;
        let err: Value = serde_json::from_str(&output.text).unwrap();

        assert_eq!(err["error"], "INVALID_ARGUMENT");
    }
}
