//! MCP tools
//!
//! Each tool is a [`Tool`] registered in a [`ToolRegistry`]. Tools reach the
//! pipeline service through a [`Connector`], which builds a fresh client per
//! invocation so a bad configuration surfaces as a `CLIENT_ERROR` result
//! rather than a startup failure.

mod args;
pub mod logs;
pub mod pipeline;

use async_trait::async_trait;
use pipelog_client::{PipelineApi, PipelineClient};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::error;

use crate::config::Config;
use crate::error::ToolError;

/// Entry in the `tools/list` response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: String,
    pub input_schema: Value,
}

/// Text body of a tool result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    /// Pretty-printed JSON success payload
    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(text) => Self {
                text,
                is_error: false,
            },
            Err(e) => Self::error(&ToolError::Serialization(e)),
        }
    }

    /// Structured error payload
    pub fn error(err: &ToolError) -> Self {
        let text = serde_json::to_string_pretty(&err.to_response()).unwrap_or_else(|e| {
            error!("Failed to serialize error response: {}", e);
            format!("{{\"error\":\"{}\"}}", err.code())
        });
        Self {
            text,
            is_error: true,
        }
    }
}

/// A callable MCP tool
#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    async fn call(&self, arguments: &Map<String, Value>) -> ToolOutput;
}

/// Builds service handles for tool invocations
pub trait Connector: Send + Sync {
    fn connect(&self) -> pipelog_client::Result<Arc<dyn PipelineApi>>;
}

/// Connector that builds an authenticated HTTP client
pub struct HttpConnector {
    endpoint: String,
    api_key: String,
}

impl HttpConnector {
    pub fn new(config: &Config) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

impl Connector for HttpConnector {
    fn connect(&self) -> pipelog_client::Result<Arc<dyn PipelineApi>> {
        let client = PipelineClient::new(&self.endpoint, self.api_key.as_str())?;
        Ok(Arc::new(client))
    }
}

/// Tools by name, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Registry holding every pipeline tool
    pub fn with_pipeline_tools(connector: Arc<dyn Connector>) -> Self {
        let mut registry = Self::default();
        registry.register(Arc::new(logs::GetPipelineBuildLogs::new(Arc::clone(&connector))));
        registry.register(Arc::new(pipeline::GetPipelineById::new(connector)));
        registry
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools
            .iter()
            .find(|t| t.definition().name == name)
            .cloned()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fake service shared by tool and server tests

    use super::*;
    use pipelog_client::{ClientError, LogSource, MemorySource};
    use pipelog_core::domain::log::LogRecord;
    use pipelog_core::domain::pipeline::{Pipeline, PipelineStatus};

    /// Service with `count` log records for "pipe-1" and nothing else
    pub struct FakeService {
        pub count: usize,
    }

    #[async_trait]
    impl PipelineApi for FakeService {
        async fn get_pipeline(&self, pipeline_id: &str) -> pipelog_client::Result<Pipeline> {
            if pipeline_id != "pipe-1" {
                return Err(ClientError::NotFound(pipeline_id.to_string()));
            }
            Ok(Pipeline {
                id: pipeline_id.to_string(),
                name: "api-build".to_string(),
                description: None,
                status: PipelineStatus::Running,
                created_at: None,
                started_at: None,
                completed_at: None,
                tasks: Vec::new(),
            })
        }

        async fn open_log_stream(
            &self,
            pipeline_id: &str,
        ) -> pipelog_client::Result<Box<dyn LogSource>> {
            if pipeline_id != "pipe-1" {
                return Err(ClientError::NotFound(pipeline_id.to_string()));
            }
            let records = (0..self.count)
                .map(|i| LogRecord::new("build", format!("line {}", i)))
                .collect::<Vec<_>>();
            Ok(Box::new(MemorySource::from(records)))
        }
    }

    pub struct FakeConnector {
        pub count: usize,
    }

    impl Connector for FakeConnector {
        fn connect(&self) -> pipelog_client::Result<Arc<dyn PipelineApi>> {
            Ok(Arc::new(FakeService { count: self.count }))
        }
    }

    /// Connector handing out one prebuilt service
    pub struct SharedConnector(pub Arc<dyn PipelineApi>);

    impl Connector for SharedConnector {
        fn connect(&self) -> pipelog_client::Result<Arc<dyn PipelineApi>> {
            Ok(Arc::clone(&self.0))
        }
    }

    /// Connector whose client construction always fails
    pub struct BrokenConnector;

    impl Connector for BrokenConnector {
        fn connect(&self) -> pipelog_client::Result<Arc<dyn PipelineApi>> {
            Err(ClientError::InvalidEndpoint("http://".to_string()))
        }
    }

    pub fn registry(count: usize) -> ToolRegistry {
        ToolRegistry::with_pipeline_tools(Arc::new(FakeConnector { count }))
    }
}
