//! MCP server over stdio
//!
//! Each incoming line is handled on its own task so a slow log drain does
//! not hold up other requests. Responses are funneled through a channel to a
//! single writer, which keeps every response on its own line.

use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::protocol::{
    InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams,
    ToolCallResult,
};
use crate::tools::{HttpConnector, ToolRegistry};
use crate::transport::{MessageReader, MessageWriter};

const SERVER_NAME: &str = env!("CARGO_PKG_NAME");
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Handle one raw line; `None` means no reply is due
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                Some(JsonRpcResponse::parse_error(e))
            }
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("Handling method: {}", request.method);

        if request.is_notification() {
            if !request.method.starts_with("notifications/") {
                warn!("Ignoring notification for method: {}", request.method);
            }
            return None;
        }

        let id = request.id.clone();
        if !request.has_valid_version() {
            warn!("Rejecting request with jsonrpc version '{}'", request.jsonrpc);
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version '{}'",
                    request.jsonrpc
                )),
            ));
        }

        let result = match request.method.as_str() {
            "initialize" => to_value(InitializeResult::new(SERVER_NAME, SERVER_VERSION)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.definitions() })),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(err) => JsonRpcResponse::error(id, err),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: ToolCallParams = params
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params"))
            .and_then(|p| {
                serde_json::from_value(p)
                    .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
            })?;

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        let arguments = match params.arguments {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(JsonRpcError::invalid_params("Tool arguments must be an object")),
        };

        let output = tool.call(&arguments).await;
        to_value(ToolCallResult::text(output.text, output.is_error))
    }

    /// Serve requests until the reader hits EOF
    ///
    /// In-flight tool calls are allowed to finish before returning.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut reader = MessageReader::new(reader);
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer_task = tokio::spawn(async move {
            let mut writer = MessageWriter::new(writer);
            while let Some(response) = rx.recv().await {
                if let Err(e) = writer.write_message(&response).await {
                    error!("Failed to write response: {}", e);
                    break;
                }
            }
        });

        let server = Arc::new(self);
        let mut in_flight = JoinSet::new();

        while let Some(line) = reader.read_message().await? {
            let server = Arc::clone(&server);
            let tx = tx.clone();
            in_flight.spawn(async move {
                if let Some(response) = server.handle_line(&line).await {
                    let _ = tx.send(response);
                }
            });

            while let Some(result) = in_flight.try_join_next() {
                log_task_result(result);
            }
        }

        debug!("Input closed, waiting for {} request(s)", in_flight.len());
        while let Some(result) = in_flight.join_next().await {
            log_task_result(result);
        }

        drop(tx);
        writer_task.await?;
        Ok(())
    }
}

fn log_task_result(result: std::result::Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        error!("Request task failed: {}", e);
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal(e.to_string()))
}

/// Run the MCP server on this process's stdin/stdout
pub async fn run(config: &Config) -> Result<()> {
    info!(
        "Starting MCP server (environment: {}, endpoint: {})",
        config.environment, config.endpoint
    );

    let registry = ToolRegistry::with_pipeline_tools(Arc::new(HttpConnector::new(config)));
    let server = McpServer::new(registry);

    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    info!("MCP server stopped");
    Ok(())
}
