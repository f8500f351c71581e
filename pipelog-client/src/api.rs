//! Service abstraction
//!
//! Callers that only need "fetch a pipeline" and "open its log stream" depend
//! on [`PipelineApi`] rather than the concrete HTTP client, so tests can swap
//! in a fake service.

use async_trait::async_trait;
use pipelog_core::domain::pipeline::Pipeline;

use crate::PipelineClient;
use crate::error::Result;
use crate::stream::LogSource;

/// Operations the MCP tools need from the pipeline service
#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Fetch a pipeline by its ID
    async fn get_pipeline(&self, pipeline_id: &str) -> Result<Pipeline>;

    /// Open the build-log stream of a pipeline
    ///
    /// The returned source owns the underlying connection; dropping it
    /// releases the connection.
    async fn open_log_stream(&self, pipeline_id: &str) -> Result<Box<dyn LogSource>>;
}

#[async_trait]
impl PipelineApi for PipelineClient {
    async fn get_pipeline(&self, pipeline_id: &str) -> Result<Pipeline> {
        PipelineClient::get_pipeline(self, pipeline_id).await
    }

    async fn open_log_stream(&self, pipeline_id: &str) -> Result<Box<dyn LogSource>> {
        let stream = self.log_stream(pipeline_id).await?;
        Ok(Box::new(stream))
    }
}
