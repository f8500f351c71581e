//! Pipeline-related API endpoints

use crate::PipelineClient;
use crate::error::Result;
use pipelog_core::domain::pipeline::Pipeline;
use tracing::{debug, warn};

impl PipelineClient {
    // =============================================================================
    // Pipeline Query
    // =============================================================================

    /// Get a pipeline by ID
    ///
    /// # Arguments
    /// * `pipeline_id` - The pipeline ID (e.g., "pipe-abc123")
    ///
    /// # Returns
    /// The pipeline details
    ///
    /// # Example
    /// ```no_run
    /// # use pipelog_client::PipelineClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = PipelineClient::new("localhost:8080", "my-api-key")?;
    /// let pipeline = client.get_pipeline("pipe-abc123").await?;
    /// println!("{} is {:?}", pipeline.name, pipeline.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_pipeline(&self, pipeline_id: &str) -> Result<Pipeline> {
        debug!("Querying pipeline by ID: {}", pipeline_id);

        let url = self.url(&["v1", "pipelines", pipeline_id])?;
        let response = self.get(url, "application/json").send().await?;

        self.handle_response(response, pipeline_id)
            .await
            .inspect_err(|e| warn!("Error querying pipeline {}: {}", pipeline_id, e))
    }
}
