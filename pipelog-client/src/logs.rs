//! Build-log streaming endpoint

use async_trait::async_trait;
use pipelog_core::domain::log::LogRecord;
use std::collections::VecDeque;
use tracing::{debug, warn};

use crate::PipelineClient;
use crate::error::Result;
use crate::ndjson::{self, LineBuffer};
use crate::stream::LogSource;

const NDJSON: &str = "application/x-ndjson";

impl PipelineClient {
    // =============================================================================
    // Pipeline Logs
    // =============================================================================

    /// Open the build-log stream of a pipeline
    ///
    /// Logs come from the live buffer while the pipeline runs and from
    /// archived storage once it has finished; either way they arrive as one
    /// ordered stream. The returned [`HttpLogStream`] is not bounded: wrap it
    /// in [`crate::drain`] to read a single page.
    ///
    /// # Arguments
    /// * `pipeline_id` - The pipeline ID (e.g., "pipe-abc123")
    pub async fn log_stream(&self, pipeline_id: &str) -> Result<HttpLogStream> {
        debug!("Starting log stream for pipeline: {}", pipeline_id);

        let url = self.url(&["v1", "pipelines", pipeline_id, "logs", "stream"])?;
        let response = self.get(url, NDJSON).send().await?;
        let response = self
            .check_status(response, pipeline_id)
            .await
            .inspect_err(|e| {
                warn!(
                    "Error starting log stream for pipeline {}: {}",
                    pipeline_id, e
                )
            })?;

        debug!("Started log stream for pipeline: {}", pipeline_id);

        Ok(HttpLogStream::new(pipeline_id, response))
    }
}

/// An open build-log stream backed by a streaming HTTP response
///
/// Dropping the stream drops the response and with it the connection.
#[derive(Debug)]
pub struct HttpLogStream {
    pipeline_id: String,
    response: reqwest::Response,
    buffer: LineBuffer,
    pending: VecDeque<String>,
    finished: bool,
    records_read: usize,
}

impl HttpLogStream {
    fn new(pipeline_id: &str, response: reqwest::Response) -> Self {
        Self {
            pipeline_id: pipeline_id.to_string(),
            response,
            buffer: LineBuffer::default(),
            pending: VecDeque::new(),
            finished: false,
            records_read: 0,
        }
    }
}

#[async_trait]
impl LogSource for HttpLogStream {
    async fn next_record(&mut self) -> Result<Option<LogRecord>> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                match ndjson::decode_frame(&line)? {
                    Some(record) => {
                        self.records_read += 1;
                        return Ok(Some(record));
                    }
                    None => {
                        self.finished = true;
                        self.pending.clear();
                        return Ok(None);
                    }
                }
            }

            if self.finished {
                return Ok(None);
            }

            match self.response.chunk().await? {
                Some(chunk) => {
                    let lines = self.buffer.push(&chunk)?;
                    self.pending.extend(lines);
                }
                None => {
                    self.finished = true;
                    self.pending.extend(self.buffer.finish());
                }
            }
        }
    }
}

impl Drop for HttpLogStream {
    fn drop(&mut self) {
        debug!(
            "Closing log stream for pipeline {} after {} record(s)",
            self.pipeline_id, self.records_read
        );
    }
}
