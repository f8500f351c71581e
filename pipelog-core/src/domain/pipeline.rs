//! Pipeline domain types

use serde::{Deserialize, Serialize};

/// Pipeline execution as reported by the pipeline service
///
/// Optional fields are defaulted so older service versions that omit them
/// still decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: PipelineStatus,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub tasks: Vec<PipelineTask>,
}

/// Pipeline execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Queued,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl PipelineStatus {
    /// Whether the pipeline can still produce log output
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Queued | Self::Running)
    }
}

/// A task within a pipeline execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineTask {
    pub name: String,
    pub status: PipelineStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_decodes_minimal_payload() {
        let pipeline: Pipeline = serde_json::from_str(
            r#"{"id":"pipe-abc123","name":"api-build","status":"running"}"#,
        )
        .unwrap();

        assert_eq!(pipeline.id, "pipe-abc123");
        assert_eq!(pipeline.status, PipelineStatus::Running);
        assert!(pipeline.status.is_active());
        assert!(pipeline.tasks.is_empty());
        assert!(pipeline.created_at.is_none());
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let status: PipelineStatus = serde_json::from_str(r#""waiting_for_approval""#).unwrap();
        assert_eq!(status, PipelineStatus::Unknown);
        assert!(!status.is_active());
    }
}
