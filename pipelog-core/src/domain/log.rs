//! Log domain types

use serde::{Deserialize, Serialize};

/// A single build-log line produced by a pipeline task
///
/// The same shape is used on the wire (one NDJSON frame per record) and in
/// tool responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Sub-task that produced the line, when the task fans out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub task_name: String,
    #[serde(rename = "log_message")]
    pub message: String,
}

impl LogRecord {
    pub fn new(task_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            owner: None,
            task_name: task_name.into(),
            message: message.into(),
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_wire_field_names() {
        let record = LogRecord::new("build", "compiling").with_owner("step-1");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["owner"], "step-1");
        assert_eq!(json["task_name"], "build");
        assert_eq!(json["log_message"], "compiling");
    }

    #[test]
    fn test_record_omits_missing_owner() {
        let json = serde_json::to_value(LogRecord::new("test", "ok")).unwrap();
        assert!(json.get("owner").is_none());
    }

    #[test]
    fn test_record_decodes_without_owner() {
        let record: LogRecord =
            serde_json::from_str(r#"{"task_name":"lint","log_message":"clean"}"#).unwrap();
        assert_eq!(record, LogRecord::new("lint", "clean"));
    }
}
