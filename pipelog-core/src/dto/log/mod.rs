//! Log DTOs returned to tool callers

use serde::{Deserialize, Serialize};

use crate::domain::log::LogRecord;

/// One page of build logs plus pagination metadata
///
/// Zero/false/absent metadata is omitted from the serialized form so a fully
/// drained stream serializes as just the entries and their count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedLogResponse {
    pub log_entries: Vec<LogRecord>,
    pub total_returned: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_skipped: usize,
    /// True when either the entry cap or the time limit truncated the stream
    #[serde(default, skip_serializing_if = "is_false")]
    pub limit_reached: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_more: bool,
    /// Value to pass as `skip_entries` for the next page; set only with `has_more`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_page_omits_metadata() {
        let response = PagedLogResponse {
            log_entries: vec![LogRecord::new("build", "done")],
            total_returned: 1,
            ..Default::default()
        };

        let json = serde_json::to_value(&response).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(json["total_returned"], 1);
        assert_eq!(json["log_entries"][0]["log_message"], "done");
    }

    #[test]
    fn test_empty_page_keeps_entries_array() {
        let json = serde_json::to_value(PagedLogResponse::default()).unwrap();
        assert_eq!(json["log_entries"], serde_json::json!([]));
        assert_eq!(json["total_returned"], 0);
    }

    #[test]
    fn test_truncated_page_serializes_pagination() {
        let response = PagedLogResponse {
            log_entries: Vec::new(),
            total_returned: 5,
            total_skipped: 10,
            limit_reached: true,
            has_more: true,
            next_offset: Some(15),
            message: Some("more".to_string()),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["total_skipped"], 10);
        assert_eq!(json["limit_reached"], true);
        assert_eq!(json["has_more"], true);
        assert_eq!(json["next_offset"], 15);
        assert_eq!(json["message"], "more");
    }
}
