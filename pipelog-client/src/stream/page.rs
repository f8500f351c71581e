//! Response assembler

use pipelog_core::dto::log::PagedLogResponse;
use std::time::Duration;

use super::drain::{DrainOutcome, StopReason};
use crate::error::Result;

/// Build the caller-facing page from a drain outcome
///
/// A source error is returned as `Err` and any records collected before it
/// are dropped: without a clear truncation reason a partial list would read
/// as the complete log.
pub fn assemble(outcome: DrainOutcome) -> Result<PagedLogResponse> {
    let DrainOutcome {
        records,
        total_skipped,
        stop_reason,
        probable_more,
        time_limit,
    } = outcome;

    let total_returned = records.len();
    let limit_reached = stop_reason.is_truncated();
    let has_more = matches!(stop_reason, StopReason::LimitReached) && probable_more;
    let next_offset = has_more.then_some(total_skipped + total_returned);

    let message = match stop_reason {
        StopReason::SourceError(err) => return Err(err),
        StopReason::Exhausted => None,
        StopReason::DeadlineExceeded => Some(format!(
            "Log streaming timed out after {}. Showing {} log entries (skipped {}). \
             The pipeline may have produced more logs. Check the pipeline status to see if it's still running.",
            describe(time_limit),
            total_returned,
            total_skipped
        )),
        StopReason::LimitReached if has_more => Some(format!(
            "Log entry limit reached. Showing {} log entries (skipped {}). \
             More logs are available. Use skip_entries={} to fetch the next page.",
            total_returned,
            total_skipped,
            total_skipped + total_returned
        )),
        StopReason::LimitReached => Some(format!(
            "Showing {} log entries (skipped {}). This is the last page of logs.",
            total_returned, total_skipped
        )),
    };

    Ok(PagedLogResponse {
        log_entries: records,
        total_returned,
        total_skipped,
        limit_reached,
        has_more,
        next_offset,
        message,
    })
}

/// Human-readable time limit ("2 minutes", "45 seconds")
fn describe(limit: Duration) -> String {
    let secs = limit.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        let minutes = secs / 60;
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    } else {
        format!("{} second{}", secs, if secs == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use pipelog_core::domain::log::LogRecord;
    use pipelog_core::limits::MAX_LOG_STREAM_DURATION;

    fn outcome(count: usize, skipped: usize, stop_reason: StopReason, more: bool) -> DrainOutcome {
        DrainOutcome {
            records: (0..count)
                .map(|i| LogRecord::new("build", format!("line {}", i)))
                .collect(),
            total_skipped: skipped,
            stop_reason,
            probable_more: more,
            time_limit: MAX_LOG_STREAM_DURATION,
        }
    }

    #[test]
    fn test_exhausted_page_has_no_message() {
        let page = assemble(outcome(3, 0, StopReason::Exhausted, false)).unwrap();

        assert_eq!(page.total_returned, 3);
        assert_eq!(page.log_entries.len(), 3);
        assert!(!page.limit_reached);
        assert!(!page.has_more);
        assert!(page.next_offset.is_none());
        assert!(page.message.is_none());
    }

    #[test]
    fn test_exhausted_ignores_stale_look_ahead() {
        let page = assemble(outcome(2, 8, StopReason::Exhausted, true)).unwrap();
        assert!(!page.has_more);
        assert!(page.next_offset.is_none());
        assert_eq!(page.total_skipped, 8);
    }

    #[test]
    fn test_limit_with_more_points_at_next_page() {
        let page = assemble(outcome(5, 10, StopReason::LimitReached, true)).unwrap();

        assert!(page.limit_reached);
        assert!(page.has_more);
        assert_eq!(page.next_offset, Some(15));
        let message = page.message.unwrap();
        assert!(message.contains("skip_entries=15"));
        assert!(message.contains("Showing 5 log entries (skipped 10)"));
    }

    #[test]
    fn test_limit_without_more_is_last_page() {
        let page = assemble(outcome(5, 0, StopReason::LimitReached, false)).unwrap();

        assert!(page.limit_reached);
        assert!(!page.has_more);
        assert!(page.next_offset.is_none());
        assert!(page.message.unwrap().contains("last page"));
    }

    #[test]
    fn test_deadline_page_is_truncated_without_more() {
        let page = assemble(outcome(40, 0, StopReason::DeadlineExceeded, false)).unwrap();

        assert_eq!(page.total_returned, 40);
        assert!(page.limit_reached);
        assert!(!page.has_more);
        assert!(page.next_offset.is_none());
        let message = page.message.unwrap();
        assert!(message.contains("timed out after 2 minutes"));
        assert!(message.contains("Showing 40 log entries"));
        assert!(message.contains("still running"));
    }

    #[test]
    fn test_source_error_discards_records() {
        let err = ClientError::StreamStatus {
            code: "INTERNAL".to_string(),
            message: "reset".to_string(),
        };
        let result = assemble(outcome(4, 0, StopReason::SourceError(err), false));

        assert!(matches!(result, Err(ClientError::StreamStatus { .. })));
    }

    #[test]
    fn test_describe_time_limit() {
        assert_eq!(describe(Duration::from_secs(120)), "2 minutes");
        assert_eq!(describe(Duration::from_secs(60)), "1 minute");
        assert_eq!(describe(Duration::from_secs(45)), "45 seconds");
        assert_eq!(describe(Duration::from_secs(1)), "1 second");
    }
}
