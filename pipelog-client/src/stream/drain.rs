//! Stream drainer
//!
//! Pulls records from a [`LogSource`] until one of four things happens: the
//! entry cap is reached, the deadline passes, the stream ends, or the stream
//! fails. Each pull is a single wait racing the next record against the
//! deadline.

use pipelog_core::domain::log::LogRecord;
use pipelog_core::limits::{MAX_LOG_ENTRIES, MAX_LOG_STREAM_DURATION};
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use super::source::LogSource;
use crate::error::{ClientError, Result};

/// Upper bound on the up-front allocation for kept records
const INITIAL_CAPACITY: usize = 256;

/// Parameters of a single drain
///
/// The deadline is stamped when the request is created, so build it right
/// before opening the stream: opening and draining share one time budget.
#[derive(Debug, Clone)]
pub struct DrainRequest {
    max_entries: usize,
    requested_max_entries: i64,
    skip_entries: usize,
    time_limit: Duration,
    deadline: Instant,
}

impl DrainRequest {
    /// Create a request with the default time limit
    ///
    /// `max_entries` above [`MAX_LOG_ENTRIES`] is reduced to the ceiling
    /// (see [`DrainRequest::is_clamped`]); zero or negative is rejected.
    /// Negative `skip_entries` is treated as zero.
    pub fn new(max_entries: i64, skip_entries: i64) -> Result<Self> {
        if max_entries <= 0 {
            return Err(ClientError::InvalidRequest(format!(
                "max_entries must be between 1 and {}, got {}",
                MAX_LOG_ENTRIES, max_entries
            )));
        }

        let clamped = usize::try_from(max_entries)
            .unwrap_or(usize::MAX)
            .min(MAX_LOG_ENTRIES);
        let skip_entries = usize::try_from(skip_entries.max(0)).unwrap_or(usize::MAX);

        Ok(Self {
            max_entries: clamped,
            requested_max_entries: max_entries,
            skip_entries,
            time_limit: MAX_LOG_STREAM_DURATION,
            deadline: Instant::now() + MAX_LOG_STREAM_DURATION,
        })
    }

    /// Restart the clock with a different time limit
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self.deadline = Instant::now() + time_limit;
        self
    }

    /// Effective entry cap after clamping
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// The cap as the caller asked for it
    pub fn requested_max_entries(&self) -> i64 {
        self.requested_max_entries
    }

    /// Whether the requested cap was reduced to the ceiling
    pub fn is_clamped(&self) -> bool {
        self.requested_max_entries > self.max_entries as i64
    }

    pub fn skip_entries(&self) -> usize {
        self.skip_entries
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// Why draining stopped
#[derive(Debug)]
pub enum StopReason {
    /// The stream ended cleanly
    Exhausted,
    /// The entry cap was reached
    LimitReached,
    /// The deadline passed; records kept so far are still valid
    DeadlineExceeded,
    /// The stream failed; records kept so far must not be presented
    SourceError(ClientError),
}

impl StopReason {
    /// Whether the caller saw less than the whole stream without an error
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::LimitReached | Self::DeadlineExceeded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exhausted => "exhausted",
            Self::LimitReached => "limit_reached",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::SourceError(_) => "source_error",
        }
    }
}

/// Result of draining a source
#[derive(Debug)]
pub struct DrainOutcome {
    /// Kept records in stream order; never longer than the entry cap
    pub records: Vec<LogRecord>,
    /// Records actually discarded for pagination (may be below the request)
    pub total_skipped: usize,
    pub stop_reason: StopReason,
    /// Look-ahead result; only meaningful with [`StopReason::LimitReached`]
    pub probable_more: bool,
    /// Time limit the deadline was derived from
    pub time_limit: Duration,
}

impl DrainOutcome {
    /// Outcome for a stream whose deadline passed before the first pull
    pub fn deadline_exceeded(request: &DrainRequest) -> Self {
        Self {
            records: Vec::new(),
            total_skipped: 0,
            stop_reason: StopReason::DeadlineExceeded,
            probable_more: false,
            time_limit: request.time_limit(),
        }
    }
}

enum Pull {
    Record(LogRecord),
    End,
    Deadline,
    Failed(ClientError),
}

/// Wait for the next record or the deadline, whichever comes first
async fn pull<S: LogSource + ?Sized>(source: &mut S, deadline: Instant) -> Pull {
    if Instant::now() >= deadline {
        return Pull::Deadline;
    }

    match time::timeout_at(deadline, source.next_record()).await {
        Err(_) => Pull::Deadline,
        Ok(Ok(Some(record))) => Pull::Record(record),
        Ok(Ok(None)) => Pull::End,
        Ok(Err(err)) if err.is_deadline_exceeded() => Pull::Deadline,
        Ok(Err(err)) => Pull::Failed(err),
    }
}

/// Drain a source into a bounded page
///
/// The source is consumed: it is dropped, and its connection released, before
/// this function returns, whatever stopped the drain.
///
/// Once the cap is reached, one extra record is pulled (same deadline) to
/// tell whether more records exist. That record is discarded. If the deadline
/// cuts the look-ahead, the drain is reported as
/// [`StopReason::DeadlineExceeded`].
pub async fn drain<S: LogSource>(mut source: S, request: &DrainRequest) -> DrainOutcome {
    let deadline = request.deadline();
    let max_entries = request.max_entries();
    let skip_entries = request.skip_entries();

    if request.is_clamped() {
        warn!(
            "Requested max_entries {} exceeds limit {}, using limit",
            request.requested_max_entries(),
            max_entries
        );
    }

    let mut records = Vec::with_capacity(max_entries.min(INITIAL_CAPACITY));
    let mut skipped = 0;

    let stop_reason = loop {
        if records.len() >= max_entries {
            break StopReason::LimitReached;
        }

        match pull(&mut source, deadline).await {
            Pull::Record(record) => {
                if skipped < skip_entries {
                    skipped += 1;
                    continue;
                }
                records.push(record);
            }
            Pull::End => break StopReason::Exhausted,
            Pull::Deadline => break StopReason::DeadlineExceeded,
            Pull::Failed(err) => break StopReason::SourceError(err),
        }
    };

    let (stop_reason, probable_more) = match stop_reason {
        StopReason::LimitReached => match pull(&mut source, deadline).await {
            Pull::Record(_) => (StopReason::LimitReached, true),
            Pull::End => (StopReason::LimitReached, false),
            Pull::Deadline => (StopReason::DeadlineExceeded, false),
            Pull::Failed(err) => {
                debug!("Look-ahead pull failed, assuming more entries: {}", err);
                (StopReason::LimitReached, true)
            }
        },
        other => (other, false),
    };

    drop(source);

    debug!(
        "Drained {} record(s), skipped {}, stop reason: {}",
        records.len(),
        skipped,
        stop_reason.as_str()
    );

    DrainOutcome {
        records,
        total_skipped: skipped,
        stop_reason,
        probable_more,
        time_limit: request.time_limit(),
    }
}
