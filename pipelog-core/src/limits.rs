//! Request limits
//!
//! Ceilings applied to every build-log request regardless of what the caller
//! asks for.

use std::time::Duration;

/// Maximum number of log entries returned by a single request.
pub const MAX_LOG_ENTRIES: usize = 5000;

/// Maximum wall-clock time spent draining a log stream.
///
/// Kept under the usual tool-call timeouts of MCP hosts so a truncated page
/// is returned before the host gives up on the call.
pub const MAX_LOG_STREAM_DURATION: Duration = Duration::from_secs(2 * 60);
