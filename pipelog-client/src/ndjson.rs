//! NDJSON framing for the log stream body
//!
//! The body arrives in arbitrary chunks; frames are complete only once their
//! terminating newline has been seen.

use memchr::memchr;
use pipelog_core::domain::log::LogRecord;
use serde::Deserialize;

use crate::error::{ClientError, Result};

/// Longest frame accepted before the stream is treated as corrupt
pub(crate) const MAX_FRAME_BYTES: usize = 1024 * 1024;

/// Accumulates body chunks and yields complete, non-blank lines
#[derive(Debug)]
pub(crate) struct LineBuffer {
    buffer: Vec<u8>,
    /// Bytes at the front of `buffer` already known to hold no newline
    scanned: usize,
    max_frame: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self {
            buffer: Vec::new(),
            scanned: 0,
            max_frame: MAX_FRAME_BYTES,
        }
    }
}

impl LineBuffer {
    #[cfg(test)]
    fn with_max_frame(max_frame: usize) -> Self {
        Self {
            max_frame,
            ..Self::default()
        }
    }

    /// Append a chunk and return every line it completed
    ///
    /// Fails once a single frame grows past the frame limit, whether or not
    /// its newline has arrived yet.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Result<Vec<String>> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = memchr(b'\n', &self.buffer[self.scanned..]) {
            let end = self.scanned + offset;
            self.check_frame_len(end - start)?;
            if let Some(line) = trimmed(&self.buffer[start..end]) {
                lines.push(line);
            }
            start = end + 1;
            self.scanned = start;
        }

        self.buffer.drain(..start);
        self.scanned = self.buffer.len();
        self.check_frame_len(self.buffer.len())?;
        Ok(lines)
    }

    fn check_frame_len(&self, len: usize) -> Result<()> {
        if len > self.max_frame {
            return Err(ClientError::ParseError(format!(
                "Log frame exceeds {} bytes",
                self.max_frame
            )));
        }
        Ok(())
    }

    /// Flush a final line that was not newline-terminated
    pub(crate) fn finish(&mut self) -> Option<String> {
        self.scanned = 0;
        let rest = std::mem::take(&mut self.buffer);
        trimmed(&rest)
    }
}

fn trimmed(bytes: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(bytes);
    let line = line.trim();
    (!line.is_empty()).then(|| line.to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireFrame {
    Status { error: StatusFrame },
    Record(LogRecord),
}

#[derive(Deserialize)]
struct StatusFrame {
    code: String,
    #[serde(default)]
    message: String,
}

/// Decode one frame
///
/// Returns `Ok(None)` for an explicit `OK` status frame (clean end of
/// stream). Non-OK status frames become errors; `DEADLINE_EXCEEDED` is kept
/// distinguishable so the drainer can treat it as a truncation.
pub(crate) fn decode_frame(line: &str) -> Result<Option<LogRecord>> {
    let frame: WireFrame = serde_json::from_str(line)
        .map_err(|e| ClientError::ParseError(format!("Invalid log frame: {}", e)))?;

    match frame {
        WireFrame::Record(record) => Ok(Some(record)),
        WireFrame::Status { error } => match error.code.as_str() {
            "OK" => Ok(None),
            "DEADLINE_EXCEEDED" => Err(ClientError::DeadlineExceeded(error.message)),
            _ => Err(ClientError::StreamStatus {
                code: error.code,
                message: error.message,
            }),
        },
    }
}
