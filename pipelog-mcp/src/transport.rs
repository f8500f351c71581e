//! Newline-delimited JSON transport
//!
//! The reader and writer are separate so responses from concurrent tool
//! calls can be written while the next request is still being read.

use serde::Serialize;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::trace;

/// Errors raised while moving messages over the transport
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Reads one raw message per line, skipping blank lines
pub struct MessageReader<R> {
    reader: R,
}

impl<R: AsyncBufRead + Unpin> MessageReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next non-empty line, or `None` at EOF
    pub async fn read_message(&mut self) -> TransportResult<Option<String>> {
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line).await? == 0 {
                trace!("EOF reached on transport input");
                return Ok(None);
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            trace!(message = %trimmed, "Received message");
            return Ok(Some(trimmed.to_string()));
        }
    }
}

/// Writes one JSON document per line and flushes after each
pub struct MessageWriter<W: AsyncWrite + Unpin> {
    writer: BufWriter<W>,
}

impl<W: AsyncWrite + Unpin> MessageWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    pub async fn write_message<T: Serialize>(&mut self, message: &T) -> TransportResult<()> {
        let json = serde_json::to_string(message)?;
        trace!(message = %json, "Sending message");

        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}
