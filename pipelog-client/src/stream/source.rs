//! Log source abstraction

use async_trait::async_trait;
use pipelog_core::domain::log::LogRecord;

use crate::error::Result;

/// An ordered, one-directional producer of log records
///
/// `next_record` waits until a record arrives (`Ok(Some(_))`), the stream
/// ends cleanly (`Ok(None)`) or fails (`Err(_)`). Deadlines are enforced by
/// the caller, so implementations may block indefinitely.
///
/// Sources are not rewindable. Any connection they hold must be released
/// when the source is dropped.
#[async_trait]
pub trait LogSource: Send {
    async fn next_record(&mut self) -> Result<Option<LogRecord>>;
}

#[async_trait]
impl<S: LogSource + ?Sized> LogSource for Box<S> {
    async fn next_record(&mut self) -> Result<Option<LogRecord>> {
        (**self).next_record().await
    }
}

/// A source replaying records held in memory
///
/// Useful for re-serving captured logs, and as a stand-in for the service in
/// tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: std::vec::IntoIter<LogRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<LogRecord>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }
}

impl From<Vec<LogRecord>> for MemorySource {
    fn from(records: Vec<LogRecord>) -> Self {
        Self::new(records)
    }
}

#[async_trait]
impl LogSource for MemorySource {
    async fn next_record(&mut self) -> Result<Option<LogRecord>> {
        Ok(self.records.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_source_yields_in_order_then_ends() {
        let mut source = MemorySource::from(vec![
            LogRecord::new("build", "one"),
            LogRecord::new("build", "two"),
        ]);

        assert_eq!(source.next_record().await.unwrap().unwrap().message, "one");
        assert_eq!(source.next_record().await.unwrap().unwrap().message, "two");
        assert!(source.next_record().await.unwrap().is_none());
        assert!(source.next_record().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_boxed_source_delegates() {
        let mut source: Box<dyn LogSource> =
            Box::new(MemorySource::new(vec![LogRecord::new("lint", "clean")]));

        assert!(source.next_record().await.unwrap().is_some());
        assert!(source.next_record().await.unwrap().is_none());
    }
}
