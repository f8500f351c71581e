//! Bounded consumption of build-log streams
//!
//! A log stream has no natural end while its pipeline is running. This module
//! makes it safe to expose through a single tool response:
//!
//! - [`LogSource`]: an ordered, non-rewindable producer of [`LogRecord`]s
//! - [`drain`]: pulls from a source until the entry cap, the deadline, the end
//!   of the stream or an error stops it, skipping a pagination prefix
//! - [`assemble`]: turns the drained records into a [`PagedLogResponse`]
//!
//! [`LogRecord`]: pipelog_core::domain::log::LogRecord
//! [`PagedLogResponse`]: pipelog_core::dto::log::PagedLogResponse

mod drain;
mod page;
mod source;

pub use drain::{DrainOutcome, DrainRequest, StopReason, drain};
pub use page::assemble;
pub use source::{LogSource, MemorySource};
