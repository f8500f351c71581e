//! Core domain types
//!
//! These types mirror what the pipeline service reports and are shared between
//! the client (decodes them off the wire) and the MCP server (renders them).

pub mod log;
pub mod pipeline;
