//! Data Transfer Objects for tool responses
//!
//! This module contains the structured payloads handed back to MCP callers.
//! Field names are part of the external contract and must not change.

pub mod error;
pub mod log;
