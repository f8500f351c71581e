//! Pipelog Core
//!
//! Core types and abstractions shared by the Pipelog client and MCP server.
//!
//! This crate contains:
//! - Domain types: Pipeline and build-log records as the service reports them
//! - DTOs: Tool-facing response shapes (paged logs, structured errors)
//! - Limits: Hard ceilings applied to every log request

pub mod domain;
pub mod dto;
pub mod limits;
