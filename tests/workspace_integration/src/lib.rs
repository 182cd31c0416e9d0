//! Workspace-level integration tests for the beatsmith servers.
//!
//! These tests verify:
//! - Tool registration and schema generation across the MCP catalog
//! - Input validation agreement between the REST and MCP façades
//! - Output format consistency between the two façades

pub mod tool_schema;
pub mod input_validation;
pub mod output_format;
