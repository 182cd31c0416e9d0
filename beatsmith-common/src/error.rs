//! Error types for the beatsmith servers.
//!
//! This module provides a unified error hierarchy using `thiserror` for
//! consistent error handling across both façades.
//!
//! # Error Categories
//!
//! - `ConfigError`: Missing or invalid configuration
//! - `Error::Validation`: Input validation failures (missing/malformed fields)
//! - `Error::Credential`: Missing or empty ElevenLabs API key
//! - `Error::UnknownTool`: Tool dispatch received an unrecognized name
//! - `Error::Internal`: Any other unexpected failure
//!
//! Upstream HTTP and transport faults are deliberately *not* part of this
//! hierarchy at the generation-client boundary: the client converts them
//! into failure-flagged results instead of raising them. Only validation
//! and dispatch faults travel up to the façade layer.

use thiserror::Error;

/// Unified error type for the beatsmith servers.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (invalid env var values)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or empty caller credential
    #[error("Credential error: {0}")]
    Credential(String),

    /// Tool dispatch received a name outside the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Unexpected internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new validation error.
    ///
    /// # Example
    ///
    /// ```
    /// use beatsmith_common::error::Error;
    ///
    /// let err = Error::validation("prompt cannot be empty");
    /// assert!(err.to_string().contains("prompt cannot be empty"));
    /// ```
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Create a new credential error.
    pub fn credential(message: impl Into<String>) -> Self {
        Error::Credential(message.into())
    }

    /// Create a new unknown-tool error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Error::UnknownTool(name.into())
    }

    /// Create a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl ConfigError {
    /// Create a new invalid value error.
    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue(name.into(), reason.into())
    }
}

/// Result type alias using the unified Error type.
pub type Result<T> = std::result::Result<T, Error>;
