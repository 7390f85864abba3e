//! Error types for the SEO checker.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for analysis operations
//! - `CommandError`: Serializable wrapper for errors handed back to a host
//! - `Result<T>`: Type alias for Results using AppError
//!
//! Scoring has no error type: it always produces a result and degrades
//! per category instead.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for analysis operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// The document could not be read at all (detached, navigated away,
    /// permission denied). Fatal for the analysis, never retried.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Another analysis already runs for the same page context
    #[error("An analysis is already running for {0}")]
    AnalysisInProgress(String),

    /// Settings file missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Create an extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::NetworkError(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidUrl(error.to_string())
    }
}

impl From<rquest::Error> for AppError {
    fn from(error: rquest::Error) -> Self {
        Self::NetworkError(error.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

// ============================================================================
// COMMAND ERROR (FOR RESPONSE PAYLOADS)
// ============================================================================

/// Wrapper for errors returned to the host that requested an analysis.
/// This type is serializable and can be sent over the message channel.
#[derive(Debug)]
pub struct CommandError(pub anyhow::Error);

impl std::error::Error for CommandError {}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for CommandError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("{:#}", self.0))
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(error: anyhow::Error) -> Self {
        Self(error)
    }
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        Self(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_error_serializes_as_plain_string() {
        let err = CommandError::from(AppError::extraction("tab closed"));
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Extraction error: tab closed\"");
    }

    #[test]
    fn url_parse_errors_map_to_invalid_url() {
        let err: AppError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, AppError::InvalidUrl(_)));
    }
}
