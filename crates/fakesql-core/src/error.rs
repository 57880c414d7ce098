//! Error types for fakesql

use thiserror::Error;

/// The DDL parser rejected one fragment of a submission.
///
/// A submission is all-or-nothing, so a single `ParseError` rejects every
/// fragment that came with it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("statement {} could not be parsed: {message}", .fragment_index + 1)]
pub struct ParseError {
    /// Zero-based position of the offending fragment in the submission
    pub fragment_index: usize,
    /// Parser diagnostic
    pub message: String,
}

impl ParseError {
    pub fn new(fragment_index: usize, message: impl Into<String>) -> Self {
        Self {
            fragment_index,
            message: message.into(),
        }
    }
}

/// Core error type for fakesql operations
#[derive(Error, Debug)]
pub enum FakeSqlError {
    #[error("Invalid SQL: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for fakesql operations
pub type Result<T> = std::result::Result<T, FakeSqlError>;
