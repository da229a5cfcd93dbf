// ABOUTME: Error types for NZB document parsing and serialisation.
// ABOUTME: Provides NzbError enum with Parse, Invalid, and Serialise variants.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while reading or writing an NZB document.
#[derive(Debug, Error)]
pub enum NzbError {
    /// Failed to parse the document data (malformed XML).
    #[error("failed to parse NZB document: {0}")]
    Parse(String),

    /// The data was parsed but is not a valid NZB document.
    #[error("invalid NZB document: {0}")]
    Invalid(String),

    /// Failed to serialise the document back to XML.
    #[error("failed to serialise NZB document: {0}")]
    Serialise(String),
}

impl NzbError {
    /// Creates a Parse error from an underlying XML error.
    pub fn parse(err: impl fmt::Display) -> Self {
        NzbError::Parse(err.to_string())
    }

    /// Creates an Invalid error with a custom message.
    pub fn invalid(msg: impl Into<String>) -> Self {
        NzbError::Invalid(msg.into())
    }
}
