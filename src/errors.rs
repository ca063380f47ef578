/*!
 * Error types for the subgrab application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while reading a timed-text XML document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The document is not well-formed XML or has no root element
    #[error("Malformed timed-text document: {0}")]
    Malformed(String),

    /// A cue is missing a timing attribute or carries a bad value
    #[error("Cue {index}: invalid numeric field '{attribute}' (value: {value:?})")]
    InvalidNumericField {
        /// Zero-based position of the cue in the document
        index: usize,
        /// Attribute name (`start` or `dur`)
        attribute: &'static str,
        /// Raw attribute value, `None` when absent
        value: Option<String>,
    },
}

/// Errors that can occur while rendering a subtitle format
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Upstream parsing failed
    #[error("format conversion failed: {0}")]
    Parse(#[from] ParseError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from timed-text parsing
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error from format conversion
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
