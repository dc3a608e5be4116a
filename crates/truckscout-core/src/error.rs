//! Error types for truckscout.

use thiserror::Error;

/// Result type alias using truckscout's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for truckscout operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset is malformed or lacks a required column (fatal at startup).
    #[error("Data error: {0}")]
    Data(String),

    /// A map click named a layer that does not exist.
    #[error("Unknown layer index {0}")]
    UnknownLayer(usize),

    /// A map click named a position past the end of its layer.
    #[error("Position {position} out of range for layer {layer} ({len} markers)")]
    SelectionOutOfRange {
        layer: usize,
        position: usize,
        len: usize,
    },

    /// Embedded content (financial blob) could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Chat-completion service failed or timed out.
    #[error("Service error: {0}")]
    Service(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the index-out-of-range family raised by selection resolution.
    pub fn is_selection_defect(&self) -> bool {
        matches!(
            self,
            Error::UnknownLayer(_) | Error::SelectionOutOfRange { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Service(format!("Request timed out: {}", e))
        } else {
            Error::Service(e.to_string())
        }
    }
}
