//! Error types for the converter.

use thiserror::Error;

/// Errors reported by [`convert_json`](crate::convert_json).
#[derive(Debug, Error)]
pub enum DtcgError {
    /// The input is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The converted tree could not be written back out.
    #[error("failed to serialize converted tokens: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result type for converter operations.
pub type Result<T> = std::result::Result<T, DtcgError>;
