//! Error types for scan I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan I/O operations.
pub type ScanIoResult<T> = Result<T, ScanIoError>;

/// Errors that can occur reading scans or writing artifacts.
#[derive(Debug, Error)]
pub enum ScanIoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Invalid file content (parse error).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// A face index referenced a vertex that does not exist.
    #[error("face index {index} out of range (mesh has {vertex_count} vertices)")]
    FaceIndexOutOfRange {
        /// The offending 0-based index.
        index: u32,
        /// Number of vertices read.
        vertex_count: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Float parsing error.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// Integer parsing error.
    #[error("integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

impl ScanIoError {
    /// Create an [`ScanIoError::InvalidContent`] error.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
