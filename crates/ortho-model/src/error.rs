//! Error types for model invocation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while invoking the external segmentation model or
/// validating its output.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A model checkpoint file is missing.
    #[error("model checkpoint not found: {path}")]
    CheckpointMissing {
        /// Path that was expected to exist.
        path: PathBuf,
    },

    /// The external model process could not be started or exited
    /// unsuccessfully.
    #[error("model invocation failed: {message}")]
    Invocation {
        /// Description of the failure, including any stderr detail.
        message: String,
    },

    /// The model returned output that does not parse as a prediction.
    #[error("malformed model output: {message}")]
    MalformedOutput {
        /// Description of what was malformed.
        message: String,
    },

    /// The label and instance arrays disagree with each other or with
    /// the mesh vertex count.
    #[error(
        "prediction shape mismatch: {labels} labels, {instances} instances, {vertices} mesh vertices"
    )]
    ShapeMismatch {
        /// Length of the semantic label array.
        labels: usize,
        /// Length of the instance id array.
        instances: usize,
        /// Vertex count of the source mesh.
        vertices: usize,
    },

    /// I/O error talking to the model process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error on the model's output stream.
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// Create an [`ModelError::Invocation`] with the given message.
    #[must_use]
    pub fn invocation(message: impl Into<String>) -> Self {
        Self::Invocation {
            message: message.into(),
        }
    }
}
