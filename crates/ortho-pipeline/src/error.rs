//! Error types for the scan pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that fail one scan's pipeline run.
///
/// Model, geometry and I/O failures pass through transparently so the
/// message surfaced to the caller is the innermost failure's, not a
/// generic wrapper.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The jaw side was neither given on the task nor detectable from
    /// the scan file.
    #[error("cannot determine jaw side for {path}")]
    UnknownJaw {
        /// The scan whose jaw side is unknown.
        path: PathBuf,
    },

    /// Model invocation or output validation failed.
    #[error(transparent)]
    Model(#[from] ortho_model::ModelError),

    /// Mesh partitioning, coloring or anchor resolution failed.
    #[error(transparent)]
    Geometry(#[from] ortho_geometry::GeometryError),

    /// Reading the scan or writing an artifact failed.
    #[error(transparent)]
    Io(#[from] ortho_io::ScanIoError),
}
