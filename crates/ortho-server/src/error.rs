//! Error types for job orchestration.

use ortho_types::JawSide;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for orchestration operations.
pub type JobResult<T> = Result<T, JobError>;

/// Errors raised before or during a segmentation job.
///
/// Input-validation variants are reported to the client with a fixed
/// message; everything else surfaces the innermost failure's message.
#[derive(Debug, Error)]
pub enum JobError {
    /// The job named no scan at all.
    #[error("no scan paths provided")]
    NoScans,

    /// The job named no output directory.
    #[error("no output directory provided")]
    NoOutputDir,

    /// A named scan file does not exist.
    #[error("scan not found: {path}")]
    ScanMissing {
        /// The missing scan path.
        path: PathBuf,
    },

    /// The output directory could not be created.
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A worker process could not be spawned.
    #[error("failed to launch {side} worker: {message}")]
    Spawn {
        /// The jaw side the worker was meant to process.
        side: JawSide,
        /// What went wrong.
        message: String,
    },

    /// One or both sides of a job failed after the workers ran.
    #[error("{0}")]
    SidesFailed(FailureReport),

    /// Checkpoint verification failed at startup.
    #[error(transparent)]
    Model(#[from] ortho_model::ModelError),

    /// The server configuration file could not be read or parsed.
    #[error("cannot load config {path}: {message}")]
    Config {
        /// The configuration file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },
}

impl JobError {
    /// Whether this error is an input-validation failure, reported to
    /// clients with a fixed message rather than the error detail.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::NoScans | Self::NoOutputDir | Self::ScanMissing { .. } | Self::OutputDir { .. }
        )
    }
}

/// Per-side failure details of a partially or fully failed job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport(pub Vec<(JawSide, String)>);

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (side, detail)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{side} scan failed: {detail}")?;
        }
        Ok(())
    }
}
