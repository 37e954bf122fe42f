//! Model checkpoint locations.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The two checkpoint files the segmentation model loads: the
/// farthest-point-sampling stage and the boundary-refinement stage.
///
/// Both live at fixed, configured paths. A missing checkpoint is a
/// fatal startup error for the whole job, never a per-scan failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoints {
    /// Checkpoint for the sampling stage.
    pub fps: PathBuf,
    /// Checkpoint for the boundary stage.
    pub bdl: PathBuf,
}

impl Checkpoints {
    /// Create a checkpoint pair.
    #[must_use]
    pub const fn new(fps: PathBuf, bdl: PathBuf) -> Self {
        Self { fps, bdl }
    }

    /// Verify that both checkpoint files exist.
    ///
    /// # Errors
    ///
    /// [`ModelError::CheckpointMissing`] naming the first absent file.
    pub fn verify(&self) -> ModelResult<()> {
        for path in [&self.fps, &self.bdl] {
            if !path.is_file() {
                return Err(ModelError::CheckpointMissing { path: path.clone() });
            }
        }
        Ok(())
    }

    /// The checkpoint paths as command-line arguments for the external
    /// inference command.
    #[must_use]
    pub fn as_args(&self) -> Vec<String> {
        vec![
            "--checkpoint-fps".to_owned(),
            self.fps.display().to_string(),
            "--checkpoint-bdl".to_owned(),
            self.bdl.display().to_string(),
        ]
    }
}
