//! Task and report types exchanged with the orchestrator.

use ortho_io::ArtifactPaths;
use ortho_model::DeviceId;
use ortho_types::JawSide;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One unit of work: process a single scan into its artifacts.
///
/// Created by the orchestrator when a job is accepted, consumed exactly
/// once by a worker, discarded after the result is collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTask {
    /// Path to the input scan mesh.
    pub scan_path: PathBuf,
    /// Directory the artifacts are written into.
    pub output_dir: PathBuf,
    /// Jaw side, when the orchestrator already knows it. `None` lets
    /// the worker detect it from the scan file.
    pub jaw: Option<JawSide>,
    /// Accelerator device to pin, if any.
    pub device: Option<DeviceId>,
}

impl ScanTask {
    /// Create a task with no jaw side or device pinned.
    #[must_use]
    pub const fn new(scan_path: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            scan_path,
            output_dir,
            jaw: None,
            device: None,
        }
    }

    /// Set the jaw side.
    #[must_use]
    pub const fn with_jaw(mut self, jaw: JawSide) -> Self {
        self.jaw = Some(jaw);
        self
    }

    /// Pin an accelerator device.
    #[must_use]
    pub const fn with_device(mut self, device: Option<DeviceId>) -> Self {
        self.device = device;
        self
    }
}

/// Result of one successful pipeline run.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Jaw side the scan was processed as.
    pub jaw: JawSide,
    /// Number of brace anchors resolved.
    pub anchor_count: usize,
    /// Where the artifacts were written.
    pub artifacts: ArtifactPaths,
}
