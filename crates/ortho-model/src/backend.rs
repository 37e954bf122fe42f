//! The segmentation backend seam.
//!
//! Production runs the external inference command; tests plug in a
//! closure. Either way the contract is the same: a scan file path in,
//! raw per-vertex `(sem, ins)` arrays out.

use crate::accelerator::DeviceId;
use crate::error::{ModelError, ModelResult};
use crate::prediction::Prediction;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// An opaque segmentation model.
pub trait SegmentationBackend {
    /// Run inference on the mesh at `scan_path`.
    ///
    /// # Errors
    ///
    /// Any [`ModelError`]; the caller treats every variant as fatal for
    /// the scan being processed.
    fn predict(&self, scan_path: &Path) -> ModelResult<Prediction>;

    /// Release accelerator memory held by the backend, best effort.
    ///
    /// Called from the device guard on both success and failure paths.
    /// The default does nothing, which is correct for backends that own
    /// no device state in this process.
    fn release_memory(&self) {}
}

/// Closure-backed segmentation backend for tests and embedding.
pub struct FnBackend<F>(F);

impl<F> FnBackend<F>
where
    F: Fn(&Path) -> ModelResult<Prediction>,
{
    /// Wrap a closure as a backend.
    pub const fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> SegmentationBackend for FnBackend<F>
where
    F: Fn(&Path) -> ModelResult<Prediction>,
{
    fn predict(&self, scan_path: &Path) -> ModelResult<Prediction> {
        (self.0)(scan_path)
    }
}

/// Backend that runs an external inference command.
///
/// The command is invoked as `<program> <scan_path>` and must print a
/// JSON object `{"sem": [...], "ins": [...]}` on stdout. When a device
/// is pinned, the child sees only that device through
/// `CUDA_VISIBLE_DEVICES`, so the external runtime's device 0 is the
/// assigned one.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: PathBuf,
    args: Vec<String>,
    device: Option<DeviceId>,
}

impl CommandBackend {
    /// Create a backend for the given inference program.
    #[must_use]
    pub const fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            device: None,
        }
    }

    /// Add fixed arguments passed before the scan path (checkpoint
    /// flags and the like).
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Pin inference to one accelerator device.
    #[must_use]
    pub const fn with_device(mut self, device: Option<DeviceId>) -> Self {
        self.device = device;
        self
    }
}

impl SegmentationBackend for CommandBackend {
    fn predict(&self, scan_path: &Path) -> ModelResult<Prediction> {
        info!(program = %self.program.display(), scan = %scan_path.display(), "invoking segmentation model");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(scan_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(device) = self.device {
            command.env("CUDA_VISIBLE_DEVICES", device.to_string());
        }

        let output = command.output().map_err(|e| {
            ModelError::invocation(format!(
                "failed to spawn {}: {e}",
                self.program.display()
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ModelError::invocation(format!(
                "model process exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let prediction: Prediction =
            serde_json::from_slice(&output.stdout).map_err(|e| ModelError::MalformedOutput {
                message: format!("stdout was not a prediction object: {e}"),
            })?;

        debug!(
            vertices = prediction.labels.len(),
            "model returned prediction arrays"
        );
        Ok(prediction)
    }

    fn release_memory(&self) {
        // The model runs in a child process that has already exited;
        // its device memory went with it.
    }
}
