//! Accelerator device inventory and scoped binding.
//!
//! Device selection is explicit: the orchestrator assigns a device id
//! per task at construction time and the worker binds it through a
//! [`DeviceGuard`] for the duration of the scan. There is no ambient
//! process-wide "current device" state. The guard releases device
//! memory (best effort) on every exit path, normal or not, so repeated
//! jobs against a long-lived device do not leak.

use std::env;
use tracing::{debug, warn};

/// Identifier of one accelerator device.
pub type DeviceId = u32;

/// The set of accelerator devices visible to this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInventory {
    count: u32,
}

impl DeviceInventory {
    /// An inventory with a known device count.
    #[must_use]
    pub const fn with_count(count: u32) -> Self {
        Self { count }
    }

    /// Detect visible devices from the environment.
    ///
    /// Honors `CUDA_VISIBLE_DEVICES`: unset means no devices, an empty
    /// value means none, otherwise the number of comma-separated
    /// entries.
    #[must_use]
    pub fn detect() -> Self {
        let count = match env::var("CUDA_VISIBLE_DEVICES") {
            Ok(v) if v.trim().is_empty() => 0,
            #[allow(clippy::cast_possible_truncation)]
            Ok(v) => v.split(',').filter(|s| !s.trim().is_empty()).count() as u32,
            Err(_) => 0,
        };
        debug!(count, "detected accelerator devices");
        Self { count }
    }

    /// Number of visible devices.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Whether any device is available.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Scoped binding of an optional accelerator device.
///
/// Dropping the guard releases the device memory cache (best effort).
/// `ReleaseMemory` is supplied by the caller because only the model
/// backend knows how to talk to its runtime; the default used by the
/// pipeline simply asks the backend to clear its cache.
pub struct DeviceGuard<'a> {
    device: Option<DeviceId>,
    release: Option<Box<dyn FnOnce(Option<DeviceId>) + 'a>>,
}

impl std::fmt::Debug for DeviceGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceGuard")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl<'a> DeviceGuard<'a> {
    /// Bind a device for the current task.
    ///
    /// `release` runs exactly once when the guard drops, on success and
    /// failure paths alike.
    #[must_use]
    pub fn bind(
        device: Option<DeviceId>,
        release: impl FnOnce(Option<DeviceId>) + 'a,
    ) -> Self {
        if let Some(id) = device {
            debug!(device = id, "bound accelerator device");
        }
        Self {
            device,
            release: Some(Box::new(release)),
        }
    }

    /// The bound device, if any.
    #[must_use]
    pub const fn device(&self) -> Option<DeviceId> {
        self.device
    }
}

impl Drop for DeviceGuard<'_> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.device);
            if let Some(id) = self.device {
                debug!(device = id, "released accelerator memory");
            }
        } else {
            warn!("device guard dropped twice");
        }
    }
}
