//! External segmentation-model interface.
//!
//! The trained tooth-segmentation model is an external collaborator: this
//! crate treats it as an opaque function from a scan file to per-vertex
//! label and instance arrays, behind the [`SegmentationBackend`] trait.
//!
//! Also here: the lower-jaw label shift that unifies the upper/lower
//! label space, prediction shape validation, checkpoint verification,
//! and accelerator-device inventory and scoped binding.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod accelerator;
mod backend;
mod checkpoints;
mod error;
mod prediction;

pub use accelerator::{DeviceGuard, DeviceId, DeviceInventory};
pub use backend::{CommandBackend, FnBackend, SegmentationBackend};
pub use checkpoints::Checkpoints;
pub use error::{ModelError, ModelResult};
pub use prediction::Prediction;
