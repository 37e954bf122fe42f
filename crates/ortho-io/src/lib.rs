//! File I/O for the orthoscan pipeline.
//!
//! Covers the three per-scan artifacts written under the job's output
//! directory, plus loading the input scan itself:
//!
//! - `<stem>.obj` - the colored mesh ([`save_obj`])
//! - `<stem>.json` - the primary prediction artifact
//!   ([`write_prediction`])
//! - `<stem>_braces_location.json` - the per-tooth anchors
//!   ([`write_brace_locations`])
//!
//! Jaw-side detection from the scan file lives here too, since it may
//! need to peek at the file contents.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod artifacts;
mod error;
mod jaw_detect;
mod obj;

pub use artifacts::{
    read_brace_locations, write_brace_locations, write_prediction, AnchorRecord, ArtifactPaths,
    PredictionArtifact,
};
pub use error::{ScanIoError, ScanIoResult};
pub use jaw_detect::detect_jaw;
pub use obj::{load_obj, save_obj};
