//! The per-scan processing pipeline.
//!
//! One [`ScanTask`] in, three artifacts out: the colored mesh, the
//! primary prediction JSON, and the brace-locations JSON. This is the
//! code that runs inside a worker - either in-process for single-scan
//! jobs or inside an isolated worker process for dual-scan jobs; it
//! neither knows nor cares which.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod processor;
mod task;

pub use error::{PipelineError, PipelineResult};
pub use processor::process_scan;
pub use task::{ScanReport, ScanTask};
