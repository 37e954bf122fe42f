//! The segmentation job service.
//!
//! A WebSocket endpoint accepts jobs naming a lower scan, an upper
//! scan, or both, plus an output directory. The orchestrator validates
//! the job, assigns accelerator devices, and runs each side through
//! the scan pipeline - in-process for a single scan, in one isolated
//! worker process per side for a dual scan. Sides fail independently;
//! the reply names every side that failed and why.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod config;
mod error;
mod job;
mod orchestrator;
mod runner;
mod server;

pub use config::{ModelConfig, ServerConfig};
pub use error::{FailureReport, JobError, JobResult};
pub use job::{JobRequest, ScanJob};
pub use orchestrator::Orchestrator;
pub use runner::{run_task, ProcessRunner, TaskRunner, WorkerHandle};
pub use server::{handle_message, router, serve, INVALID_INPUT, INVALID_JSON, SUCCESS};
