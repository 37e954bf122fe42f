//! How tasks actually execute: in-process, or in a worker process.
//!
//! The orchestrator talks to workers only through [`TaskRunner`], so
//! orchestration logic is tested without spawning real processes. The
//! production [`ProcessRunner`] re-executes this binary with the
//! `worker` subcommand; each child is a fresh OS process with its own
//! address space, so a crashing model run cannot take the sibling scan
//! or the server down with it.

use crate::config::ModelConfig;
use crate::error::{JobError, JobResult};
use ortho_model::{CommandBackend, DeviceId};
use ortho_pipeline::{process_scan, PipelineResult, ScanReport, ScanTask};
use ortho_types::JawSide;
use std::env;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tracing::{debug, info};

/// A running worker, owned by one supervisor thread.
pub trait WorkerHandle: Send {
    /// Block until the worker finishes. `Err` carries the failure
    /// detail for the side this worker processed.
    fn wait(&mut self) -> Result<(), String>;

    /// Terminate the worker and reap it. Idempotent.
    fn kill(&mut self);
}

/// Execution seam between the orchestrator and the pipeline.
pub trait TaskRunner: Sync {
    /// Check preconditions shared by all tasks of a job, before any
    /// worker starts.
    ///
    /// # Errors
    ///
    /// Any [`JobError`]; the job is rejected without spawning workers.
    fn verify(&self) -> JobResult<()>;

    /// Run a task synchronously in the current process.
    fn run_in_process(&self, task: &ScanTask) -> Result<(), String>;

    /// Start a task in an isolated worker.
    ///
    /// # Errors
    ///
    /// [`JobError::Spawn`] when the worker cannot be started.
    fn launch(&self, side: JawSide, task: &ScanTask) -> JobResult<Box<dyn WorkerHandle>>;
}

/// Run one task against the configured external model.
///
/// This is the whole body of a worker process, and also the in-process
/// path for single-scan jobs.
///
/// # Errors
///
/// Any [`ortho_pipeline::PipelineError`].
pub fn run_task(task: &ScanTask, model: &ModelConfig) -> PipelineResult<ScanReport> {
    let backend = CommandBackend::new(model.command.clone())
        .with_args(model.checkpoints.as_args())
        .with_device(task.device);
    process_scan(task, &backend)
}

/// Production runner: single scans run in-process, dual scans re-exec
/// this binary as `worker` children.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    model: ModelConfig,
    worker_binary: Option<PathBuf>,
}

impl ProcessRunner {
    /// Create a runner. `worker_binary` of `None` re-executes the
    /// current executable.
    #[must_use]
    pub const fn new(model: ModelConfig, worker_binary: Option<PathBuf>) -> Self {
        Self {
            model,
            worker_binary,
        }
    }

    fn worker_binary(&self) -> Result<PathBuf, String> {
        match &self.worker_binary {
            Some(path) => Ok(path.clone()),
            None => env::current_exe().map_err(|e| format!("cannot locate own binary: {e}")),
        }
    }
}

impl TaskRunner for ProcessRunner {
    fn verify(&self) -> JobResult<()> {
        self.model.checkpoints.verify()?;
        Ok(())
    }

    fn run_in_process(&self, task: &ScanTask) -> Result<(), String> {
        run_task(task, &self.model)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    fn launch(&self, side: JawSide, task: &ScanTask) -> JobResult<Box<dyn WorkerHandle>> {
        let binary = self.worker_binary().map_err(|message| JobError::Spawn {
            side,
            message,
        })?;

        let mut command = Command::new(&binary);
        command
            .arg("worker")
            .arg("--scan")
            .arg(&task.scan_path)
            .arg("--output-dir")
            .arg(&task.output_dir)
            .arg("--model-command")
            .arg(&self.model.command)
            .arg("--checkpoint-fps")
            .arg(&self.model.checkpoints.fps)
            .arg("--checkpoint-bdl")
            .arg(&self.model.checkpoints.bdl)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(jaw) = task.jaw {
            command.arg("--jaw").arg(jaw.as_str());
        }
        if let Some(device) = task.device {
            command.arg("--device").arg(device.to_string());
        }

        let child = command.spawn().map_err(|e| JobError::Spawn {
            side,
            message: format!("{}: {e}", binary.display()),
        })?;
        info!(side = %side, pid = child.id(), "launched worker process");
        Ok(Box::new(ProcessHandle {
            side,
            child: Some(child),
        }))
    }
}

/// Handle over one spawned worker process.
struct ProcessHandle {
    side: JawSide,
    child: Option<Child>,
}

impl WorkerHandle for ProcessHandle {
    fn wait(&mut self) -> Result<(), String> {
        let Some(mut child) = self.child.take() else {
            return Err("worker already reaped".to_owned());
        };

        // Drain stderr before waiting so a chatty child cannot block
        // on a full pipe.
        let mut stderr = String::new();
        if let Some(mut pipe) = child.stderr.take() {
            let _ = pipe.read_to_string(&mut stderr);
        }

        match child.wait() {
            Ok(status) if status.success() => {
                debug!(side = %self.side, "worker process exited cleanly");
                Ok(())
            }
            Ok(status) => Err(failure_detail(&stderr, &format!("worker exited with {status}"))),
            Err(e) => Err(format!("failed to reap worker: {e}")),
        }
    }

    fn kill(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        // No worker outlives its job.
        self.kill();
    }
}

/// The last non-empty stderr line is the worker's own error message;
/// fall back to the exit status when there is none.
fn failure_detail(stderr: &str, fallback: &str) -> String {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map_or_else(|| fallback.to_owned(), str::to_owned)
}
