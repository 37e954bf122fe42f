//! Turning a validated job into tasks, and supervising their workers.

use crate::error::{FailureReport, JobError, JobResult};
use crate::job::{JobRequest, ScanJob};
use crate::runner::TaskRunner;
use ortho_model::{DeviceId, DeviceInventory};
use ortho_pipeline::ScanTask;
use ortho_types::JawSide;
use std::sync::mpsc;
use std::thread;
use tracing::{error, info, warn};

/// Runs segmentation jobs: validates, assigns devices, dispatches to
/// workers and aggregates per-side outcomes.
///
/// A job with one scan runs synchronously in this process. A job with
/// both scans runs each side in its own worker, supervised by one
/// thread per worker; outcomes come back over a channel and are
/// aggregated regardless of which side finishes first. One side
/// failing never cancels the other.
#[derive(Debug)]
pub struct Orchestrator<R> {
    runner: R,
    devices: DeviceInventory,
}

impl<R: TaskRunner> Orchestrator<R> {
    /// Create an orchestrator over the given execution seam.
    #[must_use]
    pub const fn new(runner: R, devices: DeviceInventory) -> Self {
        Self { runner, devices }
    }

    /// Run one job to completion.
    ///
    /// # Errors
    ///
    /// Input-validation errors and [`JobError::Model`] before any
    /// worker starts; [`JobError::Spawn`] when a worker cannot start
    /// (an already-running sibling is killed first); and
    /// [`JobError::SidesFailed`] when workers ran but at least one
    /// side failed.
    pub fn run(&self, request: JobRequest) -> JobResult<()> {
        let job = request.validate()?;
        self.runner.verify()?;

        let tasks = self.plan(&job);
        info!(
            sides = tasks.len(),
            devices = self.devices.count(),
            output = %job.output_dir.display(),
            "job accepted"
        );

        let failures = if tasks.len() == 1 {
            let (side, task) = &tasks[0];
            self.run_single(*side, task)
        } else {
            self.run_dual(tasks)?
        };

        if failures.is_empty() {
            Ok(())
        } else {
            Err(JobError::SidesFailed(FailureReport(failures)))
        }
    }

    /// Build the task list, lower side first.
    fn plan(&self, job: &ScanJob) -> Vec<(JawSide, ScanTask)> {
        let mut tasks = Vec::with_capacity(2);
        for (side, scan) in [
            (JawSide::Lower, &job.lower_scan),
            (JawSide::Upper, &job.upper_scan),
        ] {
            if let Some(scan) = scan {
                let task = ScanTask::new(scan.clone(), job.output_dir.clone())
                    .with_jaw(side)
                    .with_device(self.assign_device(side));
                tasks.push((side, task));
            }
        }
        tasks
    }

    /// Device affinity: lower takes device 0, upper takes device 1
    /// when a second device exists, otherwise shares device 0. No
    /// devices means no pinning.
    fn assign_device(&self, side: JawSide) -> Option<DeviceId> {
        if self.devices.is_empty() {
            return None;
        }
        match side {
            JawSide::Lower => Some(0),
            JawSide::Upper => Some(if self.devices.count() > 1 { 1 } else { 0 }),
        }
    }

    fn run_single(&self, side: JawSide, task: &ScanTask) -> Vec<(JawSide, String)> {
        match self.runner.run_in_process(task) {
            Ok(()) => {
                info!(side = %side, "scan SUCCESS");
                Vec::new()
            }
            Err(detail) => {
                error!(side = %side, detail = %detail, "scan FAILED");
                vec![(side, detail)]
            }
        }
    }

    fn run_dual(&self, tasks: Vec<(JawSide, ScanTask)>) -> JobResult<Vec<(JawSide, String)>> {
        let mut handles = Vec::with_capacity(tasks.len());
        for (side, task) in &tasks {
            match self.runner.launch(*side, task) {
                Ok(handle) => handles.push((*side, handle)),
                Err(e) => {
                    for (running, mut handle) in handles {
                        warn!(side = %running, "killing sibling worker after launch failure");
                        handle.kill();
                    }
                    return Err(e);
                }
            }
        }

        // One supervisor thread per worker; outcomes arrive over the
        // channel in completion order.
        let (tx, rx) = mpsc::channel();
        thread::scope(|scope| {
            for (side, mut handle) in handles {
                let tx = tx.clone();
                scope.spawn(move || {
                    let outcome = handle.wait();
                    let _ = tx.send((side, outcome));
                });
            }
        });
        drop(tx);

        let mut failures = Vec::new();
        for (side, outcome) in rx {
            match outcome {
                Ok(()) => info!(side = %side, "scan SUCCESS"),
                Err(detail) => {
                    error!(side = %side, detail = %detail, "scan FAILED");
                    failures.push((side, detail));
                }
            }
        }
        // Deterministic report order whatever the completion order was.
        failures.sort_by_key(|(side, _)| *side == JawSide::Upper);
        Ok(failures)
    }
}
