//! Dual-scan jobs: sides run in isolated workers and fail
//! independently. The runner here executes the real pipeline on a
//! thread per side, standing in for the per-side worker processes.

use ortho_model::{DeviceInventory, FnBackend, ModelError, Prediction};
use ortho_pipeline::{process_scan, ScanTask};
use ortho_server::{JobError, JobRequest, Orchestrator, TaskRunner, WorkerHandle};
use ortho_types::JawSide;
use std::fs;
use std::path::PathBuf;
use std::thread::JoinHandle;

const SQUARE_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4\n";

/// Runs each side's pipeline on its own thread; the lower side's
/// model invocation fails when `fail_lower` is set.
struct ThreadRunner {
    fail_lower: bool,
}

fn run_side(task: &ScanTask, fail_lower: bool) -> Result<(), String> {
    let fail = fail_lower && task.jaw == Some(JawSide::Lower);
    let backend = FnBackend::new(move |_: &std::path::Path| {
        if fail {
            Err(ModelError::invocation("model crashed on lower scan"))
        } else {
            Ok(Prediction::new(vec![11, 11, 11, 11], vec![1, 1, 1, 1]))
        }
    });
    process_scan(task, &backend)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

struct ThreadHandle(Option<JoinHandle<Result<(), String>>>);

impl WorkerHandle for ThreadHandle {
    fn wait(&mut self) -> Result<(), String> {
        match self.0.take() {
            Some(join) => join
                .join()
                .unwrap_or_else(|_| Err("worker panicked".to_owned())),
            None => Err("worker already reaped".to_owned()),
        }
    }

    fn kill(&mut self) {}
}

impl TaskRunner for ThreadRunner {
    fn verify(&self) -> ortho_server::JobResult<()> {
        Ok(())
    }

    fn run_in_process(&self, task: &ScanTask) -> Result<(), String> {
        run_side(task, self.fail_lower)
    }

    fn launch(
        &self,
        _side: JawSide,
        task: &ScanTask,
    ) -> ortho_server::JobResult<Box<dyn WorkerHandle>> {
        let task = task.clone();
        let fail_lower = self.fail_lower;
        let join = std::thread::spawn(move || run_side(&task, fail_lower));
        Ok(Box::new(ThreadHandle(Some(join))))
    }
}

fn dual_request(dir: &tempfile::TempDir) -> (JobRequest, PathBuf) {
    let lower = dir.path().join("014_lower.obj");
    let upper = dir.path().join("014_upper.obj");
    for path in [&lower, &upper] {
        if let Err(e) = fs::write(path, SQUARE_OBJ) {
            panic!("write fixture: {e}");
        }
    }
    let out = dir.path().join("out");
    (
        JobRequest {
            lower_scan: Some(lower),
            upper_scan: Some(upper),
            output_dir: Some(out.clone()),
        },
        out,
    )
}

#[test]
fn both_sides_succeed_and_write_artifacts() {
    let dir = match tempfile::tempdir() {
        Ok(d) => d,
        Err(e) => panic!("tempdir: {e}"),
    };
    let (request, out) = dual_request(&dir);
    let orch = Orchestrator::new(ThreadRunner { fail_lower: false }, DeviceInventory::with_count(0));

    if let Err(e) = orch.run(request) {
        panic!("job failed: {e}");
    }
    for stem in ["014_lower", "014_upper"] {
        assert!(out.join(format!("{stem}.obj")).is_file());
        assert!(out.join(format!("{stem}.json")).is_file());
        assert!(out.join(format!("{stem}_braces_location.json")).is_file());
    }
}

#[test]
fn lower_failure_leaves_upper_artifacts_on_disk() {
    let dir = match tempfile::tempdir() {
        Ok(d) => d,
        Err(e) => panic!("tempdir: {e}"),
    };
    let (request, out) = dual_request(&dir);
    let orch = Orchestrator::new(ThreadRunner { fail_lower: true }, DeviceInventory::with_count(0));

    let err = match orch.run(request) {
        Ok(()) => panic!("expected the lower side to fail"),
        Err(e) => e,
    };

    // The error names only the failed side and carries the innermost
    // model message.
    assert!(matches!(err, JobError::SidesFailed(_)));
    let message = err.to_string();
    assert!(message.contains("lower scan failed"), "got: {message}");
    assert!(message.contains("model crashed on lower scan"), "got: {message}");
    assert!(!message.contains("upper scan failed"), "got: {message}");

    // The upper side ran to completion anyway.
    assert!(out.join("014_upper.obj").is_file());
    assert!(out.join("014_upper.json").is_file());
    assert!(out.join("014_upper_braces_location.json").is_file());
    // Nothing was written for the failed lower side.
    assert!(!out.join("014_lower.json").exists());
}
