//! The scan processing steps, in order.

use crate::error::{PipelineError, PipelineResult};
use crate::task::{ScanReport, ScanTask};
use ortho_geometry::{apply_label_colors, resolve_anchors};
use ortho_io::{
    detect_jaw, load_obj, save_obj, write_brace_locations, write_prediction, ArtifactPaths,
    PredictionArtifact,
};
use ortho_model::{DeviceGuard, SegmentationBackend};
use tracing::{info, warn};

/// Run the full pipeline for one scan.
///
/// Steps: bind the accelerator device (released again on every exit
/// path), run the segmentation model, resolve the jaw side, apply the
/// lower-jaw label shift, validate the prediction shape against the
/// mesh, color the mesh, write the colored mesh artifact, resolve brace
/// anchors, and write both JSON artifacts.
///
/// # Errors
///
/// Any [`PipelineError`]; the failure is fatal for this scan only. The
/// sibling scan of a dual job runs in its own process and is unaffected.
pub fn process_scan<B: SegmentationBackend>(
    task: &ScanTask,
    backend: &B,
) -> PipelineResult<ScanReport> {
    info!(scan = %task.scan_path.display(), device = ?task.device, "processing scan");

    // Device memory is released when the guard drops, whether the
    // pipeline below succeeds or bails with `?`.
    let _guard = DeviceGuard::bind(task.device, |_| backend.release_memory());

    let jaw = task
        .jaw
        .or_else(|| detect_jaw(&task.scan_path))
        .ok_or_else(|| PipelineError::UnknownJaw {
            path: task.scan_path.clone(),
        })?;

    let mut prediction = backend.predict(&task.scan_path)?;
    prediction.shift_for_jaw(jaw);

    let mut mesh = load_obj(&task.scan_path)?;
    prediction.validate_shape(mesh.vertex_count())?;

    if !mesh.has_normals() {
        warn!(scan = %task.scan_path.display(), "scan has no normals, computing from faces");
        mesh.compute_vertex_normals();
    }

    apply_label_colors(&mut mesh, &prediction.labels)?;

    let paths = ArtifactPaths::for_scan(&task.scan_path, &task.output_dir);
    save_obj(&mesh, &paths.mesh)?;

    let anchors = resolve_anchors(&mesh, &prediction.labels)?;
    write_brace_locations(&paths.brace_locations, &anchors)?;

    write_prediction(
        &paths.prediction,
        &PredictionArtifact {
            id_patient: String::new(),
            jaw,
            labels: prediction.labels,
            instances: prediction.instances,
        },
    )?;

    info!(scan = %task.scan_path.display(), jaw = %jaw, anchors = anchors.len(), "scan complete");
    Ok(ScanReport {
        jaw,
        anchor_count: anchors.len(),
        artifacts: paths,
    })
}
