//! JSON artifacts written per scan.
//!
//! All numeric payloads are plain JSON numbers: labels and instances
//! as integers, coordinates as floats, arrays as nested lists. The
//! typed serde structs here are the whole of that guarantee - nothing
//! numpy-flavored survives to the wire.

use crate::error::ScanIoResult;
use ortho_geometry::BraceAnchor;
use ortho_types::JawSide;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

/// The primary per-scan artifact (`<stem>.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionArtifact {
    /// Patient identifier; the pipeline has none, so this is empty.
    pub id_patient: String,
    /// Jaw side of the scan.
    pub jaw: JawSide,
    /// Per-vertex semantic labels (after the jaw shift).
    pub labels: Vec<i32>,
    /// Per-vertex instance ids.
    pub instances: Vec<i32>,
}

/// One anchor entry in the braces-location artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorRecord {
    /// Anchor vertex position.
    pub center_location: [f64; 3],
    /// Anchor vertex normal.
    pub normal_vector: [f64; 3],
}

impl From<BraceAnchor> for AnchorRecord {
    fn from(anchor: BraceAnchor) -> Self {
        Self {
            center_location: [anchor.center.x, anchor.center.y, anchor.center.z],
            normal_vector: [anchor.normal.x, anchor.normal.y, anchor.normal.z],
        }
    }
}

/// Locations of the per-scan artifacts for one input scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Colored mesh (`<stem>.obj`).
    pub mesh: PathBuf,
    /// Primary prediction artifact (`<stem>.json`).
    pub prediction: PathBuf,
    /// Brace anchors (`<stem>_braces_location.json`).
    pub brace_locations: PathBuf,
}

impl ArtifactPaths {
    /// Derive artifact paths from the input scan's base name.
    #[must_use]
    pub fn for_scan(scan_path: &Path, output_dir: &Path) -> Self {
        let stem = scan_path
            .file_stem()
            .map_or_else(|| "scan".into(), std::ffi::OsStr::to_os_string);
        let stem = stem.to_string_lossy();
        let extension = scan_path
            .extension()
            .map_or_else(|| "obj".into(), |e| e.to_string_lossy().into_owned());
        Self {
            mesh: output_dir.join(format!("{stem}.{extension}")),
            prediction: output_dir.join(format!("{stem}.json")),
            brace_locations: output_dir.join(format!("{stem}_braces_location.json")),
        }
    }
}

/// Write the primary prediction artifact.
///
/// # Errors
///
/// Returns an error when the file cannot be created or serialized.
pub fn write_prediction(path: &Path, artifact: &PredictionArtifact) -> ScanIoResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), artifact)?;
    info!(path = %path.display(), "wrote prediction artifact");
    Ok(())
}

/// Write the braces-location artifact, pretty-printed, keyed by label.
///
/// # Errors
///
/// Returns an error when the file cannot be created or serialized.
pub fn write_brace_locations(
    path: &Path,
    anchors: &BTreeMap<i32, BraceAnchor>,
) -> ScanIoResult<()> {
    let records: BTreeMap<i32, AnchorRecord> = anchors
        .iter()
        .map(|(&label, &anchor)| (label, anchor.into()))
        .collect();
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &records)?;
    info!(path = %path.display(), anchors = records.len(), "wrote brace locations");
    Ok(())
}

/// Read a braces-location artifact back.
///
/// # Errors
///
/// Returns an error when the file is missing or does not parse.
pub fn read_brace_locations(path: &Path) -> ScanIoResult<BTreeMap<i32, AnchorRecord>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ortho_types::{Point3, Vector3};

    #[test]
    fn artifact_paths_from_scan_name() {
        let paths = ArtifactPaths::for_scan(Path::new("/in/014_lower.obj"), Path::new("/out"));
        assert_eq!(paths.mesh, Path::new("/out/014_lower.obj"));
        assert_eq!(paths.prediction, Path::new("/out/014_lower.json"));
        assert_eq!(
            paths.brace_locations,
            Path::new("/out/014_lower_braces_location.json")
        );
    }

    #[test]
    fn prediction_artifact_schema() {
        let artifact = PredictionArtifact {
            id_patient: String::new(),
            jaw: JawSide::Upper,
            labels: vec![0, 11],
            instances: vec![0, 1],
        };
        let json = serde_json::to_value(&artifact).unwrap_or_default();
        assert_eq!(json["id_patient"], "");
        assert_eq!(json["jaw"], "upper");
        assert_eq!(json["labels"][1], 11);
        assert_eq!(json["instances"][0], 0);
    }

    #[test]
    fn brace_locations_round_trip() {
        let mut anchors = BTreeMap::new();
        anchors.insert(
            11,
            BraceAnchor {
                center: Point3::new(1.25, -2.5, 3.0),
                normal: Vector3::new(0.0, -1.0, 0.0),
            },
        );
        anchors.insert(
            46,
            BraceAnchor {
                center: Point3::new(-0.5, 0.0, 9.75),
                normal: Vector3::new(0.6, 0.0, 0.8),
            },
        );

        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("tempdir: {e}"),
        };
        let path = dir.path().join("braces_location.json");
        if let Err(e) = write_brace_locations(&path, &anchors) {
            panic!("write failed: {e}");
        }
        let back = match read_brace_locations(&path) {
            Ok(b) => b,
            Err(e) => panic!("read failed: {e}"),
        };

        assert_eq!(back.len(), anchors.len());
        for (label, anchor) in &anchors {
            let record = back.get(label).copied();
            assert!(record.is_some(), "label {label} missing after round trip");
            let record = record.unwrap_or(AnchorRecord {
                center_location: [0.0; 3],
                normal_vector: [0.0; 3],
            });
            assert_relative_eq!(record.center_location[0], anchor.center.x, epsilon = 1e-12);
            assert_relative_eq!(record.center_location[2], anchor.center.z, epsilon = 1e-12);
            assert_relative_eq!(record.normal_vector[1], anchor.normal.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn label_keys_serialize_as_json_strings() {
        let mut anchors = BTreeMap::new();
        anchors.insert(
            31,
            BraceAnchor {
                center: Point3::origin(),
                normal: Vector3::zeros(),
            },
        );
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("tempdir: {e}"),
        };
        let path = dir.path().join("braces_location.json");
        if let Err(e) = write_brace_locations(&path, &anchors) {
            panic!("write failed: {e}");
        }
        let text = std::fs::read_to_string(&path).unwrap_or_default();
        assert!(text.contains("\"31\""));
        assert!(text.contains("center_location"));
        assert!(text.contains("normal_vector"));
    }
}
