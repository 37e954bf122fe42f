//! Job requests as received over the wire, and their validated form.

use crate::error::{JobError, JobResult};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::PathBuf;

/// Deserialize an optional path where clients may send the literal
/// string `"null"` (or an empty string) to mean "absent", alongside
/// JSON `null` and a missing key.
fn nullable_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| s != "null" && !s.trim().is_empty())
        .map(PathBuf::from))
}

/// A segmentation job as sent by the client.
///
/// Any subset of fields may be present; [`JobRequest::validate`] turns
/// a request into a [`ScanJob`] or an input-validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobRequest {
    /// Path to the lower-jaw scan, if any.
    #[serde(default, deserialize_with = "nullable_path")]
    pub lower_scan: Option<PathBuf>,
    /// Path to the upper-jaw scan, if any.
    #[serde(default, deserialize_with = "nullable_path")]
    pub upper_scan: Option<PathBuf>,
    /// Directory the artifacts are written into.
    #[serde(default, deserialize_with = "nullable_path")]
    pub output_dir: Option<PathBuf>,
}

/// A validated job: at least one existing scan and a writable output
/// directory (created here if absent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanJob {
    /// Lower-jaw scan path, verified to exist.
    pub lower_scan: Option<PathBuf>,
    /// Upper-jaw scan path, verified to exist.
    pub upper_scan: Option<PathBuf>,
    /// Output directory, created if it did not exist.
    pub output_dir: PathBuf,
}

impl JobRequest {
    /// Validate the request before any worker is spawned.
    ///
    /// # Errors
    ///
    /// [`JobError::NoScans`] when neither scan is given,
    /// [`JobError::NoOutputDir`] when the output directory is missing,
    /// [`JobError::ScanMissing`] when a named scan file does not exist,
    /// and [`JobError::OutputDir`] when the output directory cannot be
    /// created.
    pub fn validate(self) -> JobResult<ScanJob> {
        if self.lower_scan.is_none() && self.upper_scan.is_none() {
            return Err(JobError::NoScans);
        }
        let output_dir = self.output_dir.ok_or(JobError::NoOutputDir)?;

        for scan in [&self.lower_scan, &self.upper_scan].into_iter().flatten() {
            if !scan.is_file() {
                return Err(JobError::ScanMissing { path: scan.clone() });
            }
        }

        fs::create_dir_all(&output_dir).map_err(|source| JobError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;

        Ok(ScanJob {
            lower_scan: self.lower_scan,
            upper_scan: self.upper_scan,
            output_dir,
        })
    }
}

impl ScanJob {
    /// Whether both jaws are to be processed.
    #[must_use]
    pub const fn is_dual(&self) -> bool {
        self.lower_scan.is_some() && self.upper_scan.is_some()
    }
}
