//! Jaw-side detection from a scan file.

use ortho_types::JawSide;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Determine which jaw a scan belongs to.
///
/// Two conventions are recognized, tried in order:
///
/// 1. a filename stem of the form `<patient>_<jaw>` (e.g.
///    `014_lower.obj`);
/// 2. a leading OBJ comment line naming the jaw (`# lower`).
///
/// Returns `None` when neither convention applies; the caller decides
/// whether that is fatal (it is, for scans whose task carries no
/// explicit jaw side).
#[must_use]
pub fn detect_jaw(scan_path: &Path) -> Option<JawSide> {
    if let Some(side) = jaw_from_filename(scan_path) {
        debug!(scan = %scan_path.display(), side = %side, "jaw side from filename");
        return Some(side);
    }
    if let Some(side) = jaw_from_first_line(scan_path) {
        debug!(scan = %scan_path.display(), side = %side, "jaw side from file header");
        return Some(side);
    }
    None
}

fn jaw_from_filename(scan_path: &Path) -> Option<JawSide> {
    let stem = scan_path.file_stem()?.to_str()?;
    let mut parts = stem.split('_');
    let _patient = parts.next()?;
    let jaw = parts.next()?;
    // Exactly two underscore-separated components, like the reference
    // naming convention.
    if parts.next().is_some() {
        return None;
    }
    JawSide::parse(jaw)
}

fn jaw_from_first_line(scan_path: &Path) -> Option<JawSide> {
    let file = File::open(scan_path).ok()?;
    let mut first_line = String::new();
    BufReader::new(file).read_line(&mut first_line).ok()?;
    let name = first_line.strip_prefix("# ")?.trim_end();
    JawSide::parse(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn fixture(name: &str, content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => panic!("tempdir: {e}"),
        };
        let path = dir.path().join(name);
        if let Err(e) = fs::write(&path, content) {
            panic!("write fixture: {e}");
        }
        (dir, path)
    }

    #[test]
    fn from_filename() {
        let (_dir, path) = fixture("014_lower.obj", "v 0 0 0\n");
        assert_eq!(detect_jaw(&path), Some(JawSide::Lower));
        let (_dir, path) = fixture("9a2_upper.obj", "v 0 0 0\n");
        assert_eq!(detect_jaw(&path), Some(JawSide::Upper));
    }

    #[test]
    fn filename_with_extra_parts_falls_through() {
        let (_dir, path) = fixture("a_b_lower.obj", "# upper\nv 0 0 0\n");
        // Three components: the filename convention does not apply, the
        // header comment does.
        assert_eq!(detect_jaw(&path), Some(JawSide::Upper));
    }

    #[test]
    fn from_header_comment() {
        let (_dir, path) = fixture("scan.obj", "# lower\nv 0 0 0\n");
        assert_eq!(detect_jaw(&path), Some(JawSide::Lower));
    }

    #[test]
    fn unknown_everywhere_is_none() {
        let (_dir, path) = fixture("scan.obj", "v 0 0 0\n");
        assert_eq!(detect_jaw(&path), None);
        let (_dir, path) = fixture("scan_left.obj", "# sideways\nv 0 0 0\n");
        assert_eq!(detect_jaw(&path), None);
        assert_eq!(detect_jaw(Path::new("/missing/scan.obj")), None);
    }
}
