//! Wavefront OBJ support for scan meshes.
//!
//! Dental scans arrive as ASCII OBJ. Two extensions beyond the plain
//! format matter here:
//!
//! - vertex colors as three extra floats on the `v` line
//!   (`v x y z r g b`), the convention scan tooling uses;
//! - `vn` records, which scan exporters emit one-per-vertex in vertex
//!   order. Normals are attached positionally when the counts match;
//!   a file with a different `vn` layout simply loads without normals
//!   and the pipeline recomputes them.
//!
//! Face lines accept the `i`, `i/t`, `i//n` and `i/t/n` index forms and
//! fan-triangulate polygons with more than three corners.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use ortho_types::{Rgb, ScanMesh, Vector3, Vertex};
use tracing::debug;

use crate::error::{ScanIoError, ScanIoResult};

/// Load a mesh from an ASCII OBJ file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, contains a
/// malformed `v`/`vn`/`f` record, or references a vertex that does not
/// exist.
pub fn load_obj<P: AsRef<Path>>(path: P) -> ScanIoResult<ScanMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ScanIoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ScanIoError::Io(e)
        }
    })?;
    let reader = BufReader::new(file);

    let mut mesh = ScanMesh::new();
    let mut normals: Vec<Vector3<f64>> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        match parts.next() {
            Some("v") => {
                let fields: Vec<&str> = parts.collect();
                if fields.len() != 3 && fields.len() != 6 {
                    return Err(ScanIoError::invalid_content(format!(
                        "line {}: vertex record has {} fields",
                        line_no + 1,
                        fields.len()
                    )));
                }
                let x: f64 = fields[0].parse()?;
                let y: f64 = fields[1].parse()?;
                let z: f64 = fields[2].parse()?;
                let mut vertex = Vertex::from_coords(x, y, z);
                if fields.len() == 6 {
                    let r: f64 = fields[3].parse()?;
                    let g: f64 = fields[4].parse()?;
                    let b: f64 = fields[5].parse()?;
                    vertex.color = Some(Rgb::from_float(r, g, b));
                }
                mesh.vertices.push(vertex);
            }
            Some("vn") => {
                let fields: Vec<&str> = parts.collect();
                if fields.len() != 3 {
                    return Err(ScanIoError::invalid_content(format!(
                        "line {}: normal record has {} fields",
                        line_no + 1,
                        fields.len()
                    )));
                }
                normals.push(Vector3::new(
                    fields[0].parse()?,
                    fields[1].parse()?,
                    fields[2].parse()?,
                ));
            }
            Some("f") => {
                let indices = parts
                    .map(|token| parse_face_index(token, line_no + 1))
                    .collect::<ScanIoResult<Vec<u32>>>()?;
                if indices.len() < 3 {
                    return Err(ScanIoError::invalid_content(format!(
                        "line {}: face has {} corners",
                        line_no + 1,
                        indices.len()
                    )));
                }
                // Fan triangulation for polygons.
                for i in 1..indices.len() - 1 {
                    mesh.faces.push([indices[0], indices[i], indices[i + 1]]);
                }
            }
            _ => {} // groups, materials, etc. are irrelevant to scans
        }
    }

    for face in &mesh.faces {
        for &index in face {
            if index as usize >= mesh.vertices.len() {
                return Err(ScanIoError::FaceIndexOutOfRange {
                    index,
                    vertex_count: mesh.vertices.len(),
                });
            }
        }
    }

    if normals.len() == mesh.vertices.len() {
        for (vertex, normal) in mesh.vertices.iter_mut().zip(normals) {
            vertex.normal = Some(normal);
        }
    } else if !normals.is_empty() {
        debug!(
            normals = normals.len(),
            vertices = mesh.vertices.len(),
            "normal count does not match vertex count, ignoring normals"
        );
    }

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "loaded OBJ scan"
    );
    Ok(mesh)
}

/// Parse the vertex index out of one face token (`i`, `i/t`, `i//n`,
/// `i/t/n`), converting from OBJ's 1-based indices.
fn parse_face_index(token: &str, line_no: usize) -> ScanIoResult<u32> {
    let vertex_part = token.split('/').next().unwrap_or(token);
    let index: i64 = vertex_part.parse().map_err(|_| {
        ScanIoError::invalid_content(format!("line {line_no}: bad face index '{token}'"))
    })?;
    if index < 1 {
        // Negative (relative) indices are not produced by scan tooling.
        return Err(ScanIoError::invalid_content(format!(
            "line {line_no}: unsupported face index {index}"
        )));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok((index - 1) as u32)
}

/// Save a mesh as ASCII OBJ.
///
/// Vertex colors, when present, are written as the `v x y z r g b`
/// extension; normals as one `vn` per vertex in vertex order, with
/// faces referencing them as `i//i`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_obj<P: AsRef<Path>>(mesh: &ScanMesh, path: P) -> ScanIoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    let with_normals = mesh.has_normals();

    for vertex in &mesh.vertices {
        let p = vertex.position;
        match vertex.color {
            Some(color) => {
                let (r, g, b) = color.to_float();
                writeln!(writer, "v {} {} {} {r} {g} {b}", p.x, p.y, p.z)?;
            }
            None => writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?,
        }
    }

    if with_normals {
        for vertex in &mesh.vertices {
            let n = vertex.normal.unwrap_or_else(Vector3::zeros);
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    for &[a, b, c] in &mesh.faces {
        if with_normals {
            writeln!(
                writer,
                "f {0}//{0} {1}//{1} {2}//{2}",
                a + 1,
                b + 1,
                c + 1
            )?;
        } else {
            writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
        }
    }

    writer.flush()?;
    Ok(())
}
