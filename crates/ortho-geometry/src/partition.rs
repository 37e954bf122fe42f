//! Label-local submesh extraction.

use crate::error::{GeometryError, GeometryResult};
use hashbrown::HashMap;
use ortho_types::ScanMesh;

/// Extract the submesh of all vertices carrying `label`.
///
/// The submesh contains exactly the vertices whose label matches, in
/// their original index order, and exactly the faces whose three
/// corners all carry the label. A face spanning a label boundary is
/// dropped entirely; it belongs to neither side's submesh. Faces are
/// reindexed against the reduced vertex set, and vertex attributes
/// (normals, colors) travel with their vertex.
///
/// This is a pure derivation: the same inputs always produce the same
/// submesh, including ordering.
///
/// # Errors
///
/// [`GeometryError::LabelCountMismatch`] when `labels` does not have
/// one entry per mesh vertex.
///
/// # Example
///
/// ```
/// use ortho_geometry::tooth_submesh;
/// use ortho_types::{ScanMesh, Vertex};
///
/// let mesh = ScanMesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
/// // The face mixes labels 11 and 0, so it is dropped.
/// let sub = tooth_submesh(&mesh, &[11, 11, 0], 11).unwrap();
/// assert_eq!(sub.vertex_count(), 2);
/// assert_eq!(sub.face_count(), 0);
/// ```
pub fn tooth_submesh(mesh: &ScanMesh, labels: &[i32], label: i32) -> GeometryResult<ScanMesh> {
    if labels.len() != mesh.vertex_count() {
        return Err(GeometryError::LabelCountMismatch {
            labels: labels.len(),
            vertices: mesh.vertex_count(),
        });
    }

    let mut remap: HashMap<u32, u32> = HashMap::new();
    let mut vertices = Vec::new();

    for (index, vertex) in mesh.vertices.iter().enumerate() {
        if labels[index] == label {
            #[allow(clippy::cast_possible_truncation)]
            {
                remap.insert(index as u32, vertices.len() as u32);
            }
            vertices.push(vertex.clone());
        }
    }

    let faces = mesh
        .faces
        .iter()
        .filter_map(|&[a, b, c]| {
            match (remap.get(&a), remap.get(&b), remap.get(&c)) {
                (Some(&a), Some(&b), Some(&c)) => Some([a, b, c]),
                _ => None,
            }
        })
        .collect();

    Ok(ScanMesh::from_parts(vertices, faces))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortho_types::{Vector3, Vertex};

    fn labeled_strip() -> (ScanMesh, Vec<i32>) {
        // Four vertices, two triangles: [0,1,2] all label 11,
        // [1,2,3] mixes 11 and 0.
        let mut mesh = ScanMesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0),
                Vertex::from_coords(1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [1, 2, 3]],
        );
        for v in &mut mesh.vertices {
            v.normal = Some(Vector3::z());
        }
        (mesh, vec![11, 11, 11, 0])
    }

    #[test]
    fn keeps_fully_labeled_faces_only() {
        let (mesh, labels) = labeled_strip();
        let sub = match tooth_submesh(&mesh, &labels, 11) {
            Ok(s) => s,
            Err(e) => panic!("partition failed: {e}"),
        };
        assert_eq!(sub.vertex_count(), 3);
        assert_eq!(sub.face_count(), 1);
        assert_eq!(sub.faces[0], [0, 1, 2]);
    }

    #[test]
    fn mixed_face_belongs_to_neither_submesh() {
        let (mesh, labels) = labeled_strip();
        let background = match tooth_submesh(&mesh, &labels, 0) {
            Ok(s) => s,
            Err(e) => panic!("partition failed: {e}"),
        };
        assert_eq!(background.vertex_count(), 1);
        assert_eq!(background.face_count(), 0);
    }

    #[test]
    fn reindexes_against_reduced_vertex_set() {
        // Label of interest sits at the high end of the vertex array.
        let mesh = ScanMesh::from_parts(
            vec![
                Vertex::from_coords(9.0, 9.0, 9.0),
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0),
            ],
            vec![[1, 2, 3]],
        );
        let sub = match tooth_submesh(&mesh, &[0, 24, 24, 24], 24) {
            Ok(s) => s,
            Err(e) => panic!("partition failed: {e}"),
        };
        assert_eq!(sub.vertex_count(), 3);
        assert_eq!(sub.faces, vec![[0, 1, 2]]);
        assert!((sub.vertices[0].position.x - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn carries_normals_in_vertex_order() {
        let (mut mesh, labels) = labeled_strip();
        mesh.vertices[1].normal = Some(Vector3::x());
        let sub = match tooth_submesh(&mesh, &labels, 11) {
            Ok(s) => s,
            Err(e) => panic!("partition failed: {e}"),
        };
        assert_eq!(sub.vertices[1].normal, Some(Vector3::x()));
        assert_eq!(sub.vertices[0].normal, Some(Vector3::z()));
    }

    #[test]
    fn idempotent_bit_identical() {
        let (mesh, labels) = labeled_strip();
        let a = match tooth_submesh(&mesh, &labels, 11) {
            Ok(s) => s,
            Err(e) => panic!("partition failed: {e}"),
        };
        let b = match tooth_submesh(&mesh, &labels, 11) {
            Ok(s) => s,
            Err(e) => panic!("partition failed: {e}"),
        };
        assert_eq!(a.faces, b.faces);
        assert_eq!(a.vertex_count(), b.vertex_count());
        for (va, vb) in a.vertices.iter().zip(&b.vertices) {
            assert_eq!(va.position, vb.position);
            assert_eq!(va.normal, vb.normal);
        }
    }

    #[test]
    fn label_count_mismatch_is_an_error() {
        let (mesh, _) = labeled_strip();
        assert!(matches!(
            tooth_submesh(&mesh, &[11, 11], 11),
            Err(GeometryError::LabelCountMismatch {
                labels: 2,
                vertices: 4
            })
        ));
    }

    #[test]
    fn absent_label_yields_empty_submesh() {
        let (mesh, labels) = labeled_strip();
        let sub = match tooth_submesh(&mesh, &labels, 48) {
            Ok(s) => s,
            Err(e) => panic!("partition failed: {e}"),
        };
        assert!(sub.is_empty());
        assert_eq!(sub.face_count(), 0);
    }
}
