//! Cross-module behavior of partitioning plus anchor resolution.

#![allow(clippy::unwrap_used)]

use nalgebra::{Point3, Vector3};
use ortho_geometry::{resolve_anchors, tooth_submesh};
use ortho_types::{ScanMesh, Vertex};

/// Four vertices, two triangles, labels `[11, 11, 0, 0]`: every face
/// straddles the label boundary, so the tooth submesh keeps its two
/// vertices but no face at all.
#[test]
fn boundary_faces_leave_vertices_without_faces() {
    let mesh = ScanMesh::from_parts(
        vec![
            Vertex::from_coords(0.0, 0.0, 0.0),
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex::from_coords(1.0, 1.0, 0.0),
            Vertex::from_coords(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    );
    let labels = [11, 11, 0, 0];

    let sub = tooth_submesh(&mesh, &labels, 11).unwrap();
    assert_eq!(sub.vertex_count(), 2);
    assert!(sub.faces.is_empty());

    let background = tooth_submesh(&mesh, &labels, 0).unwrap();
    assert_eq!(background.vertex_count(), 2);
    assert!(background.faces.is_empty());
}

/// Anchors do not depend on where a label's vertices sit in the mesh,
/// only on their geometry.
#[test]
fn anchors_are_stable_under_vertex_interleaving() {
    let down = Vector3::new(0.0, -1.0, 0.0);

    // Same three labeled vertices, once contiguous, once interleaved
    // with background vertices.
    let tooth = [
        (0.0, 0.0, 0.0),
        (2.0, 0.0, 0.0),
        (1.0, 0.0, 1.0),
    ];

    let contiguous = ScanMesh::from_parts(
        tooth
            .iter()
            .map(|&(x, y, z)| Vertex::with_normal(Point3::new(x, y, z), down))
            .collect(),
        vec![],
    );
    let contiguous_labels = [41, 41, 41];

    let mut interleaved_vertices = Vec::new();
    let mut interleaved_labels = Vec::new();
    for &(x, y, z) in &tooth {
        interleaved_vertices.push(Vertex::with_normal(Point3::new(9.0, 9.0, 9.0), down));
        interleaved_labels.push(0);
        interleaved_vertices.push(Vertex::with_normal(Point3::new(x, y, z), down));
        interleaved_labels.push(41);
    }
    let interleaved = ScanMesh::from_parts(interleaved_vertices, vec![]);

    let a = resolve_anchors(&contiguous, &contiguous_labels).unwrap();
    let b = resolve_anchors(&interleaved, &interleaved_labels).unwrap();

    let anchor_a = a.get(&41).unwrap();
    let anchor_b = b.get(&41).unwrap();
    assert_eq!(anchor_a.center, anchor_b.center);
    assert_eq!(anchor_a.normal, anchor_b.normal);
}
