//! Per-vertex label coloring.

use crate::error::{GeometryError, GeometryResult};
use ortho_types::{palette, ScanMesh};

/// Color every vertex of the mesh according to its semantic label.
///
/// Uses the fixed palette from [`ortho_types::palette`]; the background
/// label paints white. The whole scan fails if any label falls outside
/// the unified label space, since a partially colored artifact would be
/// misleading downstream.
///
/// # Errors
///
/// - [`GeometryError::LabelCountMismatch`] when `labels` does not have
///   one entry per vertex.
/// - [`GeometryError::UnknownLabel`] for a label the palette does not
///   cover.
pub fn apply_label_colors(mesh: &mut ScanMesh, labels: &[i32]) -> GeometryResult<()> {
    if labels.len() != mesh.vertex_count() {
        return Err(GeometryError::LabelCountMismatch {
            labels: labels.len(),
            vertices: mesh.vertex_count(),
        });
    }

    for (vertex, &label) in mesh.vertices.iter_mut().zip(labels) {
        let color =
            palette::label_color(label).ok_or(GeometryError::UnknownLabel { label })?;
        vertex.color = Some(color);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ortho_types::{Rgb, Vertex};

    #[test]
    fn colors_follow_labels() {
        let mut mesh = ScanMesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
            ],
            vec![],
        );
        assert!(apply_label_colors(&mut mesh, &[0, 11]).is_ok());
        assert_eq!(mesh.vertices[0].color, Some(Rgb::WHITE));
        assert_eq!(mesh.vertices[1].color, Some(Rgb::new(255, 153, 153)));
    }

    #[test]
    fn unknown_label_fails_the_scan() {
        let mut mesh = ScanMesh::from_parts(vec![Vertex::from_coords(0.0, 0.0, 0.0)], vec![]);
        assert!(matches!(
            apply_label_colors(&mut mesh, &[19]),
            Err(GeometryError::UnknownLabel { label: 19 })
        ));
    }

    #[test]
    fn length_mismatch_rejected() {
        let mut mesh = ScanMesh::from_parts(vec![Vertex::from_coords(0.0, 0.0, 0.0)], vec![]);
        assert!(matches!(
            apply_label_colors(&mut mesh, &[0, 0]),
            Err(GeometryError::LabelCountMismatch { .. })
        ));
    }
}
