//! Indexed triangle mesh for dental scans.

use crate::{Rgb, Vertex};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with each face holding
/// three indices into the vertex array. Per-vertex normals and colors
/// ride on the [`Vertex`] they describe, so any operation that filters
/// or reorders vertices keeps attributes consistent by construction.
///
/// # Example
///
/// ```
/// use ortho_types::{ScanMesh, Vertex};
///
/// let vertices = vec![
///     Vertex::from_coords(0.0, 0.0, 0.0),
///     Vertex::from_coords(1.0, 0.0, 0.0),
///     Vertex::from_coords(0.0, 1.0, 0.0),
/// ];
/// let mesh = ScanMesh::from_parts(vertices, vec![[0, 1, 2]]);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl ScanMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangle faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check whether the mesh has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check that every face index refers to an existing vertex.
    #[must_use]
    pub fn faces_in_bounds(&self) -> bool {
        let n = self.vertices.len();
        self.faces
            .iter()
            .all(|f| f.iter().all(|&i| (i as usize) < n))
    }

    /// Check whether every vertex carries a normal.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.vertices.is_empty() && self.vertices.iter().all(|v| v.normal.is_some())
    }

    /// Compute per-vertex normals from adjacent faces.
    ///
    /// Each face contributes its area-weighted normal (the raw cross
    /// product of two edges) to its three corners; the accumulated
    /// vectors are then normalized. Vertices that belong to no face, or
    /// whose accumulated normal is degenerate, receive a zero vector
    /// rather than `None` so the mesh satisfies [`Self::has_normals`]
    /// afterwards.
    ///
    /// Existing normals are overwritten.
    pub fn compute_vertex_normals(&mut self) {
        let mut accum = vec![Vector3::zeros(); self.vertices.len()];

        for &[i0, i1, i2] in &self.faces {
            let v0 = self.vertices[i0 as usize].position;
            let v1 = self.vertices[i1 as usize].position;
            let v2 = self.vertices[i2 as usize].position;

            // Cross product length is twice the triangle area, which
            // gives the area weighting for free.
            let face_normal = (v1 - v0).cross(&(v2 - v0));
            accum[i0 as usize] += face_normal;
            accum[i1 as usize] += face_normal;
            accum[i2 as usize] += face_normal;
        }

        for (vertex, n) in self.vertices.iter_mut().zip(accum) {
            let norm = n.norm();
            vertex.normal = Some(if norm > f64::EPSILON { n / norm } else { Vector3::zeros() });
        }
    }

    /// Assign the same color to every vertex.
    pub fn fill_color(&mut self, color: Rgb) {
        for vertex in &mut self.vertices {
            vertex.color = Some(color);
        }
    }
}
