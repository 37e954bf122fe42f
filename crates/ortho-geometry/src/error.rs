//! Error types for geometry operations.

use thiserror::Error;

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors raised while partitioning a mesh or resolving anchors.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The label array does not have one entry per mesh vertex.
    #[error("label array has {labels} entries but the mesh has {vertices} vertices")]
    LabelCountMismatch {
        /// Length of the label array.
        labels: usize,
        /// Vertex count of the mesh.
        vertices: usize,
    },

    /// A predicted label is outside the unified label space.
    #[error("label {label} is not in the palette")]
    UnknownLabel {
        /// The offending label value.
        label: i32,
    },

    /// Anchor resolution needs per-vertex normals but the mesh carries
    /// none.
    #[error("mesh has no per-vertex normals")]
    MissingNormals,
}
