//! Core types for the orthoscan dental-scan pipeline.
//!
//! This crate defines the indexed triangle mesh used throughout the
//! workspace, the FDI tooth-label helpers, the jaw-side enum, and the
//! fixed label-to-color palette used when writing colored meshes.
//!
//! # Overview
//!
//! - [`ScanMesh`] - Indexed triangle mesh with optional per-vertex
//!   normals and colors
//! - [`Vertex`] / [`Rgb`] - Vertex data and 8-bit RGB color
//! - [`JawSide`] - Upper or lower dental arch
//! - [`fdi`] - FDI two-digit tooth-code helpers
//! - [`palette`] - The fixed label → color mapping
//!
//! # Example
//!
//! ```
//! use ortho_types::{Point3, ScanMesh, Vertex};
//!
//! let mut mesh = ScanMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.face_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod fdi;
mod jaw;
mod mesh;
pub mod palette;
mod vertex;

pub use jaw::JawSide;
pub use mesh::ScanMesh;
pub use vertex::{Rgb, Vertex};

// Re-export the math types used in public signatures.
pub use nalgebra::{Point3, Vector3};
