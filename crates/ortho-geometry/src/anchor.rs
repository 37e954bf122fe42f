//! Brace-anchor resolution.

use crate::error::{GeometryError, GeometryResult};
use crate::families::{self, ToothFamily};
use crate::partition::tooth_submesh;
use nalgebra::{Point3, Vector3};
use ortho_types::ScanMesh;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One brace anchor: a representative outer-surface vertex of a tooth
/// and its outward normal, used downstream for bracket placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BraceAnchor {
    /// Position of the anchor vertex.
    pub center: Point3<f64>,
    /// Vertex normal at the anchor.
    pub normal: Vector3<f64>,
}

/// Resolve one [`BraceAnchor`] per tooth label present in `labels`.
///
/// For each distinct non-background label with a known selection rule:
///
/// 1. cut the tooth submesh ([`tooth_submesh`]),
/// 2. keep the vertices passing the family's outer-surface normal test,
/// 3. for banded families, keep only the buccal-most third of that
///    subset by lateral coordinate,
/// 4. take the centroid of the surviving positions,
/// 5. pick the surviving vertex nearest the centroid (ties go to the
///    lowest vertex index),
///
/// and record that vertex's position and normal.
///
/// A label whose selection comes up empty (degenerate submesh, or a
/// band too small to hold a third) is skipped with a diagnostic rather
/// than failing the scan. Background and out-of-space labels are never
/// resolved. Results are keyed in a `BTreeMap`, so iteration order and
/// content are deterministic for identical inputs.
///
/// # Errors
///
/// - [`GeometryError::MissingNormals`] when the mesh lacks per-vertex
///   normals (the outer-surface test needs them).
/// - [`GeometryError::LabelCountMismatch`] when `labels` does not have
///   one entry per vertex.
pub fn resolve_anchors(
    mesh: &ScanMesh,
    labels: &[i32],
) -> GeometryResult<BTreeMap<i32, BraceAnchor>> {
    if labels.len() != mesh.vertex_count() {
        return Err(GeometryError::LabelCountMismatch {
            labels: labels.len(),
            vertices: mesh.vertex_count(),
        });
    }
    if !mesh.has_normals() {
        return Err(GeometryError::MissingNormals);
    }

    let mut distinct: Vec<i32> = labels.to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    let mut anchors = BTreeMap::new();
    for label in distinct {
        let Some(family) = families::family_of(label) else {
            continue;
        };
        let submesh = tooth_submesh(mesh, labels, label)?;
        match resolve_one(&submesh, family) {
            Some(anchor) => {
                debug!(label, "resolved brace anchor");
                anchors.insert(label, anchor);
            }
            None => {
                warn!(label, "outer-surface subset empty, skipping anchor");
            }
        }
    }
    Ok(anchors)
}

/// Anchor for one tooth submesh, or `None` when the outer subset is
/// empty.
fn resolve_one(submesh: &ScanMesh, family: ToothFamily) -> Option<BraceAnchor> {
    // Outer subset, in vertex-index order.
    let mut outer: Vec<usize> = submesh
        .vertices
        .iter()
        .enumerate()
        .filter(|(_, v)| {
            v.normal
                .as_ref()
                .is_some_and(|n| family.test.accepts(n))
        })
        .map(|(i, _)| i)
        .collect();

    if family.buccal_band {
        outer = buccal_band(submesh, &outer, family);
    }
    if outer.is_empty() {
        return None;
    }

    let mut centroid = Vector3::zeros();
    for &i in &outer {
        centroid += submesh.vertices[i].position.coords;
    }
    #[allow(clippy::cast_precision_loss)]
    let centroid = Point3::from(centroid / outer.len() as f64);

    // Nearest outer vertex; strict comparison in index order keeps the
    // lowest index on ties.
    let mut best = outer[0];
    let mut best_dist = (submesh.vertices[best].position - centroid).norm_squared();
    for &i in &outer[1..] {
        let dist = (submesh.vertices[i].position - centroid).norm_squared();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }

    let vertex = &submesh.vertices[best];
    Some(BraceAnchor {
        center: vertex.position,
        normal: vertex.normal.unwrap_or_else(Vector3::zeros),
    })
}

/// The buccal-most third of the outer subset, ordered by lateral (x)
/// coordinate.
///
/// `LateralNegative` families keep the smallest-x third,
/// `LateralPositive` the largest-x third. Sorting is on `(x, index)` so
/// coordinate ties cannot reorder between runs; the result is restored
/// to index order afterwards.
fn buccal_band(submesh: &ScanMesh, outer: &[usize], family: ToothFamily) -> Vec<usize> {
    use crate::families::OuterTest;

    let count = outer.len() / 3;
    if count == 0 {
        return Vec::new();
    }

    let mut by_x: Vec<usize> = outer.to_vec();
    by_x.sort_by(|&a, &b| {
        let xa = submesh.vertices[a].position.x;
        let xb = submesh.vertices[b].position.x;
        xa.partial_cmp(&xb)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut band: Vec<usize> = match family.test {
        OuterTest::LateralPositive => by_x[by_x.len() - count..].to_vec(),
        _ => by_x[..count].to_vec(),
    };
    band.sort_unstable();
    band
}
