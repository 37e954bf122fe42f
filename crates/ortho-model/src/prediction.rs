//! Per-vertex prediction arrays and the jaw-side label shift.

use crate::error::{ModelError, ModelResult};
use ortho_types::JawSide;
use serde::{Deserialize, Serialize};

/// Raw per-vertex model output: one semantic label and one instance id
/// per vertex of the source mesh.
///
/// The wire names `sem` and `ins` match the external model's output
/// schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Semantic tooth label per vertex (0 = background).
    #[serde(rename = "sem")]
    pub labels: Vec<i32>,

    /// Instance id per vertex.
    #[serde(rename = "ins")]
    pub instances: Vec<i32>,
}

impl Prediction {
    /// Create a prediction from label and instance arrays.
    #[must_use]
    pub const fn new(labels: Vec<i32>, instances: Vec<i32>) -> Self {
        Self { labels, instances }
    }

    /// Apply the jaw-side label shift.
    ///
    /// For the lower jaw every label greater than zero is incremented
    /// by 20, moving raw quadrants 1/2 into quadrants 3/4 of the
    /// unified label space. Background stays 0. Upper-jaw predictions
    /// pass through unchanged. The shift is applied verbatim; it is not
    /// an anatomical renumbering.
    pub fn shift_for_jaw(&mut self, jaw: JawSide) {
        if jaw == JawSide::Lower {
            for label in &mut self.labels {
                if *label > 0 {
                    *label += 20;
                }
            }
        }
    }

    /// Validate the shape invariant against the source mesh.
    ///
    /// Both arrays must have exactly one entry per mesh vertex. A
    /// mismatch is fatal for the scan; output is never truncated or
    /// padded to fit.
    ///
    /// # Errors
    ///
    /// [`ModelError::ShapeMismatch`] when the lengths disagree.
    pub fn validate_shape(&self, vertex_count: usize) -> ModelResult<()> {
        if self.labels.len() != vertex_count || self.instances.len() != vertex_count {
            return Err(ModelError::ShapeMismatch {
                labels: self.labels.len(),
                instances: self.instances.len(),
                vertices: vertex_count,
            });
        }
        Ok(())
    }

    /// Distinct labels present, in ascending order.
    #[must_use]
    pub fn distinct_labels(&self) -> Vec<i32> {
        let mut labels = self.labels.clone();
        labels.sort_unstable();
        labels.dedup();
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_shift_moves_positive_labels_only() {
        let mut pred = Prediction::new(vec![0, 11, 18, 0, 28], vec![0, 1, 2, 0, 3]);
        pred.shift_for_jaw(JawSide::Lower);
        assert_eq!(pred.labels, vec![0, 31, 38, 0, 48]);
    }

    #[test]
    fn upper_shift_is_identity() {
        let mut pred = Prediction::new(vec![0, 11, 28], vec![0, 1, 2]);
        pred.shift_for_jaw(JawSide::Upper);
        assert_eq!(pred.labels, vec![0, 11, 28]);
    }

    #[test]
    fn shape_mismatch_is_fatal() {
        let pred = Prediction::new(vec![0, 11], vec![0]);
        assert!(matches!(
            pred.validate_shape(2),
            Err(ModelError::ShapeMismatch {
                labels: 2,
                instances: 1,
                vertices: 2
            })
        ));
        let pred = Prediction::new(vec![0, 11], vec![0, 1]);
        assert!(pred.validate_shape(2).is_ok());
        assert!(pred.validate_shape(3).is_err());
    }

    #[test]
    fn distinct_labels_sorted_and_deduped() {
        let pred = Prediction::new(vec![11, 0, 11, 31, 0], vec![1, 0, 1, 2, 0]);
        assert_eq!(pred.distinct_labels(), vec![0, 11, 31]);
    }

    #[test]
    fn wire_names_are_sem_and_ins() {
        let json = r#"{"sem": [0, 11], "ins": [0, 1]}"#;
        let pred: Prediction = serde_json::from_str(json).unwrap_or(Prediction::new(vec![], vec![]));
        assert_eq!(pred.labels, vec![0, 11]);
        assert_eq!(pred.instances, vec![0, 1]);
    }
}
