// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Dense cue × outcome weight matrix with labelled axes

use crate::cue_index::CueIndex;
use crate::error::{ActivationError, ActivationResult, LabelAxis};
use ahash::AHashSet;
use ndarray::{Array2, ArrayView1, ArrayView2, NdFloat};

/// Association weights: rows are cues, columns are outcomes.
///
/// Immutable once built. Construction enforces unique labels on both axes and
/// that the label counts match the value shape.
#[derive(Debug, Clone)]
pub struct WeightMatrix<F> {
    values: Array2<F>,
    cues: CueIndex,
    outcomes: Vec<String>,
}

impl<F: NdFloat> WeightMatrix<F> {
    pub fn new(cues: Vec<String>, outcomes: Vec<String>, values: Array2<F>) -> ActivationResult<Self> {
        if values.nrows() != cues.len() {
            return Err(ActivationError::ShapeMismatch {
                what: "weight matrix rows (cues)",
                expected: cues.len(),
                actual: values.nrows(),
            });
        }
        if values.ncols() != outcomes.len() {
            return Err(ActivationError::ShapeMismatch {
                what: "weight matrix columns (outcomes)",
                expected: outcomes.len(),
                actual: values.ncols(),
            });
        }

        let mut seen = AHashSet::with_capacity(outcomes.len());
        for outcome in &outcomes {
            if !seen.insert(outcome.as_str()) {
                return Err(ActivationError::DuplicateLabel {
                    axis: LabelAxis::Outcomes,
                    label: outcome.clone(),
                });
            }
        }

        let cues = CueIndex::new(cues)?;
        Ok(Self {
            values,
            cues,
            outcomes,
        })
    }

    /// Build from row-major nested vectors (one inner vector per cue)
    pub fn from_rows(cues: Vec<String>, outcomes: Vec<String>, rows: Vec<Vec<F>>) -> ActivationResult<Self> {
        let n_outcomes = outcomes.len();
        let n_rows = rows.len();
        let mut flat = Vec::with_capacity(n_rows * n_outcomes);
        for row in rows {
            if row.len() != n_outcomes {
                return Err(ActivationError::ShapeMismatch {
                    what: "weight row length (outcomes)",
                    expected: n_outcomes,
                    actual: row.len(),
                });
            }
            flat.extend(row);
        }
        let values = Array2::from_shape_vec((n_rows, n_outcomes), flat)
            .map_err(|e| ActivationError::Assembly(e.to_string()))?;
        Self::new(cues, outcomes, values)
    }

    pub fn values(&self) -> ArrayView2<'_, F> {
        self.values.view()
    }

    pub fn cue_index(&self) -> &CueIndex {
        &self.cues
    }

    pub fn cues(&self) -> &[String] {
        self.cues.labels()
    }

    pub fn outcomes(&self) -> &[String] {
        &self.outcomes
    }

    pub fn n_cues(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_outcomes(&self) -> usize {
        self.values.ncols()
    }

    /// Weight row of one cue, by label
    pub fn cue_row(&self, cue: &str) -> Option<ArrayView1<'_, F>> {
        self.cues.get(cue).map(|row| self.values.row(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_weight_matrix() {
        let weights = WeightMatrix::new(
            labels(&["c1", "c2", "c3"]),
            labels(&["o1", "o2"]),
            array![[0.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
        )
        .unwrap();

        assert_eq!(weights.n_cues(), 3);
        assert_eq!(weights.n_outcomes(), 2);
        assert_eq!(weights.cue_row("c2").unwrap().to_vec(), vec![1.0, 0.0]);
        assert!(weights.cue_row("c9").is_none());
    }

    #[test]
    fn test_from_rows_matches_new() {
        let from_rows = WeightMatrix::from_rows(
            labels(&["c1", "c2"]),
            labels(&["o1", "o2", "o3"]),
            vec![vec![1.0f32, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
        )
        .unwrap();
        assert_eq!(from_rows.values(), array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = WeightMatrix::new(labels(&["c1"]), labels(&["o1"]), array![[1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, ActivationError::ShapeMismatch { expected: 1, actual: 2, .. }));

        let err = WeightMatrix::from_rows(labels(&["c1", "c2"]), labels(&["o1"]), vec![vec![1.0], vec![]])
            .unwrap_err();
        assert!(matches!(err, ActivationError::ShapeMismatch { expected: 1, actual: 0, .. }));
    }

    #[test]
    fn test_duplicate_labels() {
        let err = WeightMatrix::new(labels(&["c1", "c1"]), labels(&["o1"]), array![[1.0], [2.0]]).unwrap_err();
        assert!(matches!(err, ActivationError::DuplicateLabel { axis: LabelAxis::Cues, .. }));

        let err = WeightMatrix::new(labels(&["c1"]), labels(&["o1", "o1"]), array![[1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, ActivationError::DuplicateLabel { axis: LabelAxis::Outcomes, .. }));
    }
}
