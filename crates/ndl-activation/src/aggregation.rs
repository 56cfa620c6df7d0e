// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Row Aggregation
//!
//! Sums the weight rows selected by one event into its activation vector:
//! `activation[o] = Σ weights[row, o]` over the event's resolved rows.
//!
//! Rows are added in the order given, in the matrix's native float type.
//! No normalization, clipping or NaN masking: NaN/Inf in the weights reach
//! the output unchanged.

use ndarray::{Array1, ArrayView2, ArrayViewMut1, NdFloat};

/// Add the selected weight rows into `out`.
///
/// `out` must have length = number of outcomes. It is accumulated into, not
/// reset; callers hand in zeroed rows.
#[inline]
pub fn accumulate_rows<F: NdFloat>(weights: ArrayView2<'_, F>, rows: &[usize], mut out: ArrayViewMut1<'_, F>) {
    debug_assert_eq!(out.len(), weights.ncols());
    for &row in rows {
        out += &weights.row(row);
    }
}

/// Sum the selected weight rows into a fresh vector (zero vector for no rows)
pub fn aggregate_rows<F: NdFloat>(weights: ArrayView2<'_, F>, rows: &[usize]) -> Array1<F> {
    let mut out = Array1::zeros(weights.ncols());
    accumulate_rows(weights, rows, out.view_mut());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sum_of_selected_rows() {
        let weights = array![[0.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        assert_eq!(aggregate_rows(weights.view(), &[0, 1, 2]), array![1.0, 1.0]);
        assert_eq!(aggregate_rows(weights.view(), &[0, 2]), array![0.0, 1.0]);
        assert_eq!(aggregate_rows(weights.view(), &[1]), array![1.0, 0.0]);
    }

    #[test]
    fn test_empty_selection_is_zero_vector() {
        let weights = array![[3.0f32, 4.0, 5.0]];
        assert_eq!(aggregate_rows(weights.view(), &[]), array![0.0f32, 0.0, 0.0]);
    }

    #[test]
    fn test_non_finite_values_propagate() {
        let weights = array![[f64::NAN, 1.0, 0.0], [0.0, f64::INFINITY, f64::NEG_INFINITY]];
        let out = aggregate_rows(weights.view(), &[0, 1]);
        assert!(out[0].is_nan());
        assert_eq!(out[1], f64::INFINITY);
        assert_eq!(out[2], f64::NEG_INFINITY);
    }

    #[test]
    fn test_accumulate_adds_into_existing_values() {
        let weights = array![[1.0, 2.0], [10.0, 20.0]];
        let mut out = array![100.0, 200.0];
        accumulate_rows(weights.view(), &[0, 1], out.view_mut());
        assert_eq!(out, array![111.0, 222.0]);
    }

    #[test]
    fn test_native_precision() {
        // 1e8 + 1 is not representable in f32
        let weights = array![[1.0e8f32], [1.0f32]];
        assert_eq!(aggregate_rows(weights.view(), &[0, 1])[0], 1.0e8f32);

        let weights = array![[1.0e8f64], [1.0f64]];
        assert_eq!(aggregate_rows(weights.view(), &[0, 1])[0], 100_000_001.0f64);
    }
}
