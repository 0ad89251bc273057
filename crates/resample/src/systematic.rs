//! Systematic (low-variance) resampling.

use ndarray::{Array2, ArrayView2};
use rand::Rng;

use crate::error::ResampleError;

/// Selects `weights.len()` indices with frequency proportional to weight.
///
/// With `n = weights.len()`, the points `u/n + k/n` for `k in 0..n` are
/// placed on the normalized cumulative weight and each is assigned the first
/// index whose cumulative weight reaches it. The result is non-decreasing.
/// `u` is normally drawn from `U(0, 1)`.
///
/// # Errors
///
/// - [`ResampleError::EmptyWeights`] if `weights` is empty.
/// - [`ResampleError::InvalidWeights`] if a weight is negative or non-finite,
///   or if the weights sum to zero.
///
/// # Example
///
/// ```
/// use dust_resample::resample;
///
/// let idx = resample(&[0.0, 3.0, 1.0], 0.5).unwrap();
/// assert_eq!(idx, vec![1, 1, 2]);
/// ```
pub fn resample(weights: &[f64], u: f64) -> Result<Vec<usize>, ResampleError> {
    let n = weights.len();
    if n == 0 {
        return Err(ResampleError::EmptyWeights);
    }
    let sum: f64 = weights.iter().sum();
    if !sum.is_finite() || sum <= 0.0 || weights.iter().any(|&w| !(w >= 0.0)) {
        return Err(ResampleError::InvalidWeights { sum });
    }

    let step = 1.0 / n as f64;
    let mut uu = u * step;
    let mut idx = 0;
    let mut cw = weights[0] / sum;
    let mut result = Vec::with_capacity(n);
    while result.len() < n {
        // Rounding can leave the last cumulative weight just under the final point.
        while uu > cw && idx < n - 1 {
            idx += 1;
            cw += weights[idx] / sum;
        }
        result.push(idx);
        uu += step;
    }
    Ok(result)
}

/// Resamples every group, drawing one uniform offset per group in group order.
///
/// `weights` has shape `[n_groups, n_particles]`. The returned array has the
/// same shape and can be passed straight to a state reorder.
///
/// # Errors
///
/// As [`resample`], for the first group whose weights are invalid.
pub fn resample_groups<R: Rng + ?Sized>(
    weights: ArrayView2<'_, f64>,
    rng: &mut R,
) -> Result<Array2<usize>, ResampleError> {
    let mut out = Array2::zeros(weights.raw_dim());
    for (row, mut out_row) in weights.rows().into_iter().zip(out.rows_mut()) {
        let w: Vec<f64> = row.to_vec();
        let u: f64 = rng.random();
        for (dst, idx) in out_row.iter_mut().zip(resample(&w, u)?) {
            *dst = idx;
        }
    }
    Ok(out)
}
