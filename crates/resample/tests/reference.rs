//! Regression tests for systematic resampling against reference outputs.

use approx::assert_abs_diff_eq;
use dust_resample::{ResampleError, resample, resample_groups};
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn reference_case_one() {
    let weights = [
        0.019088169,
        0.538700715,
        0.022724325,
        0.110358560,
        0.023474925,
        0.001216593,
        0.058643378,
        1.0,
        0.007363703,
        0.013855975,
        0.009302719,
        0.022136699,
        0.091886086,
        0.084838106,
        0.002934530,
        0.022197226,
        0.088122091,
        0.288347958,
        0.163829315,
        0.001286831,
    ];
    let expected = vec![
        0, 1, 1, 1, 1, 3, 7, 7, 7, 7, 7, 7, 7, 7, 11, 13, 16, 17, 17, 18,
    ];
    assert_eq!(resample(&weights, 0.06986051).unwrap(), expected);
}

#[test]
fn reference_case_two() {
    let weights = [
        0.199120977,
        0.056060287,
        0.115732635,
        0.033579278,
        0.001514663,
        0.037144679,
        0.016340364,
        0.112734953,
        0.051246824,
        0.157887763,
        0.133908897,
        0.009185324,
        0.041430892,
        0.166888607,
        1.0,
        0.009759700,
        0.026224724,
        0.349677617,
        0.242408128,
        0.012312731,
    ];
    let expected = vec![
        0, 2, 3, 7, 9, 10, 12, 13, 14, 14, 14, 14, 14, 14, 14, 17, 17, 17, 18, 18,
    ];
    assert_eq!(resample(&weights, 0.8947567).unwrap(), expected);
}

#[test]
fn scaling_weights_does_not_change_selection() {
    let weights = [0.2, 0.5, 0.1, 0.9, 0.3];
    let scaled: Vec<f64> = weights.iter().map(|w| w * 1e6).collect();
    for u in [0.05, 0.5, 0.95] {
        assert_eq!(resample(&weights, u).unwrap(), resample(&scaled, u).unwrap());
    }
}

/// Over many draws, selection counts approach `n * w / sum(w)`.
#[test]
fn selection_frequency_is_proportional() {
    let weights = [1.0, 2.0, 3.0, 4.0];
    let n_draws = 20_000;
    let mut rng = StdRng::seed_from_u64(2024);
    let w = Array2::from_shape_fn((n_draws, weights.len()), |(_, p)| weights[p]);

    let idx = resample_groups(w.view(), &mut rng).unwrap();

    let mut counts = [0usize; 4];
    for &i in idx.iter() {
        counts[i] += 1;
    }
    let total = (n_draws * weights.len()) as f64;
    for (i, &c) in counts.iter().enumerate() {
        assert_abs_diff_eq!(c as f64 / total, weights[i] / 10.0, epsilon = 0.01);
    }
}

#[test]
fn empty_weights_message() {
    let err = resample(&[], 0.1).unwrap_err();
    assert_eq!(err, ResampleError::EmptyWeights);
    assert_eq!(err.to_string(), "Weights cannot be empty.");
}
