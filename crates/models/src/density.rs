//! Log densities used by model comparison functions.

use statrs::function::gamma::ln_gamma;

/// Log of the Poisson probability mass of `x` with mean `lambda`.
///
/// Computed as `x ln(lambda) - lambda - ln Γ(x + 1)`, so non-integer `x` is
/// accepted. With `lambda == 0` the result is `0` for `x == 0` and negative
/// infinity otherwise.
pub fn poisson_log_density(x: f64, lambda: f64) -> f64 {
    if lambda == 0.0 {
        return if x == 0.0 { 0.0 } else { f64::NEG_INFINITY };
    }
    x * lambda.ln() - lambda - ln_gamma(x + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn matches_direct_pmf() {
        // P(X = 2 | λ = 1) = e^-1 / 2
        assert_abs_diff_eq!(
            poisson_log_density(2.0, 1.0),
            (-1.0f64).exp().ln() - 2.0f64.ln(),
            epsilon = 1e-12
        );
        // P(X = 0 | λ = 3) = e^-3
        assert_abs_diff_eq!(poisson_log_density(0.0, 3.0), -3.0, epsilon = 1e-12);
    }

    #[test]
    fn mass_sums_to_one() {
        let lambda = 4.5;
        let total: f64 = (0..100)
            .map(|k| poisson_log_density(k as f64, lambda).exp())
            .sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn zero_mean() {
        assert_eq!(poisson_log_density(0.0, 0.0), 0.0);
        assert_eq!(poisson_log_density(1.0, 0.0), f64::NEG_INFINITY);
    }
}
