//! Time arithmetic for the discrete stepper.

use crate::error::SystemError;

/// Absolute tolerance used when testing whether a time is a multiple of a
/// zero-every period.
pub const ZERO_EVERY_TOLERANCE: f64 = 1e-12;

/// Returns `true` if `a` is a multiple of `b`, within [`ZERO_EVERY_TOLERANCE`].
pub fn float_is_divisible_by(a: f64, b: f64) -> bool {
    let r = a.rem_euclid(b);
    r < ZERO_EVERY_TOLERANCE || b - r < ZERO_EVERY_TOLERANCE
}

/// Number of `dt` steps needed to get from `from` to `to`.
///
/// `ceil((to - from) / dt)` when that is finite and positive, otherwise 0.
pub fn n_steps(from: f64, to: f64, dt: f64) -> usize {
    let steps = ((to - from) / dt).ceil();
    if steps.is_finite() && steps > 0.0 {
        steps as usize
    } else {
        0
    }
}

/// Checks that simulation times are finite, strictly increasing and none is
/// before `current`.
pub fn check_times(times: &[f64], current: f64) -> Result<(), SystemError> {
    if let Some(&time) = times.iter().find(|t| !t.is_finite()) {
        return Err(SystemError::NonFiniteTime { time });
    }
    if let Some(&found) = times.iter().find(|&&t| t < current) {
        return Err(SystemError::TimeTooEarly { current, found });
    }
    if times.windows(2).any(|w| !(w[0] < w[1])) {
        return Err(SystemError::UnorderedTimes);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisible_exact() {
        assert!(float_is_divisible_by(4.0, 2.0));
        assert!(float_is_divisible_by(0.0, 3.0));
        assert!(!float_is_divisible_by(3.0, 2.0));
    }

    #[test]
    fn divisible_within_tolerance() {
        // 0.1 + 0.2 is just above 0.3; 0.3 * 3 is just below 0.9.
        assert!(float_is_divisible_by(0.1 + 0.2, 0.3));
        assert!(float_is_divisible_by(0.3 * 3.0, 0.3));
        assert!(!float_is_divisible_by(0.3 + 1e-9, 0.3));
    }

    #[test]
    fn divisible_negative_time() {
        assert!(float_is_divisible_by(-4.0, 2.0));
        assert!(!float_is_divisible_by(-3.0, 2.0));
    }

    #[test]
    fn steps() {
        assert_eq!(n_steps(5.0, 6.0, 0.5), 2);
        assert_eq!(n_steps(0.0, 1.0, 0.3), 4);
        assert_eq!(n_steps(5.0, 5.0, 0.5), 0);
    }

    #[test]
    fn steps_with_degenerate_dt() {
        assert_eq!(n_steps(0.0, 1.0, 0.0), 0);
        assert_eq!(n_steps(0.0, 1.0, -1.0), 0);
        assert_eq!(n_steps(0.0, 1.0, f64::INFINITY), 0);
    }

    #[test]
    fn times_validation() {
        assert!(check_times(&[1.0, 2.0, 3.5], 1.0).is_ok());
        assert_eq!(
            check_times(&[1.0, 0.0], 1.0),
            Err(SystemError::TimeTooEarly {
                current: 1.0,
                found: 0.0
            })
        );
        assert_eq!(
            check_times(&[1.0, 2.0, 2.0], 0.0),
            Err(SystemError::UnorderedTimes)
        );
        assert_eq!(
            check_times(&[3.0, 2.0], 0.0),
            Err(SystemError::UnorderedTimes)
        );
    }

    #[test]
    fn times_must_be_finite() {
        assert!(matches!(
            check_times(&[1.0, f64::NAN], 0.0),
            Err(SystemError::NonFiniteTime { time }) if time.is_nan()
        ));
        assert_eq!(
            check_times(&[f64::INFINITY], 0.0),
            Err(SystemError::NonFiniteTime {
                time: f64::INFINITY
            })
        );
    }
}
