//! Numerical integration utilities.

use crate::errors::{RPCAError, RPCAResult};
use num::Float;

/// Integrate samples `y(x)` with the composite trapezoidal rule.
///
/// The abscissae are used in the order given, so a descending `x` yields the
/// negated integral. Callers that want the integral over an increasing
/// variable must sort first.
///
/// # Errors
/// Returns an error if `x` and `y` have different lengths.
///
/// # Example
/// ```
/// use rpca_core::utils::integrate::trapezoid;
///
/// let x: [f64; 3] = [0.0, 1.0, 2.0];
/// let y: [f64; 3] = [0.0, 1.0, 2.0];
/// let area = trapezoid(&x, &y).unwrap();
/// assert!((area - 2.0).abs() < 1e-12);
/// ```
pub fn trapezoid<T: Float>(x: &[T], y: &[T]) -> RPCAResult<T> {
    if x.len() != y.len() {
        return Err(RPCAError::Error(format!(
            "Cannot integrate {} samples over {} abscissae",
            y.len(),
            x.len()
        )));
    }

    let two = T::one() + T::one();
    Ok(x.windows(2)
        .zip(y.windows(2))
        .fold(T::zero(), |acc, (xs, ys)| {
            acc + (xs[1] - xs[0]) * (ys[0] + ys[1]) / two
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_function_is_exact() {
        let x: Vec<f64> = (0..=10).map(|i| i as f64 * 5.0 + 20.0).collect();
        let y: Vec<f64> = x.iter().map(|h| 3.0 * h + 1.0).collect();
        // integral of 3h + 1 from 20 to 70
        let expected = 1.5 * (70.0f64.powi(2) - 20.0f64.powi(2)) + 50.0;
        assert_relative_eq!(trapezoid(&x, &y).unwrap(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_descending_abscissae_negate() {
        let x = [3.0, 2.0, 1.0];
        let y = [1.0, 1.0, 1.0];
        assert_relative_eq!(trapezoid(&x, &y).unwrap(), -2.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(trapezoid::<f64>(&[], &[]).unwrap(), 0.0);
        assert_eq!(trapezoid(&[1.0], &[5.0]).unwrap(), 0.0);
        assert!(trapezoid(&[1.0, 2.0], &[5.0]).is_err());
    }

    #[test]
    fn test_zero_integrand() {
        let x = [20.0, 25.0, 30.0, 35.0];
        let y = [0.0f64; 4];
        assert_eq!(trapezoid(&x, &y).unwrap(), 0.0);
    }
}
