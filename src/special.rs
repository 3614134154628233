//! Elementary special functions used by the window generator.
//! no_std + alloc compatible

use core::f64::consts::PI;
use core::fmt;
use libm::sin;

/// Upper bound on series terms for [`bessel_i0`]. The series converges far
/// earlier for every argument the window generator produces.
const BESSEL_MAX_TERMS: usize = 64;

/// Relative size below which a further series term no longer changes the sum.
const BESSEL_TOLERANCE: f64 = 1e-17;

/// Errors raised by the special-function helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Factorial is only defined for non-negative integers.
    NegativeFactorial(i64),
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::NegativeFactorial(n) => {
                write!(f, "factorial is defined for non-negative integers, got {}", n)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MathError {}

/// `n!` as a float. Overflows to `inf` past `170!`.
pub fn factorial(n: i64) -> Result<f64, MathError> {
    if n < 0 {
        return Err(MathError::NegativeFactorial(n));
    }
    Ok((1..=n).fold(1.0, |acc, k| acc * k as f64))
}

/// Modified Bessel function of the first kind, order zero.
///
/// Sums the power series `Σ ((x/2)^k / k!)²`, updating each term from the
/// previous one instead of recomputing powers and factorials.
pub fn bessel_i0(x: f64) -> f64 {
    let y = x * x / 4.0;
    let mut sum = 1.0;
    let mut term = 1.0;
    for k in 1..BESSEL_MAX_TERMS {
        let kf = k as f64;
        term *= y / (kf * kf);
        sum += term;
        if term < sum * BESSEL_TOLERANCE {
            break;
        }
    }
    sum
}

/// Normalized sinc, `sin(πx) / (πx)` with `sinc(0) = 1`.
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        sin(px) / px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_values() {
        assert_eq!(factorial(0), Ok(1.0));
        assert_eq!(factorial(1), Ok(1.0));
        assert_eq!(factorial(5), Ok(120.0));
        assert_eq!(factorial(10), Ok(3_628_800.0));
    }

    #[test]
    fn factorial_rejects_negative() {
        assert_eq!(factorial(-3), Err(MathError::NegativeFactorial(-3)));
    }

    #[test]
    fn bessel_reference_values() {
        // Abramowitz & Stegun table 9.8
        assert_eq!(bessel_i0(0.0), 1.0);
        assert!((bessel_i0(1.0) - 1.266_065_877_752_008).abs() < 1e-12);
        assert!((bessel_i0(5.0) - 27.239_871_823_604_44).abs() < 1e-9);
        // Even function
        assert_eq!(bessel_i0(-2.5), bessel_i0(2.5));
    }

    #[test]
    fn sinc_zeros_and_peak() {
        assert_eq!(sinc(0.0), 1.0);
        for k in 1..5 {
            assert!(sinc(k as f64).abs() < 1e-15);
            assert!(sinc(-(k as f64)).abs() < 1e-15);
        }
        assert!((sinc(0.5) - 2.0 / PI).abs() < 1e-15);
    }
}
