//! Smoothing and derivative filters.
//!
//! Moving average, finite differences and Savitzky-Golay all build a
//! [`Kernel`] and hand it to [`convolve`]; the two exponential smoothers are
//! first-order recurrences. Every function returns a new vector the length of
//! its input and validates arguments before doing any work.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use nalgebra::DMatrix;

use crate::convolution::{convolve, Kernel};
use crate::linalg::DenseMatrix;

/// Centered first difference.
const FIRST_DERIVATIVE: [f64; 3] = [-0.5, 0.0, 0.5];
/// Centered second difference.
const SECOND_DERIVATIVE: [f64; 3] = [1.0, -2.0, 1.0];

/// Errors raised while building or applying a filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterError {
    /// A kernel needs at least one tap.
    EmptyKernel,
    /// The kernel center does not index a tap.
    KernelCenterOutOfRange { center: usize, len: usize },
    /// A symmetric kernel was requested with an even number of taps.
    EvenKernel(usize),
    /// `left + right` is odd, so the asymmetric kernel width is even.
    OddCombinedWidth { left: usize, right: usize },
    /// The fit has more coefficients than the kernel has points.
    PolynomialOrderTooHigh { order: usize, width: usize },
    /// The requested derivative exceeds the fitted polynomial order.
    DerivativeOrderTooHigh { derivative: usize, order: usize },
    /// The normal equations could not be inverted.
    SingularMatrix,
    /// Smoothing factors must lie in `[0, 1]`.
    SmoothingFactor(f64),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::EmptyKernel => write!(f, "kernel must have at least one tap"),
            FilterError::KernelCenterOutOfRange { center, len } => write!(
                f,
                "kernel center {} is outside a kernel of {} taps",
                center, len
            ),
            FilterError::EvenKernel(size) => {
                write!(f, "kernel size must be an odd number, got {}", size)
            }
            FilterError::OddCombinedWidth { left, right } => write!(
                f,
                "kernel size must be an odd number, got {} left + {} right + center",
                left, right
            ),
            FilterError::PolynomialOrderTooHigh { order, width } => write!(
                f,
                "polynomial order {} needs more than {} kernel points",
                order, width
            ),
            FilterError::DerivativeOrderTooHigh { derivative, order } => write!(
                f,
                "derivative order {} exceeds polynomial order {}",
                derivative, order
            ),
            FilterError::SingularMatrix => write!(f, "least-squares system is singular"),
            FilterError::SmoothingFactor(a) => {
                write!(f, "smoothing factor must be between 0.0 and 1.0, got {}", a)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FilterError {}

fn check_odd(size: usize) -> Result<(), FilterError> {
    if size % 2 != 1 {
        debug_log!("rejected even kernel size {}", size);
        return Err(FilterError::EvenKernel(size));
    }
    Ok(())
}

fn check_factor(factor: f64) -> Result<(), FilterError> {
    // Written so that NaN fails the range test.
    if !(0.0..=1.0).contains(&factor) {
        debug_log!("rejected smoothing factor {}", factor);
        return Err(FilterError::SmoothingFactor(factor));
    }
    Ok(())
}

/// Unweighted mean over a centered window of `kernel_size` samples.
///
/// # Errors
///
/// [`FilterError::EvenKernel`] when `kernel_size` is even (zero included).
pub fn moving_average(samples: &[f64], kernel_size: usize) -> Result<Vec<f64>, FilterError> {
    check_odd(kernel_size)?;
    let kernel = Kernel::centered(vec![1.0 / kernel_size as f64; kernel_size])?;
    Ok(convolve(samples, &kernel))
}

/// Centered first difference `(x[n+1] - x[n-1]) / 2`.
pub fn first_derivative(samples: &[f64]) -> Vec<f64> {
    convolve(samples, &Kernel::from_parts(FIRST_DERIVATIVE.to_vec(), 1))
}

/// Centered second difference `x[n+1] - 2x[n] + x[n-1]`.
pub fn second_derivative(samples: &[f64]) -> Vec<f64> {
    convolve(samples, &Kernel::from_parts(SECOND_DERIVATIVE.to_vec(), 1))
}

/// Savitzky-Golay coefficients from a local least-squares polynomial fit.
///
/// Builds the `(left + right + 1) × (order + 1)` design matrix
/// `A[row][col] = (row - left)^col` and returns row `derivative` of
/// `(AᵀA)⁻¹Aᵀ`. Tap `left` of the result is the center.
///
/// The matrix backend is pluggable through [`DenseMatrix`].
pub fn savitzky_golay_kernel_with<M: DenseMatrix>(
    left: usize,
    right: usize,
    order: usize,
    derivative: usize,
) -> Result<Kernel, FilterError> {
    let width = left + right + 1;
    if order + 1 > width {
        return Err(FilterError::PolynomialOrderTooHigh { order, width });
    }
    if derivative > order {
        return Err(FilterError::DerivativeOrderTooHigh { derivative, order });
    }

    let design = M::from_fn(width, order + 1, |row, col| {
        let x = row as f64 - left as f64;
        (0..col).fold(1.0, |acc, _| acc * x)
    });
    let design_t = design.transpose();
    let normal = design_t
        .multiply(&design)
        .ok_or(FilterError::SingularMatrix)?;
    let projection = normal
        .inverse()
        .ok_or(FilterError::SingularMatrix)?
        .multiply(&design_t)
        .ok_or(FilterError::SingularMatrix)?;

    let taps: Vec<f64> = (0..width).map(|col| projection.get(derivative, col)).collect();
    trace_log!(
        "savitzky-golay kernel left={} right={} order={} derivative={} taps={:?}",
        left,
        right,
        order,
        derivative,
        taps
    );
    Kernel::new(taps, left)
}

/// [`savitzky_golay_kernel_with`] using `nalgebra::DMatrix<f64>`.
pub fn savitzky_golay_kernel(
    left: usize,
    right: usize,
    order: usize,
    derivative: usize,
) -> Result<Kernel, FilterError> {
    savitzky_golay_kernel_with::<DMatrix<f64>>(left, right, order, derivative)
}

/// Symmetric Savitzky-Golay filter over `kernel_size` points.
///
/// `derivative = 0` smooths; higher values estimate the derivative of that
/// order (in units of the sample spacing).
pub fn savitzky_golay(
    samples: &[f64],
    kernel_size: usize,
    order: usize,
    derivative: usize,
) -> Result<Vec<f64>, FilterError> {
    savitzky_golay_with::<DMatrix<f64>>(samples, kernel_size, order, derivative)
}

/// [`savitzky_golay`] with a caller-chosen matrix backend.
pub fn savitzky_golay_with<M: DenseMatrix>(
    samples: &[f64],
    kernel_size: usize,
    order: usize,
    derivative: usize,
) -> Result<Vec<f64>, FilterError> {
    check_odd(kernel_size)?;
    let half = (kernel_size - 1) / 2;
    let kernel = savitzky_golay_kernel_with::<M>(half, half, order, derivative)?;
    Ok(convolve(samples, &kernel))
}

/// Savitzky-Golay filter with `left` points before and `right` after the
/// center. `left + right` must be even.
pub fn savitzky_golay_asymmetric(
    samples: &[f64],
    left: usize,
    right: usize,
    order: usize,
    derivative: usize,
) -> Result<Vec<f64>, FilterError> {
    savitzky_golay_asymmetric_with::<DMatrix<f64>>(samples, left, right, order, derivative)
}

/// [`savitzky_golay_asymmetric`] with a caller-chosen matrix backend.
pub fn savitzky_golay_asymmetric_with<M: DenseMatrix>(
    samples: &[f64],
    left: usize,
    right: usize,
    order: usize,
    derivative: usize,
) -> Result<Vec<f64>, FilterError> {
    if (left + right) % 2 == 1 {
        debug_log!("rejected asymmetric kernel left={} right={}", left, right);
        return Err(FilterError::OddCombinedWidth { left, right });
    }
    let kernel = savitzky_golay_kernel_with::<M>(left, right, order, derivative)?;
    Ok(convolve(samples, &kernel))
}

/// Single exponential smoothing, `y[n] = α·x[n] + (1 - α)·y[n-1]` with
/// `y[-1] = 0`.
pub fn simple_exponential(samples: &[f64], alpha: f64) -> Result<Vec<f64>, FilterError> {
    check_factor(alpha)?;
    let keep = 1.0 - alpha;
    let mut prev = 0.0;
    Ok(samples
        .iter()
        .map(|&x| {
            prev = alpha * x + keep * prev;
            prev
        })
        .collect())
}

/// Holt's linear (double) exponential smoothing.
///
/// ```text
/// y[n] = a·x[n] + (1 - a)·(y[n-1] + t[n-1])
/// t[n] = b·(y[n] - y[n-1]) + (1 - b)·t[n-1]
/// ```
///
/// with level `y[-1] = 0` and trend `t[-1] = 0`.
pub fn linear_exponential(
    samples: &[f64],
    level_factor: f64,
    trend_factor: f64,
) -> Result<Vec<f64>, FilterError> {
    check_factor(level_factor)?;
    check_factor(trend_factor)?;
    let mut level = 0.0;
    let mut trend = 0.0;
    Ok(samples
        .iter()
        .map(|&x| {
            let next = level_factor * x + (1.0 - level_factor) * (level + trend);
            trend = trend_factor * (next - level) + (1.0 - trend_factor) * trend;
            level = next;
            next
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn moving_average_rejects_even() {
        assert_eq!(moving_average(&[1.0; 8], 4), Err(FilterError::EvenKernel(4)));
        assert_eq!(moving_average(&[1.0; 8], 0), Err(FilterError::EvenKernel(0)));
    }

    #[test]
    fn moving_average_interior_mean() {
        let x: Vec<f64> = (0..20).map(|i| ((i * 7) % 5) as f64).collect();
        let y = moving_average(&x, 5).unwrap();
        for n in 2..18 {
            let mean = x[n - 2..=n + 2].iter().sum::<f64>() / 5.0;
            assert!((y[n] - mean).abs() < EPSILON);
        }
    }

    #[test]
    fn derivatives_of_quadratic() {
        let x: Vec<f64> = (0..10).map(|i| (i * i) as f64).collect();
        let d1 = first_derivative(&x);
        let d2 = second_derivative(&x);
        for n in 1..9 {
            assert!((d1[n] - 2.0 * n as f64).abs() < EPSILON);
            assert!((d2[n] - 2.0).abs() < EPSILON);
        }
        // Zero padding at the left edge: (x[1] - 0) / 2
        assert!((d1[0] - 0.5).abs() < EPSILON);
    }

    #[test]
    fn savitzky_golay_classic_coefficients() {
        // Quadratic, 5 points: (-3, 12, 17, 12, -3) / 35
        let k = savitzky_golay_kernel(2, 2, 2, 0).unwrap();
        let expected = [-3.0, 12.0, 17.0, 12.0, -3.0];
        for (a, e) in k.taps().iter().zip(expected.iter()) {
            assert!((a - e / 35.0).abs() < EPSILON, "{} vs {}", a, e / 35.0);
        }
        assert_eq!(k.center(), 2);
        // First derivative, quadratic, 5 points: (-2, -1, 0, 1, 2) / 10
        let k = savitzky_golay_kernel(2, 2, 2, 1).unwrap();
        let expected = [-2.0, -1.0, 0.0, 1.0, 2.0];
        for (a, e) in k.taps().iter().zip(expected.iter()) {
            assert!((a - e / 10.0).abs() < EPSILON);
        }
    }

    #[test]
    fn savitzky_golay_argument_checks() {
        let x = [1.0; 16];
        assert_eq!(savitzky_golay(&x, 4, 2, 0), Err(FilterError::EvenKernel(4)));
        assert_eq!(
            savitzky_golay(&x, 5, 5, 0),
            Err(FilterError::PolynomialOrderTooHigh { order: 5, width: 5 })
        );
        assert_eq!(
            savitzky_golay(&x, 5, 2, 3),
            Err(FilterError::DerivativeOrderTooHigh {
                derivative: 3,
                order: 2
            })
        );
        assert_eq!(
            savitzky_golay_asymmetric(&x, 2, 1, 1, 0),
            Err(FilterError::OddCombinedWidth { left: 2, right: 1 })
        );
    }

    #[test]
    fn asymmetric_kernel_center_and_width() {
        let k = savitzky_golay_kernel(4, 2, 2, 0).unwrap();
        assert_eq!(k.len(), 7);
        assert_eq!(k.center(), 4);
        // Smoothing weights reproduce constants.
        let sum: f64 = k.taps().iter().sum();
        assert!((sum - 1.0).abs() < EPSILON);
    }

    #[test]
    fn exponential_extremes() {
        let x = [3.0, -1.0, 4.0, 1.0, 5.0];
        assert_eq!(simple_exponential(&x, 1.0).unwrap(), x.to_vec());
        assert_eq!(simple_exponential(&x, 0.0).unwrap(), vec![0.0; 5]);
        assert_eq!(
            simple_exponential(&x, 1.5),
            Err(FilterError::SmoothingFactor(1.5))
        );
        assert!(simple_exponential(&x, f64::NAN).is_err());
    }

    #[test]
    fn simple_exponential_recurrence() {
        let y = simple_exponential(&[1.0, 1.0, 1.0], 0.5).unwrap();
        assert_eq!(y, vec![0.5, 0.75, 0.875]);
    }

    #[test]
    fn linear_exponential_tracks_ramp() {
        let x: Vec<f64> = (0..200).map(|i| 2.0 * i as f64 + 1.0).collect();
        let y = linear_exponential(&x, 0.5, 0.5).unwrap();
        // Holt's method has no steady-state lag on a linear trend.
        assert!((y[199] - x[199]).abs() < 1e-6);
        assert_eq!(linear_exponential(&x, 1.0, 0.3).unwrap(), x);
        assert_eq!(
            linear_exponential(&x, 0.5, -0.1),
            Err(FilterError::SmoothingFactor(-0.1))
        );
    }
}
