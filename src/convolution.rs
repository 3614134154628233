//! Direct-form discrete convolution.
//!
//! Every smoothing and derivative filter in [`crate::smoothing`] reduces to
//! [`convolve`] with a specific [`Kernel`]. The output has the same length as
//! the input; taps that would read before the first or past the last sample
//! contribute zero, which is equivalent to zero-padding the input (edges are
//! attenuated, never wrapped or reflected).

use alloc::vec;
use alloc::vec::Vec;

use crate::smoothing::FilterError;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Convolution weights plus the index of the tap aligned with the current
/// output sample.
///
/// The center is independent of the length, so asymmetric kernels with more
/// taps on one side are valid.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    taps: Vec<f64>,
    center: usize,
}

impl Kernel {
    /// Create a kernel whose tap `center` lines up with the output sample.
    ///
    /// # Errors
    ///
    /// [`FilterError::EmptyKernel`] when `taps` is empty and
    /// [`FilterError::KernelCenterOutOfRange`] when `center >= taps.len()`.
    pub fn new(taps: Vec<f64>, center: usize) -> Result<Self, FilterError> {
        if taps.is_empty() {
            return Err(FilterError::EmptyKernel);
        }
        if center >= taps.len() {
            return Err(FilterError::KernelCenterOutOfRange {
                center,
                len: taps.len(),
            });
        }
        Ok(Self { taps, center })
    }

    /// Fixed kernels known to be well formed at compile time.
    pub(crate) fn from_parts(taps: Vec<f64>, center: usize) -> Self {
        debug_assert!(center < taps.len());
        Self { taps, center }
    }

    /// Kernel centered on its midpoint, `(len - 1) / 2`.
    pub fn centered(taps: Vec<f64>) -> Result<Self, FilterError> {
        let center = taps.len().saturating_sub(1) / 2;
        Self::new(taps, center)
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn center(&self) -> usize {
        self.center
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Always `false`; construction rejects empty kernels.
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Taps before the center.
    pub fn left_extent(&self) -> usize {
        self.center
    }

    /// Taps after the center.
    pub fn right_extent(&self) -> usize {
        self.taps.len() - self.center - 1
    }
}

/// Output sample `n`: `Σ_k samples[n + k - center] · taps[k]` over in-range
/// indices only.
#[inline]
fn convolve_at(samples: &[f64], kernel: &Kernel, n: usize) -> f64 {
    let len = samples.len();
    // Clip the tap range so the shifted index stays within [0, len).
    let first = kernel.center.saturating_sub(n);
    let last = (len + kernel.center - n).min(kernel.taps.len());
    let mut sum = 0.0;
    for k in first..last {
        sum += samples[n + k - kernel.center] * kernel.taps[k];
    }
    sum
}

/// Convolve `samples` with `kernel`, returning a new sequence of the same
/// length. `O(len × kernel.len())`; the input is left untouched.
pub fn convolve(samples: &[f64], kernel: &Kernel) -> Vec<f64> {
    let mut output = vec![0.0; samples.len()];
    convolve_into(samples, kernel, &mut output);
    output
}

/// Like [`convolve`] but writes into a caller-provided buffer.
///
/// # Panics
///
/// If `output.len() != samples.len()`.
pub fn convolve_into(samples: &[f64], kernel: &Kernel, output: &mut [f64]) {
    assert_eq!(
        samples.len(),
        output.len(),
        "convolution output must match input length"
    );
    #[cfg(feature = "parallel")]
    {
        if crate::parallel::should_parallelize(samples.len()) {
            output
                .par_iter_mut()
                .enumerate()
                .for_each(|(n, out)| *out = convolve_at(samples, kernel, n));
            return;
        }
    }
    for (n, out) in output.iter_mut().enumerate() {
        *out = convolve_at(samples, kernel, n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straight transcription of the defining sum, used as an oracle.
    fn reference(samples: &[f64], taps: &[f64], center: usize) -> Vec<f64> {
        let len = samples.len() as isize;
        (0..samples.len())
            .map(|n| {
                let mut sum = 0.0;
                for (k, &t) in taps.iter().enumerate() {
                    let idx = n as isize + k as isize - center as isize;
                    if idx >= 0 && idx < len {
                        sum += samples[idx as usize] * t;
                    }
                }
                sum
            })
            .collect()
    }

    #[test]
    fn kernel_validation() {
        assert_eq!(Kernel::new(vec![], 0), Err(FilterError::EmptyKernel));
        assert_eq!(
            Kernel::new(vec![1.0, 2.0], 2),
            Err(FilterError::KernelCenterOutOfRange { center: 2, len: 2 })
        );
        let k = Kernel::new(vec![1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(k.left_extent(), 3);
        assert_eq!(k.right_extent(), 0);
        assert_eq!(Kernel::centered(vec![1.0; 5]).unwrap().center(), 2);
    }

    #[test]
    fn identity_kernel_is_noop() {
        let x = vec![3.0, -1.0, 4.0, 1.0, -5.0];
        let k = Kernel::new(vec![1.0], 0).unwrap();
        assert_eq!(convolve(&x, &k), x);
    }

    #[test]
    fn edges_are_zero_padded() {
        let x = vec![1.0, 1.0, 1.0, 1.0];
        let k = Kernel::centered(vec![1.0, 1.0, 1.0]).unwrap();
        assert_eq!(convolve(&x, &k), vec![2.0, 3.0, 3.0, 2.0]);
    }

    #[test]
    fn asymmetric_kernel_matches_reference() {
        let x: Vec<f64> = (0..11).map(|i| (i * i) as f64 - 3.0).collect();
        let taps = vec![0.5, -1.0, 2.0, 0.25, 1.5];
        for center in 0..taps.len() {
            let k = Kernel::new(taps.clone(), center).unwrap();
            assert_eq!(convolve(&x, &k), reference(&x, &taps, center));
        }
    }

    #[test]
    fn kernel_longer_than_signal() {
        let x = vec![1.0, 2.0];
        let taps = vec![1.0, 10.0, 100.0, 1000.0, 10000.0];
        let k = Kernel::centered(taps.clone()).unwrap();
        assert_eq!(convolve(&x, &k), reference(&x, &taps, 2));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let k = Kernel::centered(vec![1.0, 1.0, 1.0]).unwrap();
        assert!(convolve(&[], &k).is_empty());
    }
}

#[cfg(all(feature = "internal-tests", test))]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_linear_in_input(
            ref a in proptest::collection::vec(-100.0f64..100.0, 1..64),
            ref taps in proptest::collection::vec(-2.0f64..2.0, 1..9),
            scale in -4.0f64..4.0,
        ) {
            let k = Kernel::centered(taps.clone()).unwrap();
            let scaled: Vec<f64> = a.iter().map(|v| v * scale).collect();
            let lhs = convolve(&scaled, &k);
            let rhs: Vec<f64> = convolve(a, &k).iter().map(|v| v * scale).collect();
            for (l, r) in lhs.iter().zip(rhs.iter()) {
                prop_assert!((l - r).abs() < 1e-9 * (1.0 + r.abs()));
            }
        }
    }
}
