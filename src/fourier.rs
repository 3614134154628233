//! Discrete Fourier transforms of real sample sequences.
//!
//! [`fourier_transform`] is the entry point most callers want: it runs the
//! radix-2 [Cooley–Tukey](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm)
//! [`fft`] when the length is an exact power of two (1 included) and falls
//! back to the direct `O(N²)` [`dft`] otherwise. Both paths share the sign
//! convention `X[k] = Σ x[n]·(cos(2πkn/N) − i·sin(2πkn/N))`, so for
//! `[1, 2, 2, 1]` either one yields `[6, −1−i, 0, −1+i]`.
//!
//! The inverse transforms scale by `1/N`, so `inverse(forward(x))`
//! reproduces `x` up to rounding.

use alloc::vec::Vec;
use core::f64::consts::PI;
use core::fmt;
use libm::{cos, sin};

use crate::num::Complex;

/// Errors returned by the transform routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourierError {
    /// The input contained no samples.
    EmptyInput,
    /// The radix-2 path was requested for a length that is not a power of two.
    NonPowerOfTwo(usize),
}

impl fmt::Display for FourierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FourierError::EmptyInput => write!(f, "input slice is empty"),
            FourierError::NonPowerOfTwo(n) => {
                write!(f, "FFT length must be a power of two, got {}", n)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FourierError {}

/// Algorithm chosen for a given transform length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourierStrategy {
    /// Direct evaluation of the defining sum, `O(N²)`.
    Direct,
    /// Radix-2 decimation in time, `O(N log N)`.
    Radix2,
}

/// `true` for 1, 2, 4, 8, ...; `false` for 0.
#[inline]
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// Strategy [`fourier_transform`] uses for `n` samples.
pub fn plan_strategy(n: usize) -> FourierStrategy {
    if is_power_of_two(n) {
        FourierStrategy::Radix2
    } else {
        FourierStrategy::Direct
    }
}

/// Direct DFT of a real sequence.
pub fn dft(samples: &[f64]) -> Result<Vec<Complex>, FourierError> {
    let n = samples.len();
    if n == 0 {
        return Err(FourierError::EmptyInput);
    }
    let len = n as f64;
    let spectrum = (0..n)
        .map(|k| {
            let mut re = 0.0;
            let mut im = 0.0;
            for (i, &x) in samples.iter().enumerate() {
                let phase = 2.0 * PI * (k * i) as f64 / len;
                re += x * cos(phase);
                im += x * sin(phase);
            }
            Complex::new(re, -im)
        })
        .collect();
    Ok(spectrum)
}

/// Radix-2 FFT of a real sequence whose length is a power of two.
///
/// # Errors
///
/// [`FourierError::NonPowerOfTwo`] for any other length and
/// [`FourierError::EmptyInput`] for an empty slice.
pub fn fft(samples: &[f64]) -> Result<Vec<Complex>, FourierError> {
    let n = samples.len();
    if n == 0 {
        return Err(FourierError::EmptyInput);
    }
    if !is_power_of_two(n) {
        return Err(FourierError::NonPowerOfTwo(n));
    }
    let mut buf: Vec<Complex> = samples.iter().map(|&x| Complex::from_real(x)).collect();
    radix2_in_place(&mut buf);
    Ok(buf)
}

/// Reorder a power-of-two buffer into bit-reversed index order.
///
/// `i` walks the bit-reversed counterpart of `m` (both 1-based) by borrowing
/// from the highest half-bit, so no per-index reversal is ever computed and
/// the whole pass is amortized `O(N)`.
fn bit_reverse_permute(buf: &mut [Complex]) {
    let n = buf.len();
    let mut i = 1usize;
    for m in 1..n.saturating_sub(1) {
        if m < i {
            buf.swap(m - 1, i - 1);
        }
        let mut half = n >> 1;
        while half < i {
            i -= half;
            half >>= 1;
        }
        i += half;
    }
}

/// In-place decimation-in-time butterfly network on a power-of-two buffer.
fn radix2_in_place(buf: &mut [Complex]) {
    let n = buf.len();
    bit_reverse_permute(buf);

    let mut stage_count = 0;
    let mut step = n;
    while step > 1 {
        step >>= 1;
        stage_count += 1;
    }

    for stage in 0..stage_count {
        let group = 1usize << stage;
        let w = Complex::new(cos(PI / group as f64), -sin(PI / group as f64));
        let mut twiddle = Complex::ONE;
        for m in 0..group {
            let mut k = m;
            while k < n {
                let t = buf[k + group].mul(twiddle);
                buf[k + group] = buf[k].sub(t);
                buf[k] = buf[k].add(t);
                k += group << 1;
            }
            twiddle = twiddle.mul(w);
        }
    }
}

/// Forward transform, FFT for power-of-two lengths and DFT otherwise.
pub fn fourier_transform(samples: &[f64]) -> Result<Vec<Complex>, FourierError> {
    let strategy = plan_strategy(samples.len());
    debug_log!(
        "fourier_transform: len={} strategy={:?}",
        samples.len(),
        strategy
    );
    match strategy {
        FourierStrategy::Radix2 => fft(samples),
        FourierStrategy::Direct => dft(samples),
    }
}

/// Direct inverse DFT, `x[n] = (1/N) Σ X[k]·e^{+i2πkn/N}`.
pub fn inverse_dft(spectrum: &[Complex]) -> Result<Vec<Complex>, FourierError> {
    let n = spectrum.len();
    if n == 0 {
        return Err(FourierError::EmptyInput);
    }
    let len = n as f64;
    let scale = 1.0 / len;
    let samples = (0..n)
        .map(|i| {
            let mut acc = Complex::ZERO;
            for (k, &bin) in spectrum.iter().enumerate() {
                let phase = 2.0 * PI * (k * i) as f64 / len;
                acc = acc.add(bin.mul(Complex::expi(phase)));
            }
            acc.scale(scale)
        })
        .collect();
    Ok(samples)
}

/// Radix-2 inverse FFT. Conjugates, runs the forward butterflies, then
/// conjugates and scales by `1/N`.
pub fn inverse_fft(spectrum: &[Complex]) -> Result<Vec<Complex>, FourierError> {
    let n = spectrum.len();
    if n == 0 {
        return Err(FourierError::EmptyInput);
    }
    if !is_power_of_two(n) {
        return Err(FourierError::NonPowerOfTwo(n));
    }
    let mut buf: Vec<Complex> = spectrum.iter().map(|c| c.conj()).collect();
    radix2_in_place(&mut buf);
    let scale = 1.0 / n as f64;
    for c in buf.iter_mut() {
        *c = c.conj().scale(scale);
    }
    Ok(buf)
}

/// Inverse transform with the same dispatch rule as [`fourier_transform`].
pub fn inverse_fourier_transform(spectrum: &[Complex]) -> Result<Vec<Complex>, FourierError> {
    let strategy = plan_strategy(spectrum.len());
    debug_log!(
        "inverse_fourier_transform: len={} strategy={:?}",
        spectrum.len(),
        strategy
    );
    match strategy {
        FourierStrategy::Radix2 => inverse_fft(spectrum),
        FourierStrategy::Direct => inverse_dft(spectrum),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn assert_close(a: &[Complex], b: &[Complex], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x.re - y.re).abs() < tol, "re: {} vs {}", x.re, y.re);
            assert!((x.im - y.im).abs() < tol, "im: {} vs {}", x.im, y.im);
        }
    }

    #[test]
    fn bit_reversal_order() {
        let mut buf: Vec<Complex> = (0..8).map(|i| Complex::from_real(i as f64)).collect();
        bit_reverse_permute(&mut buf);
        let order: Vec<f64> = buf.iter().map(|c| c.re).collect();
        assert_eq!(order, vec![0.0, 4.0, 2.0, 6.0, 1.0, 5.0, 3.0, 7.0]);

        let mut buf: Vec<Complex> = (0..16).map(|i| Complex::from_real(i as f64)).collect();
        bit_reverse_permute(&mut buf);
        let order: Vec<usize> = buf.iter().map(|c| c.re as usize).collect();
        let expected: Vec<usize> = (0..16usize).map(|i| i.reverse_bits() >> (usize::BITS - 4)).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn worked_example() {
        let expected = [
            Complex::new(6.0, 0.0),
            Complex::new(-1.0, -1.0),
            Complex::new(0.0, 0.0),
            Complex::new(-1.0, 1.0),
        ];
        let x = [1.0, 2.0, 2.0, 1.0];
        assert_close(&dft(&x).unwrap(), &expected, 1e-12);
        assert_close(&fft(&x).unwrap(), &expected, 1e-12);
    }

    #[test]
    fn single_sample_is_identity() {
        assert_eq!(fft(&[2.5]).unwrap(), vec![Complex::new(2.5, 0.0)]);
        assert_eq!(dft(&[2.5]).unwrap(), vec![Complex::new(2.5, 0.0)]);
    }

    #[test]
    fn fft_rejects_non_power_of_two() {
        assert_eq!(fft(&[1.0; 6]), Err(FourierError::NonPowerOfTwo(6)));
        assert_eq!(fft(&[]), Err(FourierError::EmptyInput));
        assert_eq!(dft(&[]), Err(FourierError::EmptyInput));
    }

    #[test]
    fn strategy_follows_length() {
        assert_eq!(plan_strategy(1), FourierStrategy::Radix2);
        assert_eq!(plan_strategy(64), FourierStrategy::Radix2);
        assert_eq!(plan_strategy(0), FourierStrategy::Direct);
        assert_eq!(plan_strategy(100), FourierStrategy::Direct);
    }

    #[test]
    fn inverse_recovers_input() {
        let x = [0.5, -1.0, 3.0, 2.0, 0.0, 1.0, -2.0, 4.0];
        let back = inverse_fft(&fft(&x).unwrap()).unwrap();
        for (a, b) in back.iter().zip(x.iter()) {
            assert!((a.re - b).abs() < 1e-12);
            assert!(a.im.abs() < 1e-12);
        }
        let y = [1.0, 2.0, 3.0];
        let back = inverse_dft(&dft(&y).unwrap()).unwrap();
        for (a, b) in back.iter().zip(y.iter()) {
            assert!((a.re - b).abs() < 1e-12);
            assert!(a.im.abs() < 1e-12);
        }
    }
}

#[cfg(all(feature = "internal-tests", test))]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn fft_matches_dft_random_seeded() {
        let mut rng = StdRng::seed_from_u64(42);
        for log2 in 0..10 {
            let n = 1usize << log2;
            let x: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
            let fast = fft(&x).unwrap();
            let slow = dft(&x).unwrap();
            for (a, b) in fast.iter().zip(slow.iter()) {
                let tol = 1e-9 * (1.0 + b.norm());
                assert!((a.re - b.re).abs() < tol, "n={} re {} vs {}", n, a.re, b.re);
                assert!((a.im - b.im).abs() < tol, "n={} im {} vs {}", n, a.im, b.im);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_fft_ifft_roundtrip(
            len in proptest::sample::select(alloc::vec![1usize, 2, 4, 8, 16, 32]),
            ref signal in proptest::collection::vec(-1000.0f64..1000.0, 32),
        ) {
            let x = &signal[..len];
            let back = inverse_fourier_transform(&fourier_transform(x).unwrap()).unwrap();
            for (a, b) in back.iter().zip(x.iter()) {
                prop_assert!((a.re - b).abs() < 1e-8);
            }
        }
    }
}
