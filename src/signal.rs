//! Owned sample sequence with a sampling frequency.
//!
//! [`Signal`] is the type most callers work with. It owns its buffer
//! exclusively and forwards to [`crate::fourier`], [`crate::window`] and
//! [`crate::smoothing`]. Mutating operations validate their arguments first
//! and only then replace the buffer, so a failed call leaves the signal
//! untouched.

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::PI;
use core::fmt;
use core::ops::{Index, IndexMut};
use libm::{sin, sqrt};

use crate::convolution::{convolve, Kernel};
use crate::fourier::{self, FourierError};
use crate::num::Complex;
use crate::smoothing::{self, FilterError};
use crate::window::{self, WindowError, WindowShape};

/// Errors raised by [`Signal`] operations that are not plain forwards to a
/// transform, window or filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalError {
    /// A sample index was past the end of the signal.
    IndexOutOfRange { index: usize, len: usize },
    /// Frequency, amplitude and phase lists differ in length.
    MismatchedLengths,
    /// A tone mixture needs at least one component.
    EmptyToneSet,
    /// The operation maps samples to time and needs a sampling frequency.
    SamplingFrequencyUnset,
    /// Sampling frequencies must be finite and non-negative.
    InvalidSamplingFrequency(f64),
    Filter(FilterError),
    Fourier(FourierError),
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalError::IndexOutOfRange { index, len } => {
                write!(f, "index {} is out of range for {} samples", index, len)
            }
            SignalError::MismatchedLengths => write!(
                f,
                "frequency, amplitude and phase lists must have the same length"
            ),
            SignalError::EmptyToneSet => write!(f, "at least one tone is required"),
            SignalError::SamplingFrequencyUnset => write!(f, "sampling frequency is not set"),
            SignalError::InvalidSamplingFrequency(fs) => write!(
                f,
                "sampling frequency must be finite and non-negative, got {}",
                fs
            ),
            SignalError::Filter(e) => write!(f, "{}", e),
            SignalError::Fourier(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SignalError {}

impl From<FilterError> for SignalError {
    fn from(e: FilterError) -> Self {
        SignalError::Filter(e)
    }
}

impl From<FourierError> for SignalError {
    fn from(e: FourierError) -> Self {
        SignalError::Fourier(e)
    }
}

/// A finite sequence of `f64` samples taken at `sampling_frequency` Hz.
///
/// A sampling frequency of `0.0` means "unset"; operations that map samples
/// to time or frequency report [`SignalError::SamplingFrequencyUnset`] or
/// return `None` until one is provided.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sampling_frequency: f64,
}

impl Signal {
    /// `len` zero samples with no sampling frequency.
    pub fn new(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
            sampling_frequency: 0.0,
        }
    }

    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self {
            samples,
            sampling_frequency: 0.0,
        }
    }

    /// Builder-style variant of [`Signal::set_sampling_frequency`].
    pub fn with_sampling_frequency(mut self, hz: f64) -> Result<Self, SignalError> {
        self.set_sampling_frequency(hz)?;
        Ok(self)
    }

    /// Real part of the inverse transform of `spectrum`.
    pub fn from_spectrum(spectrum: &[Complex], sampling_frequency: f64) -> Result<Self, SignalError> {
        let time = fourier::inverse_fourier_transform(spectrum)?;
        Self::from_samples(time.iter().map(|c| c.re).collect())
            .with_sampling_frequency(sampling_frequency)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    pub fn iter(&self) -> core::slice::Iter<'_, f64> {
        self.samples.iter()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.samples.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<(), SignalError> {
        let len = self.samples.len();
        match self.samples.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SignalError::IndexOutOfRange { index, len }),
        }
    }

    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    /// Set the sampling frequency in Hz; `0.0` clears it.
    pub fn set_sampling_frequency(&mut self, hz: f64) -> Result<(), SignalError> {
        if !hz.is_finite() || hz < 0.0 {
            return Err(SignalError::InvalidSamplingFrequency(hz));
        }
        self.sampling_frequency = hz;
        Ok(())
    }

    /// Time in seconds of sample `index`.
    pub fn sample_time(&self, index: usize) -> Option<f64> {
        if self.sampling_frequency > 0.0 {
            Some(index as f64 / self.sampling_frequency)
        } else {
            None
        }
    }

    /// Frequency in Hz of spectrum bin `bin` for a transform of this signal.
    /// Bins above `len / 2` alias to negative frequencies.
    pub fn bin_frequency(&self, bin: usize) -> Option<f64> {
        if self.sampling_frequency > 0.0 && !self.samples.is_empty() {
            Some(bin as f64 * self.sampling_frequency / self.samples.len() as f64)
        } else {
            None
        }
    }

    /// `true` for lengths 1, 2, 4, 8, ...
    pub fn is_length_power_of_two(&self) -> bool {
        fourier::is_power_of_two(self.samples.len())
    }

    pub fn max_value(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::max)
    }

    pub fn min_value(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::min)
    }

    /// Peak-to-peak range, `max - min`.
    pub fn amplitude(&self) -> Option<f64> {
        Some(self.max_value()? - self.min_value()?)
    }

    /// Root mean square.
    pub fn rms(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum_sq: f64 = self.samples.iter().map(|x| x * x).sum();
        Some(sqrt(sum_sq / self.samples.len() as f64))
    }

    /// Truncate or zero-extend to `len` samples.
    pub fn resize(&mut self, len: usize) {
        self.samples.resize(len, 0.0);
    }

    /// Zero-extend to the next power of two. Lengths that already are one,
    /// and empty signals, are left alone.
    pub fn resize_to_next_power_of_two(&mut self) {
        if self.samples.is_empty() {
            return;
        }
        let len = self.samples.len().next_power_of_two();
        self.resize(len);
    }

    /// Resize to whichever neighbouring power of two is closer, preferring
    /// the larger one on a tie.
    pub fn resize_to_nearest_power_of_two(&mut self) {
        let len = self.samples.len();
        if len == 0 {
            return;
        }
        let up = len.next_power_of_two();
        let down = if up == len { len } else { up >> 1 };
        let target = if len - down < up - len { down } else { up };
        debug_log!("resize_to_nearest_power_of_two: {} -> {}", len, target);
        self.resize(target);
    }

    /// Append one sample.
    pub fn push(&mut self, value: f64) {
        self.samples.push(value);
    }

    /// Drop every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Independent copy, sampling frequency included.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Set every sample to zero.
    pub fn zero(&mut self) {
        self.samples.fill(0.0);
    }

    /// Unit impulse at `offset`.
    pub fn dirac_delta(&mut self, offset: usize) -> Result<(), SignalError> {
        let len = self.samples.len();
        if offset >= len {
            return Err(SignalError::IndexOutOfRange { index: offset, len });
        }
        self.zero();
        self.samples[offset] = 1.0;
        Ok(())
    }

    /// Constant level `amplitude`.
    pub fn generate_dc(&mut self, amplitude: f64) {
        self.samples.fill(amplitude);
    }

    /// Sum of sines `Σ a_i·sin(φ_i + 2π f_i n / fs)`.
    ///
    /// # Errors
    ///
    /// [`SignalError::MismatchedLengths`] and [`SignalError::EmptyToneSet`]
    /// for malformed tone lists, [`SignalError::SamplingFrequencyUnset`]
    /// when no sampling frequency is set.
    pub fn generate_sine(
        &mut self,
        frequencies: &[f64],
        amplitudes: &[f64],
        phases: &[f64],
    ) -> Result<(), SignalError> {
        if frequencies.len() != amplitudes.len() || frequencies.len() != phases.len() {
            return Err(SignalError::MismatchedLengths);
        }
        if frequencies.is_empty() {
            return Err(SignalError::EmptyToneSet);
        }
        if self.sampling_frequency <= 0.0 {
            return Err(SignalError::SamplingFrequencyUnset);
        }
        let fs = self.sampling_frequency;
        for (n, sample) in self.samples.iter_mut().enumerate() {
            *sample = frequencies
                .iter()
                .zip(amplitudes)
                .zip(phases)
                .map(|((&f, &a), &p)| a * sin(p + 2.0 * PI * f * n as f64 / fs))
                .sum();
        }
        Ok(())
    }

    /// Single sine tone.
    pub fn generate_tone(
        &mut self,
        frequency: f64,
        amplitude: f64,
        phase: f64,
    ) -> Result<(), SignalError> {
        self.generate_sine(&[frequency], &[amplitude], &[phase])
    }

    /// Add `offset` to every sample.
    pub fn offset(&mut self, offset: f64) {
        self.samples.iter_mut().for_each(|x| *x += offset);
    }

    /// Multiply every sample by `factor`.
    pub fn amplify(&mut self, factor: f64) {
        self.samples.iter_mut().for_each(|x| *x *= factor);
    }

    /// Sample-wise sum. The result is as long as the longer operand; the
    /// shorter one repeats cyclically. Keeps this signal's sampling frequency.
    pub fn add(&self, other: &Signal) -> Signal {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return Signal {
                samples: other.samples.clone(),
                sampling_frequency: self.sampling_frequency,
            };
        }
        let (a, b) = (self.samples.len(), other.samples.len());
        let samples = (0..a.max(b))
            .map(|n| self.samples[n % a] + other.samples[n % b])
            .collect();
        Signal {
            samples,
            sampling_frequency: self.sampling_frequency,
        }
    }

    /// Filter this signal with `kernel`'s samples as a centered convolution
    /// kernel. The result has this signal's length.
    pub fn convolve_with(&self, kernel: &Signal) -> Result<Signal, SignalError> {
        let kernel = Kernel::centered(kernel.samples.clone())?;
        Ok(Signal {
            samples: convolve(&self.samples, &kernel),
            sampling_frequency: self.sampling_frequency,
        })
    }

    pub fn discrete_fourier_transform(&self) -> Result<Vec<Complex>, FourierError> {
        fourier::dft(&self.samples)
    }

    pub fn fast_fourier_transform(&self) -> Result<Vec<Complex>, FourierError> {
        fourier::fft(&self.samples)
    }

    /// FFT when the length is a power of two, DFT otherwise.
    pub fn fourier_transform(&self) -> Result<Vec<Complex>, FourierError> {
        fourier::fourier_transform(&self.samples)
    }

    /// Replace the samples with the real part of the inverse transform of
    /// `spectrum`. The length follows the spectrum.
    pub fn inverse_fourier_transform(&mut self, spectrum: &[Complex]) -> Result<(), FourierError> {
        self.commit_real(fourier::inverse_fourier_transform(spectrum)?);
        Ok(())
    }

    /// Like [`Signal::inverse_fourier_transform`] but always direct.
    pub fn inverse_discrete_fourier_transform(
        &mut self,
        spectrum: &[Complex],
    ) -> Result<(), FourierError> {
        self.commit_real(fourier::inverse_dft(spectrum)?);
        Ok(())
    }

    /// Like [`Signal::inverse_fourier_transform`] but always radix-2.
    pub fn inverse_fast_fourier_transform(
        &mut self,
        spectrum: &[Complex],
    ) -> Result<(), FourierError> {
        self.commit_real(fourier::inverse_fft(spectrum)?);
        Ok(())
    }

    fn commit_real(&mut self, time: Vec<Complex>) {
        self.samples = time.iter().map(|c| c.re).collect();
    }

    /// Overwrite the samples with a window as wide as the signal.
    pub fn generate_window(&mut self, shape: WindowShape, parameter: f64) -> Result<(), WindowError> {
        window::generate_into(&mut self.samples, shape, parameter)
    }

    pub fn moving_average(&mut self, kernel_size: usize) -> Result<(), FilterError> {
        self.samples = smoothing::moving_average(&self.samples, kernel_size)?;
        Ok(())
    }

    pub fn first_derivative(&mut self) {
        self.samples = smoothing::first_derivative(&self.samples);
    }

    pub fn second_derivative(&mut self) {
        self.samples = smoothing::second_derivative(&self.samples);
    }

    pub fn savitzky_golay(
        &mut self,
        kernel_size: usize,
        order: usize,
        derivative: usize,
    ) -> Result<(), FilterError> {
        self.samples = smoothing::savitzky_golay(&self.samples, kernel_size, order, derivative)?;
        Ok(())
    }

    pub fn savitzky_golay_asymmetric(
        &mut self,
        left: usize,
        right: usize,
        order: usize,
        derivative: usize,
    ) -> Result<(), FilterError> {
        self.samples =
            smoothing::savitzky_golay_asymmetric(&self.samples, left, right, order, derivative)?;
        Ok(())
    }

    pub fn simple_exponential_smoothing(&mut self, alpha: f64) -> Result<(), FilterError> {
        self.samples = smoothing::simple_exponential(&self.samples, alpha)?;
        Ok(())
    }

    pub fn linear_exponential_smoothing(
        &mut self,
        level_factor: f64,
        trend_factor: f64,
    ) -> Result<(), FilterError> {
        self.samples = smoothing::linear_exponential(&self.samples, level_factor, trend_factor)?;
        Ok(())
    }
}

impl From<Vec<f64>> for Signal {
    fn from(samples: Vec<f64>) -> Self {
        Self::from_samples(samples)
    }
}

impl Index<usize> for Signal {
    type Output = f64;
    fn index(&self, index: usize) -> &f64 {
        &self.samples[index]
    }
}

impl IndexMut<usize> for Signal {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.samples[index]
    }
}

impl<'a> IntoIterator for &'a Signal {
    type Item = &'a f64;
    type IntoIter = core::slice::Iter<'a, f64>;
    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed() {
        let s = Signal::new(5);
        assert_eq!(s.len(), 5);
        assert!(s.iter().all(|&x| x == 0.0));
        assert_eq!(s.sampling_frequency(), 0.0);
        assert!(Signal::new(0).is_empty());
    }

    #[test]
    fn checked_access() {
        let mut s = Signal::new(3);
        s.set(1, 4.0).unwrap();
        assert_eq!(s.get(1), Some(4.0));
        assert_eq!(s.get(3), None);
        assert_eq!(
            s.set(3, 1.0),
            Err(SignalError::IndexOutOfRange { index: 3, len: 3 })
        );
        s[2] = -1.0;
        assert_eq!(s[2], -1.0);
    }

    #[test]
    fn statistics() {
        let s = Signal::from_samples(vec![1.0, -3.0, 2.0, 0.0]);
        assert_eq!(s.max_value(), Some(2.0));
        assert_eq!(s.min_value(), Some(-3.0));
        assert_eq!(s.amplitude(), Some(5.0));
        assert!((s.rms().unwrap() - (14.0f64 / 4.0).sqrt()).abs() < 1e-12);
        let empty = Signal::new(0);
        assert_eq!(empty.max_value(), None);
        assert_eq!(empty.rms(), None);
        assert_eq!(empty.amplitude(), None);
    }

    #[test]
    fn sampling_frequency_validation() {
        let mut s = Signal::new(4);
        assert_eq!(
            s.set_sampling_frequency(-1.0),
            Err(SignalError::InvalidSamplingFrequency(-1.0))
        );
        assert!(s.set_sampling_frequency(f64::INFINITY).is_err());
        assert_eq!(s.sample_time(2), None);
        s.set_sampling_frequency(8.0).unwrap();
        assert_eq!(s.sample_time(2), Some(0.25));
        assert_eq!(s.bin_frequency(1), Some(2.0));
    }

    #[test]
    fn add_returns_the_sum() {
        let a = Signal::from_samples(vec![1.0, 2.0, 3.0, 4.0]);
        let b = Signal::from_samples(vec![10.0, 20.0]);
        let sum = a.add(&b);
        assert_eq!(sum.samples(), &[11.0, 22.0, 13.0, 24.0]);
        assert_eq!(b.add(&a).samples(), &[11.0, 22.0, 13.0, 24.0]);
        assert_eq!(a.add(&Signal::new(0)), a);
    }

    #[test]
    fn convolve_with_identity() {
        let a = Signal::from_samples(vec![1.0, 2.0, 3.0]);
        let id = Signal::from_samples(vec![0.0, 1.0, 0.0]);
        assert_eq!(a.convolve_with(&id).unwrap(), a);
        assert_eq!(
            a.convolve_with(&Signal::new(0)),
            Err(SignalError::Filter(FilterError::EmptyKernel))
        );
    }

    #[test]
    fn inverse_forwards_pick_their_path() {
        let x = Signal::from_samples(vec![1.0, 2.0, 2.0, 1.0]);
        let spectrum = x.discrete_fourier_transform().unwrap();

        let mut direct = Signal::new(0);
        direct.inverse_discrete_fourier_transform(&spectrum).unwrap();
        let mut fast = Signal::new(0);
        fast.inverse_fast_fourier_transform(&spectrum).unwrap();
        for (a, b) in direct.iter().zip(fast.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
        for (a, b) in direct.iter().zip(x.iter()) {
            assert!((a - b).abs() < 1e-12);
        }

        let odd = Signal::from_samples(vec![1.0, 2.0, 3.0]).discrete_fourier_transform().unwrap();
        let mut s = Signal::from_samples(vec![9.0; 2]);
        assert_eq!(
            s.inverse_fast_fourier_transform(&odd),
            Err(FourierError::NonPowerOfTwo(3))
        );
        assert_eq!(s.samples(), &[9.0, 9.0]);
        s.inverse_discrete_fourier_transform(&odd).unwrap();
        assert_eq!(s.len(), 3);
        assert!((s[2] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn failed_filter_leaves_samples() {
        let mut s = Signal::from_samples(vec![1.0, 2.0, 3.0]);
        assert!(s.moving_average(2).is_err());
        assert!(s.simple_exponential_smoothing(2.0).is_err());
        assert!(s.generate_window(WindowShape::Tukey, 0.0).is_err());
        assert_eq!(s.samples(), &[1.0, 2.0, 3.0]);
    }
}
