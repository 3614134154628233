//! # sigkit - discrete-signal transform and filtering toolkit
//!
//! Compute spectra, generate analysis windows and apply convolution-backed
//! smoothing to finite sequences of `f64` samples.
//!
//! ## Features
//!
//! - **Fourier dispatch**: radix-2 FFT for power-of-two lengths, direct DFT
//!   for everything else, plus the matching inverse transforms
//! - **Window functions**: 16 closed-form analysis windows (Hann, Hamming,
//!   Blackman family, Kaiser, Gauss, Poisson, Lanczos, ...) behind a fixed
//!   dispatch table
//! - **Convolution engine** with arbitrary kernel center and implicit zero
//!   padding at the edges
//! - **Smoothing**: moving average, finite-difference derivatives,
//!   Savitzky-Golay (symmetric and asymmetric), simple and Holt exponential
//!   smoothing
//! - **`Signal` container** tying it all together with resize utilities,
//!   tone/impulse generators and basic statistics
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` impls and the standard library
//! - `parallel`: rayon-backed window generation and convolution for long inputs
//! - `verbose-logging`: emit dispatch decisions through the `log` facade
//! - `internal-tests`: property tests for the unit test suites
//!
//! ## Example
//!
//! ```
//! use sigkit::{Signal, WindowShape};
//!
//! let mut signal = Signal::from_samples(vec![1.0, 2.0, 2.0, 1.0]);
//! let spectrum = signal.fourier_transform().unwrap();
//! assert!((spectrum[0].re - 6.0).abs() < 1e-12);
//!
//! signal.generate_window(WindowShape::Hann, 0.0).unwrap();
//! assert!(signal[0].abs() < 1e-12);
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Log through the `log` facade when `verbose-logging` is enabled.
/// Expands to nothing otherwise so call sites carry no cost.
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            log::debug!($($arg)*);
        }
    };
}

macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            log::trace!($($arg)*);
        }
    };
}

/// Complex value type returned by the Fourier transforms.
pub mod num;

/// Factorial, modified Bessel I0 and normalized sinc.
pub mod special;

/// Dense matrix capability used to derive Savitzky-Golay kernels.
pub mod linalg;

/// Discrete convolution with configurable kernel center.
pub mod convolution;

/// Forward and inverse Fourier transforms with FFT/DFT dispatch.
pub mod fourier;

/// Analysis window generator.
pub mod window;

/// Smoothing and derivative filters.
pub mod smoothing;

/// The `Signal` sample container.
pub mod signal;

/// Length thresholds and thread counts for the rayon code paths.
#[cfg(feature = "parallel")]
pub mod parallel;

pub use convolution::{convolve, Kernel};
pub use fourier::{FourierError, FourierStrategy};
pub use linalg::DenseMatrix;
pub use num::Complex;
pub use signal::{Signal, SignalError};
pub use smoothing::FilterError;
pub use special::MathError;
pub use window::{WindowError, WindowShape};
