//! Analysis window functions.
//!
//! Each [`WindowShape`] maps to a closed-form expression of the sample index
//! `n`, the window width `W` and an optional shape parameter. The mapping is a
//! fixed table built at compile time and indexed by the shape's discriminant,
//! so lookup is a single array access and the table is never mutated.
//!
//! All formulas divide by `W - 1` or `W`, hence windows need at least two
//! samples. Samples are independent of each other and may be computed in any
//! order; with the `parallel` feature long windows are filled by rayon.

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::PI;
use core::fmt;
use libm::{cos, exp, fabs, sqrt};

use crate::special::{bessel_i0, sinc};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Smallest width any window formula is defined for.
pub const MIN_WIDTH: usize = 2;

/// Gauss σ, as a fraction of the half width, when the parameter is unset.
const GAUSS_DEFAULT_SIGMA: f64 = 0.4;
/// Kaiser α (β = π·α) when the parameter is unset.
const KAISER_DEFAULT_ALPHA: f64 = 3.0;
/// Decay in dB reached at the window edge by the default Poisson time constant.
const POISSON_DEFAULT_DECAY_DB: f64 = 60.0;
/// dB per neper, `20·log10(e)`.
const DB_PER_NEPER: f64 = 8.69;

const HAMMING: [f64; 2] = [0.53836, 0.46164];
const BLACKMAN: [f64; 3] = [0.42, 0.5, 0.08];
const NUTTALL: [f64; 4] = [0.355768, 0.487396, 0.144232, 0.012604];
const BLACKMAN_HARRIS: [f64; 4] = [0.35875, 0.48829, 0.14128, 0.01168];
const BLACKMAN_NUTTALL: [f64; 4] = [0.3635819, 0.4891775, 0.1365995, 0.0106411];
const FLAT_TOP: [f64; 5] = [1.0, 1.93, 1.29, 0.388, 0.032];

/// Named window shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowShape {
    Rectangular,
    /// Parameter: σ as a fraction of the half width (default 0.4).
    Gauss,
    /// Recognized but not implemented; generation fails.
    Tukey,
    Hamming,
    Hann,
    Bartlett,
    Triangular,
    BartlettHann,
    Blackman,
    /// Parameter: α, with β = π·α (default 3.0).
    Kaiser,
    Nuttall,
    BlackmanHarris,
    BlackmanNuttall,
    FlatTop,
    /// Parameter: decay time constant in samples (default: 60 dB at the edge).
    Poisson,
    /// Same curve as [`WindowShape::Poisson`].
    Exponential,
    Lanczos,
}

impl WindowShape {
    /// Every shape, in discriminant order.
    pub const ALL: [WindowShape; 17] = [
        WindowShape::Rectangular,
        WindowShape::Gauss,
        WindowShape::Tukey,
        WindowShape::Hamming,
        WindowShape::Hann,
        WindowShape::Bartlett,
        WindowShape::Triangular,
        WindowShape::BartlettHann,
        WindowShape::Blackman,
        WindowShape::Kaiser,
        WindowShape::Nuttall,
        WindowShape::BlackmanHarris,
        WindowShape::BlackmanNuttall,
        WindowShape::FlatTop,
        WindowShape::Poisson,
        WindowShape::Exponential,
        WindowShape::Lanczos,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WindowShape::Rectangular => "rectangular",
            WindowShape::Gauss => "gauss",
            WindowShape::Tukey => "tukey",
            WindowShape::Hamming => "hamming",
            WindowShape::Hann => "hann",
            WindowShape::Bartlett => "bartlett",
            WindowShape::Triangular => "triangular",
            WindowShape::BartlettHann => "bartlett-hann",
            WindowShape::Blackman => "blackman",
            WindowShape::Kaiser => "kaiser",
            WindowShape::Nuttall => "nuttall",
            WindowShape::BlackmanHarris => "blackman-harris",
            WindowShape::BlackmanNuttall => "blackman-nuttall",
            WindowShape::FlatTop => "flat-top",
            WindowShape::Poisson => "poisson",
            WindowShape::Exponential => "exponential",
            WindowShape::Lanczos => "lanczos",
        }
    }

    /// Whether [`generate`] can produce this shape.
    pub fn is_implemented(self) -> bool {
        WINDOW_TABLE[self as usize].is_some()
    }
}

impl fmt::Display for WindowShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised by window generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// Fewer than [`MIN_WIDTH`] samples were requested.
    TooShort(usize),
    /// The shape is recognized but has no formula.
    NotImplemented(WindowShape),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::TooShort(w) => write!(
                f,
                "window width must be at least {} samples, got {}",
                MIN_WIDTH, w
            ),
            WindowError::NotImplemented(shape) => {
                write!(f, "{} window is not implemented", shape)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WindowError {}

/// Evaluates sample `n` of a window of `width` samples.
pub type WindowFn = fn(n: usize, width: usize, parameter: f64) -> f64;

/// Shape → formula, indexed by `WindowShape as usize`.
static WINDOW_TABLE: [Option<WindowFn>; 17] = [
    Some(rectangular),
    Some(gauss),
    None,
    Some(hamming),
    Some(hann),
    Some(bartlett),
    Some(triangular),
    Some(bartlett_hann),
    Some(blackman),
    Some(kaiser),
    Some(nuttall),
    Some(blackman_harris),
    Some(blackman_nuttall),
    Some(flat_top),
    Some(poisson),
    Some(poisson),
    Some(lanczos),
];

/// Generalized cosine sum `Σ_j (−1)^j a_j cos(2πjn/(W−1))`.
#[inline]
fn cosine_sum(coeffs: &[f64], n: usize, width: usize) -> f64 {
    let x = 2.0 * PI * n as f64 / (width - 1) as f64;
    coeffs
        .iter()
        .enumerate()
        .map(|(j, &a)| {
            let term = a * cos(j as f64 * x);
            if j % 2 == 0 {
                term
            } else {
                -term
            }
        })
        .sum()
}

fn rectangular(_n: usize, _width: usize, _parameter: f64) -> f64 {
    1.0
}

fn gauss(n: usize, width: usize, parameter: f64) -> f64 {
    let sigma = if parameter == 0.0 {
        GAUSS_DEFAULT_SIGMA
    } else {
        parameter
    };
    let m = (width - 1) as f64;
    let r = (n as f64 - m / 2.0) / (sigma * m / 2.0);
    exp(-0.5 * r * r)
}

fn hamming(n: usize, width: usize, _parameter: f64) -> f64 {
    cosine_sum(&HAMMING, n, width)
}

fn hann(n: usize, width: usize, _parameter: f64) -> f64 {
    0.5 * (1.0 - cos(2.0 * PI * n as f64 / (width - 1) as f64))
}

fn bartlett(n: usize, width: usize, _parameter: f64) -> f64 {
    let m = (width - 1) as f64;
    (2.0 / m) * (m / 2.0 - fabs(n as f64 - m / 2.0))
}

fn triangular(n: usize, width: usize, _parameter: f64) -> f64 {
    let w = width as f64;
    let m = (width - 1) as f64;
    (2.0 / w) * (w / 2.0 - fabs(n as f64 - m / 2.0))
}

fn bartlett_hann(n: usize, width: usize, _parameter: f64) -> f64 {
    let m = (width - 1) as f64;
    let x = n as f64 / m;
    0.62 - 0.48 * fabs(x - 0.5) - 0.38 * cos(2.0 * PI * x)
}

fn blackman(n: usize, width: usize, _parameter: f64) -> f64 {
    cosine_sum(&BLACKMAN, n, width)
}

fn kaiser(n: usize, width: usize, parameter: f64) -> f64 {
    let alpha = if parameter == 0.0 {
        KAISER_DEFAULT_ALPHA
    } else {
        parameter
    };
    let pi_alpha = PI * alpha;
    let r = 2.0 * n as f64 / (width - 1) as f64 - 1.0;
    // Rounding can push r² a hair above 1 at the edges.
    let b = sqrt((1.0 - r * r).max(0.0));
    bessel_i0(pi_alpha * b) / bessel_i0(pi_alpha)
}

fn nuttall(n: usize, width: usize, _parameter: f64) -> f64 {
    cosine_sum(&NUTTALL, n, width)
}

fn blackman_harris(n: usize, width: usize, _parameter: f64) -> f64 {
    cosine_sum(&BLACKMAN_HARRIS, n, width)
}

fn blackman_nuttall(n: usize, width: usize, _parameter: f64) -> f64 {
    cosine_sum(&BLACKMAN_NUTTALL, n, width)
}

fn flat_top(n: usize, width: usize, _parameter: f64) -> f64 {
    cosine_sum(&FLAT_TOP, n, width)
}

fn poisson(n: usize, width: usize, parameter: f64) -> f64 {
    let tau = if parameter <= 0.0 {
        width as f64 / 2.0 * DB_PER_NEPER / POISSON_DEFAULT_DECAY_DB
    } else {
        parameter
    };
    let m = (width - 1) as f64;
    exp(-fabs(n as f64 - m / 2.0) / tau)
}

fn lanczos(n: usize, width: usize, _parameter: f64) -> f64 {
    sinc(2.0 * n as f64 / (width - 1) as f64 - 1.0)
}

/// Formula for `shape`, validated against `width`.
fn lookup(shape: WindowShape, width: usize) -> Result<WindowFn, WindowError> {
    if width < MIN_WIDTH {
        debug_log!("window {} rejected: width {}", shape, width);
        return Err(WindowError::TooShort(width));
    }
    WINDOW_TABLE[shape as usize].ok_or(WindowError::NotImplemented(shape))
}

/// Value of sample `n` of a `width`-sample window.
///
/// `n` outside `0..width` is evaluated as-is by the formula.
pub fn evaluate(
    shape: WindowShape,
    n: usize,
    width: usize,
    parameter: f64,
) -> Result<f64, WindowError> {
    let f = lookup(shape, width)?;
    Ok(f(n, width, parameter))
}

/// Generate a `width`-sample window.
///
/// `parameter` is shape-specific; pass `0.0` for the documented default.
pub fn generate(
    shape: WindowShape,
    width: usize,
    parameter: f64,
) -> Result<Vec<f64>, WindowError> {
    let f = lookup(shape, width)?;
    let mut out = vec![0.0; width];
    fill(&mut out, f, parameter);
    Ok(out)
}

/// Overwrite `out` with a window as wide as the slice.
///
/// Nothing is written when an error is returned.
pub fn generate_into(
    out: &mut [f64],
    shape: WindowShape,
    parameter: f64,
) -> Result<(), WindowError> {
    let f = lookup(shape, out.len())?;
    fill(out, f, parameter);
    Ok(())
}

fn fill(out: &mut [f64], f: WindowFn, parameter: f64) {
    let width = out.len();
    #[cfg(feature = "parallel")]
    {
        if crate::parallel::should_parallelize(width) {
            out.par_iter_mut()
                .enumerate()
                .for_each(|(n, v)| *v = f(n, width, parameter));
            return;
        }
    }
    for (n, v) in out.iter_mut().enumerate() {
        *v = f(n, width, parameter);
    }
}
