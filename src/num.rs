use libm::{atan2, cos, hypot, sin};

/// Complex value `re + i·im` in double precision.
///
/// Spectra produced by [`crate::fourier`] are `Vec<Complex>`, one value per
/// frequency bin.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };
    pub const ONE: Self = Self { re: 1.0, im: 0.0 };

    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Purely real value.
    pub const fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// `e^{iθ}` on the unit circle.
    #[inline(always)]
    pub fn expi(theta: f64) -> Self {
        Self {
            re: cos(theta),
            im: sin(theta),
        }
    }

    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }

    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }

    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    /// Multiply both parts by a real factor.
    #[inline(always)]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            re: self.re * factor,
            im: self.im * factor,
        }
    }

    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// Magnitude `|z|`.
    pub fn norm(self) -> f64 {
        hypot(self.re, self.im)
    }

    /// Squared magnitude, cheaper than [`Complex::norm`] when only ordering
    /// or power matters.
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Phase angle in radians, in `(-π, π]`.
    pub fn arg(self) -> f64 {
        atan2(self.im, self.re)
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::from_real(re)
    }
}

impl core::ops::Neg for Complex {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl core::ops::Add for Complex {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Complex::add(self, other)
    }
}

impl core::ops::Sub for Complex {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Complex::sub(self, other)
    }
}

impl core::ops::Mul for Complex {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Complex::mul(self, other)
    }
}

impl core::fmt::Display for Complex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.im < 0.0 {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_operations() {
        let a = Complex::new(1.0, -2.0);
        let b = Complex::new(3.0, 4.0);
        let c = a.mul(b);
        assert!((c.re - (1.0 * 3.0 - (-2.0) * 4.0)).abs() < 1e-12);
        assert!((c.im - (1.0 * 4.0 + (-2.0) * 3.0)).abs() < 1e-12);
        let n = -a;
        assert_eq!(n.re, -1.0);
        assert_eq!(n.im, 2.0);
        assert_eq!(a + b, Complex::new(4.0, 2.0));
        assert_eq!(a - b, Complex::new(-2.0, -6.0));
    }

    #[test]
    fn test_polar_helpers() {
        let z = Complex::new(3.0, 4.0);
        assert!((z.norm() - 5.0).abs() < 1e-12);
        assert_eq!(z.norm_sqr(), 25.0);
        assert_eq!(z.conj(), Complex::new(3.0, -4.0));
        let e = Complex::expi(core::f64::consts::FRAC_PI_2);
        assert!(e.re.abs() < 1e-12);
        assert!((e.im - 1.0).abs() < 1e-12);
        assert!((e.arg() - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        use alloc::format;
        assert_eq!(format!("{}", Complex::new(1.0, -1.0)), "1-1i");
        assert_eq!(format!("{}", Complex::new(-1.0, 1.0)), "-1+1i");
    }
}
