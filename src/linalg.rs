//! Pluggable dense linear algebra.
//!
//! The Savitzky-Golay kernel derivation only needs four matrix operations:
//! construct, transpose, multiply and invert. [`DenseMatrix`] captures exactly
//! those so the filter code never depends on a concrete matrix layout. The
//! crate ships an implementation for [`nalgebra::DMatrix<f64>`].

use nalgebra::DMatrix;

/// Dense real matrix with the operations needed for least-squares fitting.
pub trait DenseMatrix: Sized {
    /// Build a `rows × cols` matrix from `f(row, col)`.
    fn from_fn<F>(rows: usize, cols: usize, f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64;

    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Element at `(row, col)`. Panics when out of bounds.
    fn get(&self, row: usize, col: usize) -> f64;

    fn transpose(&self) -> Self;

    /// Matrix product `self · other`, or `None` when the inner dimensions
    /// disagree.
    fn multiply(&self, other: &Self) -> Option<Self>;

    /// Inverse of a square matrix, or `None` when it is singular or not
    /// square.
    fn inverse(&self) -> Option<Self>;
}

impl DenseMatrix for DMatrix<f64> {
    fn from_fn<F>(rows: usize, cols: usize, f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        DMatrix::from_fn(rows, cols, f)
    }

    fn rows(&self) -> usize {
        self.nrows()
    }

    fn cols(&self) -> usize {
        self.ncols()
    }

    fn get(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    fn transpose(&self) -> Self {
        nalgebra::Matrix::transpose(self)
    }

    fn multiply(&self, other: &Self) -> Option<Self> {
        if self.ncols() != other.nrows() {
            return None;
        }
        Some(self * other)
    }

    fn inverse(&self) -> Option<Self> {
        if !self.is_square() {
            return None;
        }
        self.clone().try_inverse()
    }
}
