//! 2x2 complex matrix algebra used for single-qubit gates.

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// A 2x2 complex matrix, row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2(pub [[Complex<f64>; 2]; 2]);

impl Matrix2 {
    pub fn new(a: Complex<f64>, b: Complex<f64>, c: Complex<f64>, d: Complex<f64>) -> Self {
        Matrix2([[a, b], [c, d]])
    }

    /// Builds a matrix from real entries.
    pub fn real(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::new(
            Complex::new(a, 0.0),
            Complex::new(b, 0.0),
            Complex::new(c, 0.0),
            Complex::new(d, 0.0),
        )
    }

    pub fn identity() -> Self {
        Self::new(Complex::one(), Complex::zero(), Complex::zero(), Complex::one())
    }

    /// Diagonal matrix `diag(d0, d1)`.
    pub fn diagonal(d0: Complex<f64>, d1: Complex<f64>) -> Self {
        Self::new(d0, Complex::zero(), Complex::zero(), d1)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex<f64> {
        self.0[row][col]
    }

    /// Matrix product `self · rhs`.
    pub fn mul(&self, rhs: &Matrix2) -> Matrix2 {
        let mut out = [[Complex::zero(); 2]; 2];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.0[r][0] * rhs.0[0][c] + self.0[r][1] * rhs.0[1][c];
            }
        }
        Matrix2(out)
    }

    /// Applies the matrix to a single-qubit column vector.
    pub fn apply(&self, v: [Complex<f64>; 2]) -> [Complex<f64>; 2] {
        [
            self.0[0][0] * v[0] + self.0[0][1] * v[1],
            self.0[1][0] * v[0] + self.0[1][1] * v[1],
        ]
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Matrix2 {
        Self::new(
            self.0[0][0].conj(),
            self.0[1][0].conj(),
            self.0[0][1].conj(),
            self.0[1][1].conj(),
        )
    }

    pub fn scale(&self, factor: Complex<f64>) -> Matrix2 {
        Matrix2(self.0.map(|row| row.map(|x| x * factor)))
    }

    /// Largest entry-wise distance to `other`.
    pub fn max_distance(&self, other: &Matrix2) -> f64 {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max)
    }

    /// Entry-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Matrix2, tolerance: f64) -> bool {
        self.max_distance(other) <= tolerance
    }

    /// Whether `self · self†` is the identity within `tolerance`.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        self.mul(&self.dagger()).approx_eq(&Matrix2::identity(), tolerance)
    }
}

impl fmt::Display for Matrix2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            write!(f, "[{:.*}, {:.*}]", precision, row[0], precision, row[1])?;
        }
        Ok(())
    }
}
