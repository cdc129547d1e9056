// src/core/state.rs

use super::constants::ql_constants::AMPLITUDE_TOLERANCE;
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Complex amplitude vector of an `n`-qubit register.
///
/// Basis index `k` encodes qubit `q` in bit `q` of `k`, so the amplitude at
/// index `0b110` belongs to qubits 1 and 2 being `|1>` and qubit 0 being `|0>`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// The all-zero basis state `|0...0>` on `num_qubits` qubits.
    pub fn zero_state(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex::zero(); 1usize << num_qubits];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Self { num_qubits, amplitudes }
    }

    /// Wraps an explicit amplitude vector. The length must be a power of two;
    /// returns `None` otherwise. Normalization is not checked here, see
    /// [`crate::validation::check_normalization`].
    pub fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Option<Self> {
        let dim = amplitudes.len();
        if dim == 0 || !dim.is_power_of_two() {
            return None;
        }
        Some(Self {
            num_qubits: dim.trailing_zeros() as usize,
            amplitudes,
        })
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitude of basis state `index`, or `None` when out of range.
    pub fn amplitude(&self, index: usize) -> Option<Complex<f64>> {
        self.amplitudes.get(index).copied()
    }

    /// Born-rule probabilities `|c_k|^2` for every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Squared norm of the vector.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Probability that `qubit` would be measured as `1`.
    pub fn probability_of_one(&self, qubit: usize) -> f64 {
        let mask = 1usize << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(k, _)| k & mask != 0)
            .map(|(_, c)| c.norm_sqr())
            .sum()
    }

    /// Copy with every component rounded to `decimals` places. Negative zeros
    /// are folded to positive zero so printed output stays stable.
    pub fn rounded(&self, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals as i32);
        let round = |x: f64| (x * scale).round() / scale + 0.0;
        Self {
            num_qubits: self.num_qubits,
            amplitudes: self
                .amplitudes
                .iter()
                .map(|c| Complex::new(round(c.re), round(c.im)))
                .collect(),
        }
    }

    /// Basis label of `index` as a bitstring, highest qubit first.
    pub fn basis_label(&self, index: usize) -> String {
        (0..self.num_qubits)
            .rev()
            .map(|q| if index >> q & 1 == 1 { '1' } else { '0' })
            .collect()
    }

    /// Non-negligible amplitudes as `(label, amplitude)` pairs, in index order.
    pub fn nonzero_terms(&self) -> Vec<(String, Complex<f64>)> {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.norm_sqr() > AMPLITUDE_TOLERANCE)
            .map(|(k, c)| (self.basis_label(k), *c))
            .collect()
    }
}

/// Prints as `[a0, a1, ...]`. A formatter precision (`{:.3}`) is applied to
/// every component; without one, four decimals are used.
impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        write!(f, "[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.*}", if i > 0 { ", " } else { "" }, precision, c)?;
        }
        write!(f, "]")
    }
}
