//! Square root of NOT, built by hand from `H·P(-π/2)·H` and with the native
//! `SX` gate.
//!
//! The hand-built matrix is `SX†`, not `SX`; the two differ by more than a
//! global phase. Both square to `X`, so applying either twice to `|0>`
//! yields `|1>` on every shot.

use crate::circuits::Circuit;
use crate::core::constants::ql_constants::COMPARE_TOLERANCE;
use crate::core::{PI, Result, StateVector};
use crate::operations::{Gate, Matrix2};
use crate::simulation::{Counts, Simulator};
use crate::validation::{equal_up_to_global_phase, matrices_approx_equal};
use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

pub const DEFAULT_SHOTS: usize = 1000;

/// `(H, P(-π/2), H, barrier)` twice, then `measure_all`.
pub fn manual_circuit() -> Circuit {
    let mut qc = Circuit::with_size(1, 0);
    for _ in 0..2 {
        qc.h(0).p(-PI / 2.0, 0).h(0).barrier();
    }
    qc.measure_all();
    qc
}

/// `(SX, barrier)` twice, then `measure_all`.
pub fn builtin_circuit() -> Circuit {
    let mut qc = Circuit::with_size(1, 0);
    for _ in 0..2 {
        qc.sx(0).barrier();
    }
    qc.measure_all();
    qc
}

/// Direct 2x2 algebra behind the two constructions.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixAnalysis {
    pub manual: Matrix2,
    pub sx: Matrix2,
    pub manual_equals_sx: bool,
    pub manual_equals_sx_dagger: bool,
    pub manual_equals_sx_up_to_phase: bool,
    pub manual_squared_is_x: bool,
    pub sx_squared_is_x: bool,
    pub sx_on_zero: [Complex<f64>; 2],
    pub sx_twice_on_zero: [Complex<f64>; 2],
}

impl MatrixAnalysis {
    pub fn compute() -> Self {
        let h = Gate::H.matrix();
        let manual = h.mul(&Gate::Phase(-PI / 2.0).matrix()).mul(&h);
        let sx = Gate::Sx.matrix();
        let x = Gate::X.matrix();
        let zero = [Complex::one(), Complex::zero()];
        Self {
            manual,
            sx,
            manual_equals_sx: matrices_approx_equal(&manual, &sx, COMPARE_TOLERANCE),
            manual_equals_sx_dagger: matrices_approx_equal(&manual, &Gate::Sxdg.matrix(), COMPARE_TOLERANCE),
            manual_equals_sx_up_to_phase: equal_up_to_global_phase(&manual, &sx, COMPARE_TOLERANCE),
            manual_squared_is_x: matrices_approx_equal(&manual.mul(&manual), &x, COMPARE_TOLERANCE),
            sx_squared_is_x: matrices_approx_equal(&sx.mul(&sx), &x, COMPARE_TOLERANCE),
            sx_on_zero: sx.apply(zero),
            sx_twice_on_zero: sx.apply(sx.apply(zero)),
        }
    }
}

fn fmt_vector(v: &[Complex<f64>; 2]) -> String {
    format!("[{:.3}, {:.3}]", v[0], v[1])
}

impl fmt::Display for MatrixAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Mathematical Analysis ===")?;
        writeln!(f, "Manual ROOTNOT matrix (H·P(-π/2)·H):")?;
        writeln!(f, "{}", self.manual)?;
        writeln!(f)?;
        writeln!(f, "Built-in SX (ROOTNOT) matrix:")?;
        writeln!(f, "{}", self.sx)?;
        writeln!(f)?;
        writeln!(f, "Matrices are equivalent: {}", self.manual_equals_sx)?;
        writeln!(f, "Matrices are equivalent up to global phase: {}", self.manual_equals_sx_up_to_phase)?;
        writeln!(f, "Manual matrix equals SX†: {}", self.manual_equals_sx_dagger)?;
        writeln!(f)?;
        writeln!(f, "Manual ROOTNOT² ≈ X: {}", self.manual_squared_is_x)?;
        writeln!(f, "Built-in SX² ≈ X: {}", self.sx_squared_is_x)?;
        writeln!(f)?;
        writeln!(f, "|0⟩ after one ROOTNOT: {}", fmt_vector(&self.sx_on_zero))?;
        writeln!(f, "|0⟩ after two ROOTNOT: {}", fmt_vector(&self.sx_twice_on_zero))
    }
}

#[derive(Debug, Clone)]
pub struct SqrtNotReport {
    pub manual_circuit: Circuit,
    pub builtin_circuit: Circuit,
    pub manual_counts: Counts,
    pub builtin_counts: Counts,
    /// `SX|0>`.
    pub single: StateVector,
    pub analysis: MatrixAnalysis,
}

impl fmt::Display for SqrtNotReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial state: |0⟩")?;
        writeln!(f)?;
        writeln!(f, "=== Manual ROOTNOT Construction ===")?;
        writeln!(f, "{}", self.manual_circuit)?;
        writeln!(f, "=== Built-in ROOTNOT (SX gate) ===")?;
        writeln!(f, "{}", self.builtin_circuit)?;
        writeln!(f, "Manual ROOTNOT×2 results: {}", self.manual_counts)?;
        writeln!(f, "Built-in SX×2 results: {}", self.builtin_counts)?;
        writeln!(f)?;
        writeln!(f, "=== Single ROOTNOT Effect ===")?;
        writeln!(f, "After single ROOTNOT: {:.3}", self.single)?;
        let probs = self.single.probabilities();
        writeln!(f, "Probabilities: |0⟩: {:.3}, |1⟩: {:.3}", probs[0], probs[1])?;
        writeln!(f)?;
        write!(f, "{}", self.analysis)
    }
}

pub fn sqrt_not(sim: &mut Simulator, shots: usize) -> Result<SqrtNotReport> {
    let manual_circuit = manual_circuit();
    let builtin_circuit = builtin_circuit();
    let manual_counts = sim.run_shots(&manual_circuit, shots)?;
    let builtin_counts = sim.run_shots(&builtin_circuit, shots)?;

    let mut single = Circuit::with_size(1, 0);
    single.sx(0);
    let single = sim.statevector(&single)?;

    let analysis = MatrixAnalysis::compute();
    tracing::info!(
        manual_equals_sx = analysis.manual_equals_sx,
        manual_equals_sx_dagger = analysis.manual_equals_sx_dagger,
        "square root of NOT analysed"
    );
    Ok(SqrtNotReport {
        manual_circuit,
        builtin_circuit,
        manual_counts,
        builtin_counts,
        single,
        analysis,
    })
}
