//! Controlled-phase lessons.

use crate::circuits::Circuit;
use crate::core::{PI, Result, StateVector};
use crate::simulation::Simulator;
use std::fmt;

/// Decimals used when printing these statevectors.
pub const PRINT_DECIMALS: u32 = 3;

/// Statevector and diagram of a phase lesson.
#[derive(Debug, Clone)]
pub struct PhaseReport {
    pub circuit: Circuit,
    pub state: StateVector,
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:.3}", self.state.rounded(PRINT_DECIMALS))?;
        writeln!(f)?;
        write!(f, "{}", self.circuit)
    }
}

/// `H` on qubits 0 and 1, then `CP(π/4; 0→2)` and `CP(π/2; 1→2)`.
///
/// Qubit 2 stays in `|0>`, where a controlled phase does nothing, so every
/// amplitude of the first four basis states is 0.5.
pub fn phase_kickback_circuit() -> Circuit {
    let mut qc = Circuit::with_size(3, 0);
    qc.h(0).h(1).cp(PI / 4.0, 0, 2).cp(PI / 2.0, 1, 2);
    qc
}

pub fn phase_kickback(sim: &mut Simulator) -> Result<PhaseReport> {
    let circuit = phase_kickback_circuit();
    let state = sim.statevector(&circuit)?;
    tracing::info!(terms = state.nonzero_terms().len(), "phase kickback evolved");
    Ok(PhaseReport { circuit, state })
}

/// Conditional phase of `theta` on register `reg`, built from `Rz` and `CX`,
/// followed by a native `CRz(theta)` after a barrier.
pub fn conditional_phase_circuit(theta: f64) -> Circuit {
    let mut qc = Circuit::new();
    let reg = qc.add_qreg("reg", 2);
    let (q0, q1) = (reg.qubit(0), reg.qubit(1));
    qc.h(q0).h(q1);
    qc.rz(theta / 2.0, q1)
        .cx(q0, q1)
        .rz(-theta / 2.0, q1)
        .cx(q0, q1)
        .rz(-theta / 2.0, q0)
        .barrier()
        .crz(theta, q0, q1);
    qc
}

pub fn conditional_phase(sim: &mut Simulator, theta: f64) -> Result<PhaseReport> {
    let circuit = conditional_phase_circuit(theta);
    let state = sim.statevector(&circuit)?;
    tracing::info!(theta, "conditional phase evolved");
    Ok(PhaseReport { circuit, state })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn kickback_leaves_uniform_amplitudes() {
        let report = phase_kickback(&mut Simulator::with_seed(0)).unwrap();
        let state = report.state.rounded(PRINT_DECIMALS);
        for k in 0..4 {
            assert_eq!(state.vector()[k], Complex::new(0.5, 0.0), "index {k}");
        }
        for k in 4..8 {
            assert_eq!(state.vector()[k], Complex::new(0.0, 0.0), "index {k}");
        }
    }

    #[test]
    fn conditional_phase_quarter_turn_amplitudes() {
        let report = conditional_phase(&mut Simulator::with_seed(0), PI / 2.0).unwrap();
        let (s, c) = (PI / 8.0).sin_cos();
        let expected = [
            Complex::new(c, s) * 0.5,
            Complex::new(-s, -c) * 0.5,
            Complex::new(c, s) * 0.5,
            Complex::new(s, c) * 0.5,
        ];
        for (k, (amp, want)) in report.state.vector().iter().zip(expected).enumerate() {
            assert!((amp - want).norm() < 1e-12, "index {k}: {amp} != {want}");
        }
    }

    #[test]
    fn zero_theta_is_identity_after_hadamards() {
        let report = conditional_phase(&mut Simulator::with_seed(0), 0.0).unwrap();
        for amp in report.state.vector() {
            assert!((amp - Complex::new(0.5, 0.0)).norm() < 1e-12);
        }
    }
}
