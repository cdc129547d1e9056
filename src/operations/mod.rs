// src/operations/mod.rs

//! Gates and circuit instructions.
//!
//! A [`Gate`] is a single-qubit unitary with a fixed matrix. An
//! [`Operation`] places gates (optionally controlled) on qubits, or performs
//! a non-unitary step: measurement, reset, barrier, or a classically
//! conditioned operation.

pub mod matrix;

pub use matrix::Matrix2;

use crate::core::{ClbitId, QubitId};
use num_complex::Complex;
use num_traits::{One, Zero};
use std::f64::consts::FRAC_1_SQRT_2;

/// Single-qubit gates supported by the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    /// Hadamard
    H,
    /// Pauli-X (NOT)
    X,
    Y,
    Z,
    /// Phase(π/2)
    S,
    Sdg,
    /// Phase(π/4)
    T,
    Tdg,
    /// Square root of NOT, `SX · SX = X`
    Sx,
    Sxdg,
    /// `diag(1, e^{iλ})`, also known as U1
    Phase(f64),
    Rx(f64),
    Ry(f64),
    /// `diag(e^{-iλ/2}, e^{iλ/2})`
    Rz(f64),
}

impl Gate {
    /// The gate's 2x2 unitary.
    pub fn matrix(&self) -> Matrix2 {
        let i = Complex::i();
        match *self {
            Gate::H => Matrix2::real(FRAC_1_SQRT_2, FRAC_1_SQRT_2, FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
            Gate::X => Matrix2::real(0.0, 1.0, 1.0, 0.0),
            Gate::Y => Matrix2::new(Complex::zero(), -i, i, Complex::zero()),
            Gate::Z => Matrix2::real(1.0, 0.0, 0.0, -1.0),
            Gate::S => Matrix2::diagonal(Complex::one(), i),
            Gate::Sdg => Matrix2::diagonal(Complex::one(), -i),
            Gate::T => Matrix2::diagonal(Complex::one(), Complex::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)),
            Gate::Tdg => Matrix2::diagonal(Complex::one(), Complex::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)),
            Gate::Sx => Matrix2::new(
                Complex::new(0.5, 0.5),
                Complex::new(0.5, -0.5),
                Complex::new(0.5, -0.5),
                Complex::new(0.5, 0.5),
            ),
            Gate::Sxdg => Matrix2::new(
                Complex::new(0.5, -0.5),
                Complex::new(0.5, 0.5),
                Complex::new(0.5, 0.5),
                Complex::new(0.5, -0.5),
            ),
            Gate::Phase(lambda) => Matrix2::diagonal(Complex::one(), Complex::from_polar(1.0, lambda)),
            Gate::Rx(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                Matrix2::new(Complex::new(c, 0.0), -i * s, -i * s, Complex::new(c, 0.0))
            }
            Gate::Ry(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                Matrix2::real(c, -s, s, c)
            }
            Gate::Rz(lambda) => Matrix2::diagonal(
                Complex::from_polar(1.0, -lambda / 2.0),
                Complex::from_polar(1.0, lambda / 2.0),
            ),
        }
    }

    /// The gate undoing this one.
    pub fn inverse(&self) -> Gate {
        match *self {
            Gate::S => Gate::Sdg,
            Gate::Sdg => Gate::S,
            Gate::T => Gate::Tdg,
            Gate::Tdg => Gate::T,
            Gate::Sx => Gate::Sxdg,
            Gate::Sxdg => Gate::Sx,
            Gate::Phase(l) => Gate::Phase(-l),
            Gate::Rx(t) => Gate::Rx(-t),
            Gate::Ry(t) => Gate::Ry(-t),
            Gate::Rz(l) => Gate::Rz(-l),
            g => g,
        }
    }

    /// Short label used in circuit diagrams.
    pub fn symbol(&self) -> String {
        match *self {
            Gate::H => "H".to_string(),
            Gate::X => "X".to_string(),
            Gate::Y => "Y".to_string(),
            Gate::Z => "Z".to_string(),
            Gate::S => "S".to_string(),
            Gate::Sdg => "S†".to_string(),
            Gate::T => "T".to_string(),
            Gate::Tdg => "T†".to_string(),
            Gate::Sx => "√X".to_string(),
            Gate::Sxdg => "√X†".to_string(),
            Gate::Phase(l) => format!("P({})", format_angle(l)),
            Gate::Rx(t) => format!("Rx({})", format_angle(t)),
            Gate::Ry(t) => format!("Ry({})", format_angle(t)),
            Gate::Rz(l) => format!("Rz({})", format_angle(l)),
        }
    }
}

/// Renders common multiples of π symbolically (`π/2`, `-π/4`), other angles
/// with two decimals.
pub fn format_angle(theta: f64) -> String {
    use std::f64::consts::PI;
    let sign = if theta < 0.0 { "-" } else { "" };
    let ratio = theta.abs() / PI;
    for denom in [1u32, 2, 3, 4, 8] {
        let numer = ratio * denom as f64;
        if (numer - numer.round()).abs() < 1e-9 && numer.round() >= 1.0 {
            let n = numer.round() as u64;
            return match (n, denom) {
                (1, 1) => format!("{sign}π"),
                (n, 1) => format!("{sign}{n}π"),
                (1, d) => format!("{sign}π/{d}"),
                (n, d) => format!("{sign}{n}π/{d}"),
            };
        }
    }
    format!("{theta:.2}")
}

/// A single instruction in a [`crate::circuits::Circuit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Apply `gate` to `target`.
    Gate { gate: Gate, target: QubitId },

    /// Apply `gate` to `target` on the subspace where `control` is `|1>`.
    /// CX, CZ, CP (CU1) and CRz are all expressed this way.
    Controlled {
        gate: Gate,
        control: QubitId,
        target: QubitId,
    },

    /// Exchange the states of two qubits.
    Swap { a: QubitId, b: QubitId },

    /// Fredkin gate: swap `a` and `b` when `control` is `|1>`.
    ControlledSwap {
        control: QubitId,
        a: QubitId,
        b: QubitId,
    },

    /// Projective Z-basis measurement of `qubit`, written to `clbit`.
    Measure { qubit: QubitId, clbit: ClbitId },

    /// Return `qubit` to `|0>` regardless of its state.
    Reset { qubit: QubitId },

    /// Visual separator with no effect on the state. An empty list spans
    /// every qubit.
    Barrier { qubits: Vec<QubitId> },

    /// Execute `op` only when `clbit` currently holds `value`.
    Conditional {
        clbit: ClbitId,
        value: bool,
        op: Box<Operation>,
    },
}

impl Operation {
    /// Every qubit the operation names, in parameter order.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Gate { target, .. } => vec![*target],
            Operation::Controlled { control, target, .. } => vec![*control, *target],
            Operation::Swap { a, b } => vec![*a, *b],
            Operation::ControlledSwap { control, a, b } => vec![*control, *a, *b],
            Operation::Measure { qubit, .. } => vec![*qubit],
            Operation::Reset { qubit } => vec![*qubit],
            Operation::Barrier { qubits } => qubits.clone(),
            Operation::Conditional { op, .. } => op.involved_qubits(),
        }
    }

    /// Every classical bit the operation reads or writes.
    pub fn involved_clbits(&self) -> Vec<ClbitId> {
        match self {
            Operation::Measure { clbit, .. } => vec![*clbit],
            Operation::Conditional { clbit, op, .. } => {
                let mut bits = vec![*clbit];
                bits.extend(op.involved_clbits());
                bits
            }
            _ => Vec::new(),
        }
    }

    /// Whether the operation is a plain unitary (no measurement, reset or
    /// classical control).
    pub fn is_unitary(&self) -> bool {
        matches!(
            self,
            Operation::Gate { .. }
                | Operation::Controlled { .. }
                | Operation::Swap { .. }
                | Operation::ControlledSwap { .. }
                | Operation::Barrier { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOL: f64 = 1e-12;

    #[test]
    fn every_gate_is_unitary() {
        let gates = [
            Gate::H,
            Gate::X,
            Gate::Y,
            Gate::Z,
            Gate::S,
            Gate::Sdg,
            Gate::T,
            Gate::Tdg,
            Gate::Sx,
            Gate::Sxdg,
            Gate::Phase(0.3),
            Gate::Rx(1.1),
            Gate::Ry(-0.7),
            Gate::Rz(2.5),
        ];
        for gate in gates {
            assert!(gate.matrix().is_unitary(TOL), "{:?} is not unitary", gate);
            let product = gate.matrix().mul(&gate.inverse().matrix());
            assert!(product.approx_eq(&Matrix2::identity(), TOL), "{:?} inverse mismatch", gate);
        }
    }

    #[test]
    fn sx_squared_is_x() {
        let sx = Gate::Sx.matrix();
        assert!(sx.mul(&sx).approx_eq(&Gate::X.matrix(), TOL));
    }

    #[test]
    fn phase_half_pi_is_s() {
        assert!(Gate::Phase(PI / 2.0).matrix().approx_eq(&Gate::S.matrix(), TOL));
        assert!(Gate::Phase(PI / 4.0).matrix().approx_eq(&Gate::T.matrix(), TOL));
    }

    #[test]
    fn angle_formatting() {
        assert_eq!(format_angle(PI / 2.0), "π/2");
        assert_eq!(format_angle(-PI / 4.0), "-π/4");
        assert_eq!(format_angle(PI), "π");
        assert_eq!(format_angle(0.3), "0.30");
    }

    #[test]
    fn conditional_reports_nested_bits() {
        let op = Operation::Conditional {
            clbit: ClbitId(2),
            value: true,
            op: Box::new(Operation::Measure { qubit: QubitId(0), clbit: ClbitId(1) }),
        };
        assert_eq!(op.involved_clbits(), vec![ClbitId(2), ClbitId(1)]);
        assert_eq!(op.involved_qubits(), vec![QubitId(0)]);
        assert!(!op.is_unitary());
    }
}
