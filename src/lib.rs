// src/lib.rs

//! `qlessons` - probability and quantum-circuit lessons on a small
//! statevector simulator.
//!
//! The classical lessons estimate coin probabilities by Monte Carlo and
//! iterate a two-state Markov chain. The quantum lessons build circuits over
//! named registers and run them on [`Simulator`], which evolves a dense
//! statevector and samples measurement outcomes.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod classical;
pub mod demos;
pub mod config;
pub mod cli;

// Re-export the most common types for easier top-level use
pub use crate::core::{ClbitId, QlError, QubitId, Result, StateVector};
pub use operations::{Gate, Matrix2, Operation};
pub use circuits::{Circuit, CircuitBuilder, ClassicalRegister, QuantumRegister};
pub use simulation::{Counts, SimulationResult, Simulator};
pub use config::DemoConfig;
pub use validation::{
    check_normalization,
    equal_up_to_global_phase,
    matrices_approx_equal,
    states_approx_equal,
};

// Example 1: Superposition and measurement
// A Hadamard followed by a measurement yields each outcome about half the
// time; the statevector before measurement has two equal amplitudes.
/// ```
/// use qlessons::{Circuit, Simulator, check_normalization};
///
/// let mut prep = Circuit::with_size(1, 0);
/// prep.h(0);
///
/// let mut sim = Simulator::with_seed(7);
/// let state = sim.statevector(&prep).unwrap();
/// assert!(check_normalization(&state, None).is_ok());
/// assert!((state.probabilities()[0] - 0.5).abs() < 1e-12);
///
/// let mut coin = prep.clone();
/// coin.add_creg("c", 1);
/// coin.measure(0, 0);
/// let counts = sim.run_shots(&coin, 1000).unwrap();
/// assert_eq!(counts.total(), 1000);
/// assert!(counts.get("0") > 400 && counts.get("1") > 400);
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Named registers and counts keys
// Counts keys list classical registers from the last declared to the
// first, separated by spaces.
/// ```
/// use qlessons::{Circuit, Simulator};
///
/// let mut qc = Circuit::new();
/// let a = qc.add_qreg("a", 1);
/// let b = qc.add_qreg("b", 1);
/// let ca = qc.add_creg("ca", 1);
/// let cb = qc.add_creg("cb", 1);
/// qc.x(a.qubit(0))
///     .measure(a.qubit(0), ca.clbit(0))
///     .measure(b.qubit(0), cb.clbit(0));
///
/// let counts = Simulator::with_seed(1).run_shots(&qc, 10).unwrap();
/// // cb = 0, ca = 1
/// assert_eq!(counts.get("0 1"), 10);
/// ```
#[doc(hidden)]
const _: () = ();
