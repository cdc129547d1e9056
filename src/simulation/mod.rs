// src/simulation/mod.rs

//! Runs [`Circuit`]s on the statevector engine.
//!
//! [`Simulator`] is the public entry point. It owns the random number
//! generator so that a seeded simulator replays the same measurement
//! outcomes for the same sequence of calls.

mod results;
pub(crate) mod engine;

pub use results::{Counts, SimulationResult};

use crate::circuits::Circuit;
use crate::core::{QlError, Result, StateVector};
use crate::operations::Operation;
use engine::SimulationEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Statevector simulator with shot sampling.
///
/// # Examples
///
/// ```
/// use qlessons::{Circuit, Simulator};
///
/// let mut bell = Circuit::with_size(2, 2);
/// bell.h(0).cx(0, 1).measure(0, 0).measure(1, 1);
///
/// let mut sim = Simulator::with_seed(42);
/// let counts = sim.run_shots(&bell, 200).unwrap();
/// assert_eq!(counts.get("00") + counts.get("11"), 200);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    rng: StdRng,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Creates a simulator seeded from the operating system.
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Creates a reproducible simulator.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Seeded when `seed` is given, OS-seeded otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }

    /// Final statevector of `circuit`. Measurements and resets inside the
    /// circuit collapse the state using one random draw each.
    pub fn statevector(&mut self, circuit: &Circuit) -> Result<StateVector> {
        Ok(self.run(circuit)?.state().clone())
    }

    /// Executes `circuit` once.
    pub fn run(&mut self, circuit: &Circuit) -> Result<SimulationResult> {
        circuit.validate()?;
        let engine = self.execute_once(circuit)?;
        let (state, clbits) = engine.into_parts();
        let mut counts = Counts::new();
        counts.record(Counts::key_for(circuit, &clbits));
        Ok(SimulationResult::new(state, clbits, counts))
    }

    /// Executes `circuit` `shots` times and tallies the classical outcomes.
    ///
    /// Circuits whose measurements are all terminal are evolved once and the
    /// outcomes sampled from the final distribution; anything with
    /// mid-circuit measurement, reset or classical control is re-run per shot.
    #[tracing::instrument(skip(self, circuit), fields(qubits = circuit.num_qubits(), ops = circuit.len()))]
    pub fn run_shots(&mut self, circuit: &Circuit, shots: usize) -> Result<Counts> {
        if shots == 0 {
            return Err(QlError::InvalidArgument {
                message: "shots must be at least 1".to_string(),
            });
        }
        circuit.validate()?;

        if circuit.has_only_terminal_measurements() {
            tracing::debug!(shots, "sampling terminal measurements from a single evolution");
            self.sample_terminal(circuit, shots)
        } else {
            tracing::debug!(shots, "re-running circuit per shot");
            let mut counts = Counts::new();
            for _ in 0..shots {
                let engine = self.execute_once(circuit)?;
                counts.record(Counts::key_for(circuit, engine.clbits()));
            }
            Ok(counts)
        }
    }

    fn execute_once(&mut self, circuit: &Circuit) -> Result<SimulationEngine> {
        let mut engine = SimulationEngine::init(circuit.num_qubits(), circuit.num_clbits())?;
        for op in circuit.operations() {
            engine.execute(op, &mut self.rng)?;
        }
        Ok(engine)
    }

    fn sample_terminal(&mut self, circuit: &Circuit, shots: usize) -> Result<Counts> {
        let mut engine = SimulationEngine::init(circuit.num_qubits(), circuit.num_clbits())?;
        let mut measurements = Vec::new();
        for op in circuit.operations() {
            match op {
                Operation::Measure { qubit, clbit } => measurements.push((qubit.0, clbit.0)),
                other => engine.apply_unitary(other)?,
            }
        }

        let cumulative: Vec<f64> = engine
            .state()
            .probabilities()
            .iter()
            .scan(0.0, |acc, p| {
                *acc += p;
                Some(*acc)
            })
            .collect();
        let total = cumulative.last().copied().unwrap_or(0.0);
        let last_index = cumulative.len().saturating_sub(1);

        let mut counts = Counts::new();
        let mut clbits = vec![false; circuit.num_clbits()];
        for _ in 0..shots {
            let r = self.rng.random::<f64>() * total;
            let index = cumulative.partition_point(|c| *c <= r).min(last_index);
            clbits.iter_mut().for_each(|b| *b = false);
            for &(q, c) in &measurements {
                clbits[c] = index >> q & 1 == 1;
            }
            counts.record(Counts::key_for(circuit, &clbits));
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Gate;

    #[test]
    fn zero_shots_rejected() {
        let circuit = Circuit::with_size(1, 1);
        let err = Simulator::with_seed(0).run_shots(&circuit, 0).unwrap_err();
        assert!(matches!(err, QlError::InvalidArgument { .. }));
    }

    #[test]
    fn seeded_runs_repeat() {
        let mut qc = Circuit::with_size(3, 3);
        qc.h(0).h(1).h(2).measure(0, 0).measure(1, 1).measure(2, 2);
        let a = Simulator::with_seed(99).run_shots(&qc, 64).unwrap();
        let b = Simulator::with_seed(99).run_shots(&qc, 64).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn terminal_and_per_shot_paths_agree_on_support() {
        let mut terminal = Circuit::with_size(2, 2);
        terminal.h(0).cx(0, 1).measure(0, 0).measure(1, 1);
        let mut per_shot = terminal.clone();
        per_shot.reset(0);

        let mut sim = Simulator::with_seed(5);
        for counts in [sim.run_shots(&terminal, 300).unwrap(), sim.run_shots(&per_shot, 300).unwrap()] {
            assert_eq!(counts.total(), 300);
            assert_eq!(counts.get("01") + counts.get("10"), 0);
            assert!(counts.get("00") > 100 && counts.get("11") > 100, "{}", counts);
        }
    }

    #[test]
    fn unmeasured_bits_stay_zero() {
        let mut qc = Circuit::with_size(1, 2);
        qc.x(0).measure(0, 1);
        let counts = Simulator::with_seed(1).run_shots(&qc, 10).unwrap();
        assert_eq!(counts.get("10"), 10);
    }

    #[test]
    fn run_exposes_collapsed_state() {
        let mut qc = Circuit::with_size(1, 1);
        qc.gate(Gate::H, 0).measure(0, 0);
        let result = Simulator::with_seed(21).run(&qc).unwrap();
        let bit = result.clbits()[0];
        let index = usize::from(bit);
        assert!((result.state().vector()[index].norm() - 1.0).abs() < 1e-12);
        assert_eq!(result.counts().total(), 1);
    }
}
