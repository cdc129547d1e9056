//! BB84 eavesdropper detection on a single simulated fiber.
//!
//! Alice draws a basis bit and a value bit, prepares `|0>`, `|1>`, `|+>` or
//! `|->` and swaps it into the fiber. An optional spy measures the fiber and
//! re-prepares what she saw. Bob draws his own basis and measures. Whenever
//! the two bases agree but the values do not, the channel was tampered with.

use crate::circuits::Circuit;
use crate::core::{ClbitId, QlError, QubitId, Result};
use crate::operations::{Gate, Operation};
use crate::simulation::{Counts, Simulator};
use std::fmt;

/// Textbook error rate on sifted rounds under intercept-resend.
pub const INTERCEPT_RESEND_ERROR_RATE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpyHuntConfig {
    /// Whether the spy taps the fiber at all.
    pub spy_present: bool,
    /// Spy measures in the Hadamard basis; ignored with `spy_random_basis`.
    pub spy_hadamard: bool,
    /// Spy draws a fresh basis every round from her own qubit.
    pub spy_random_basis: bool,
}

impl Default for SpyHuntConfig {
    fn default() -> Self {
        Self {
            spy_present: true,
            spy_hadamard: true,
            spy_random_basis: false,
        }
    }
}

/// Appends `reset`, `H`, `measure` on `qubit`, producing a uniform random bit.
fn draw_random_bit(qc: &mut Circuit, qubit: QubitId, clbit: ClbitId) {
    qc.reset(qubit).h(qubit).measure(qubit, clbit);
}

fn gate_on(gate: Gate, qubit: QubitId) -> Operation {
    Operation::Gate { gate, target: qubit }
}

/// Builds the full protocol round.
pub fn spy_hunter_circuit(config: &SpyHuntConfig) -> Circuit {
    let mut qc = Circuit::new();
    let alice = qc.add_qreg("alice", 1).qubit(0);
    let fiber = qc.add_qreg("fiber", 1).qubit(0);
    let bob = qc.add_qreg("bob", 1).qubit(0);
    let spy = (config.spy_present && config.spy_random_basis).then(|| qc.add_qreg("spy", 1).qubit(0));

    let ahad = qc.add_creg("ahad", 1).clbit(0);
    let aval = qc.add_creg("aval", 1).clbit(0);
    let fval = qc.add_creg("fval", 1).clbit(0);
    let bhad = qc.add_creg("bhad", 1).clbit(0);
    let bval = qc.add_creg("bval", 1).clbit(0);
    let shad = spy.map(|_| qc.add_creg("shad", 1).clbit(0));

    draw_random_bit(&mut qc, alice, ahad);
    draw_random_bit(&mut qc, alice, aval);

    qc.reset(alice);
    qc.if_test(aval, true, gate_on(Gate::X, alice));
    qc.if_test(ahad, true, gate_on(Gate::H, alice));

    qc.swap(alice, fiber);

    if config.spy_present {
        qc.barrier();
        match (spy, shad) {
            (Some(spy), Some(shad)) => {
                draw_random_bit(&mut qc, spy, shad);
                qc.if_test(shad, true, gate_on(Gate::H, fiber));
                qc.measure(fiber, fval);
                qc.reset(fiber);
                qc.if_test(fval, true, gate_on(Gate::X, fiber));
                qc.if_test(shad, true, gate_on(Gate::H, fiber));
            }
            _ => {
                if config.spy_hadamard {
                    qc.h(fiber);
                }
                qc.measure(fiber, fval);
                qc.reset(fiber);
                qc.if_test(fval, true, gate_on(Gate::X, fiber));
                if config.spy_hadamard {
                    qc.h(fiber);
                }
            }
        }
    }

    qc.barrier();

    draw_random_bit(&mut qc, bob, bhad);
    qc.swap(fiber, bob);
    qc.if_test(bhad, true, gate_on(Gate::H, bob));
    qc.measure(bob, bval);
    qc
}

/// Classical record of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub ahad: bool,
    pub aval: bool,
    pub fval: bool,
    pub bhad: bool,
    pub bval: bool,
}

impl RoundOutcome {
    /// Parses a counts key. The last five fields are `bval bhad fval aval
    /// ahad`; any leading fields belong to extra registers and are skipped.
    pub fn parse(key: &str) -> Result<Self> {
        let bad_key = || QlError::SimulationError {
            message: format!("malformed BB84 outcome key '{}'", key),
        };
        let mut fields = key.split(' ').rev().map(|f| match f {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(bad_key()),
        });
        let mut next = || fields.next().unwrap_or_else(|| Err(bad_key()));
        Ok(Self {
            ahad: next()?,
            aval: next()?,
            fval: next()?,
            bhad: next()?,
            bval: next()?,
        })
    }

    /// Alice and Bob used the same basis.
    pub fn is_sifted(&self) -> bool {
        self.ahad == self.bhad
    }

    /// Same basis, different value.
    pub fn reveals_spy(&self) -> bool {
        self.is_sifted() && self.aval != self.bval
    }
}

#[derive(Debug, Clone)]
pub struct SpyHuntReport {
    pub circuit: Circuit,
    pub counts: Counts,
    /// Number of distinct outcomes that exposed the spy.
    pub detections: usize,
}

impl SpyHuntReport {
    pub fn caught(&self) -> bool {
        self.detections > 0
    }
}

impl fmt::Display for SpyHuntReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "counts: {}", self.counts)?;
        for _ in 0..self.detections {
            writeln!(f, "Caught a spy!")?;
        }
        if !self.caught() {
            writeln!(f, "No spies detected.")?;
        }
        writeln!(f)?;
        writeln!(f, "Circuit Diagram:")?;
        write!(f, "{}", self.circuit)
    }
}

/// Runs `shots` protocol rounds and scans every outcome for a mismatch on
/// matching bases.
pub fn spy_hunt(sim: &mut Simulator, config: &SpyHuntConfig, shots: usize) -> Result<SpyHuntReport> {
    let circuit = spy_hunter_circuit(config);
    let counts = sim.run_shots(&circuit, shots)?;
    let mut detections = 0;
    for key in counts.keys() {
        if RoundOutcome::parse(key)?.reveals_spy() {
            detections += 1;
        }
    }
    tracing::info!(spy_present = config.spy_present, detections, "spy hunt finished");
    Ok(SpyHuntReport { circuit, counts, detections })
}

/// Error statistics over many independent rounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorRateEstimate {
    pub rounds: usize,
    pub sifted: usize,
    pub mismatches: usize,
}

impl ErrorRateEstimate {
    /// Mismatches per sifted round, `None` if no round was sifted.
    pub fn error_rate(&self) -> Option<f64> {
        (self.sifted > 0).then(|| self.mismatches as f64 / self.sifted as f64)
    }
}

impl fmt::Display for ErrorRateEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rounds:      {}", self.rounds)?;
        writeln!(f, "sifted:      {}", self.sifted)?;
        writeln!(f, "mismatches:  {}", self.mismatches)?;
        match self.error_rate() {
            Some(rate) => writeln!(f, "error rate:  {:.4}", rate),
            None => writeln!(f, "error rate:  undefined (no sifted rounds)"),
        }
    }
}

/// Runs `rounds` rounds and measures the error rate on sifted rounds.
pub fn estimate_error_rate(sim: &mut Simulator, config: &SpyHuntConfig, rounds: usize) -> Result<ErrorRateEstimate> {
    let circuit = spy_hunter_circuit(config);
    let counts = sim.run_shots(&circuit, rounds)?;
    let mut estimate = ErrorRateEstimate { rounds, sifted: 0, mismatches: 0 };
    for (key, n) in counts.iter() {
        let outcome = RoundOutcome::parse(key)?;
        if outcome.is_sifted() {
            estimate.sifted += n;
            if outcome.reveals_spy() {
                estimate.mismatches += n;
            }
        }
    }
    tracing::info!(rounds, sifted = estimate.sifted, mismatches = estimate.mismatches, "BB84 error rate estimated");
    Ok(estimate)
}
