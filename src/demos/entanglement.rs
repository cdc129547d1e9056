//! Bell pair on two named single-qubit registers.

use crate::circuits::Circuit;
use crate::core::Result;
use crate::simulation::{Counts, Simulator};
use std::fmt;

pub const DEFAULT_SHOTS: usize = 1024;

/// `H(a)`, `CX(a→b)`, then `a→ca`, `b→cb`.
pub fn bell_circuit() -> Circuit {
    let mut qc = Circuit::new();
    let a = qc.add_qreg("a", 1);
    let b = qc.add_qreg("b", 1);
    let ca = qc.add_creg("ca", 1);
    let cb = qc.add_creg("cb", 1);
    qc.h(a.qubit(0))
        .cx(a.qubit(0), b.qubit(0))
        .measure(a.qubit(0), ca.clbit(0))
        .measure(b.qubit(0), cb.clbit(0));
    qc
}

#[derive(Debug, Clone)]
pub struct BellReport {
    pub circuit: Circuit,
    pub counts: Counts,
}

impl BellReport {
    /// Shots in which the two bits disagreed.
    pub fn anticorrelated(&self) -> usize {
        self.counts.get("0 1") + self.counts.get("1 0")
    }
}

impl fmt::Display for BellReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement results: {}", self.counts)?;
        writeln!(f)?;
        write!(f, "{}", self.circuit)
    }
}

pub fn bell_pair(sim: &mut Simulator, shots: usize) -> Result<BellReport> {
    let circuit = bell_circuit();
    let counts = sim.run_shots(&circuit, shots)?;
    tracing::info!(shots, outcomes = counts.len(), "bell pair sampled");
    Ok(BellReport { circuit, counts })
}
