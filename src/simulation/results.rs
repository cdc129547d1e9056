// src/simulation/results.rs
use crate::circuits::{Circuit, ClassicalRegister};
use crate::core::{ClbitId, QlError, Result, StateVector};
use std::collections::BTreeMap;
use std::fmt;

/// Histogram of measurement outcomes keyed by bitstring.
///
/// Keys list classical registers from the last declared to the first,
/// separated by a single space; inside a register the highest bit comes
/// first. A circuit with registers `ca` and `cb` therefore produces keys like
/// `"cb ca"` = `"1 1"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    counts: BTreeMap<String, usize>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formats a classical-bit array as a counts key for `circuit`'s
    /// registers.
    pub fn key_for(circuit: &Circuit, clbits: &[bool]) -> String {
        if circuit.cregs().is_empty() {
            return String::new();
        }
        circuit
            .cregs()
            .iter()
            .rev()
            .map(|reg| register_bits(reg, clbits))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn record(&mut self, key: String) {
        self.record_many(key, 1);
    }

    pub(crate) fn record_many(&mut self, key: String, n: usize) {
        *self.counts.entry(key).or_insert(0) += n;
    }

    /// Number of shots that produced `key`; zero if it never occurred.
    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates `(key, count)` in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// The key with the highest count. Ties resolve to the smallest key.
    pub fn most_frequent(&self) -> Option<&str> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, _)| k.as_str())
    }

    /// Relative frequency of `key`.
    pub fn frequency(&self, key: &str) -> f64 {
        let total = self.total();
        if total == 0 { 0.0 } else { self.get(key) as f64 / total as f64 }
    }
}

fn register_bits(reg: &ClassicalRegister, clbits: &[bool]) -> String {
    reg.clbits()
        .rev()
        .map(|c| if clbits.get(c.0).copied().unwrap_or(false) { '1' } else { '0' })
        .collect()
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, count)) in self.counts.iter().enumerate() {
            write!(f, "{}'{}': {}", if i > 0 { ", " } else { "" }, key, count)?;
        }
        write!(f, "}}")
    }
}

/// Outcome of a single run of a circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    state: StateVector,
    clbits: Vec<bool>,
    counts: Counts,
}

impl SimulationResult {
    pub(crate) fn new(state: StateVector, clbits: Vec<bool>, counts: Counts) -> Self {
        Self { state, clbits, counts }
    }

    /// State after the last operation, including any measurement collapse.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// All classical bits, indexed by `ClbitId`.
    pub fn clbits(&self) -> &[bool] {
        &self.clbits
    }

    pub fn clbit(&self, clbit: ClbitId) -> Option<bool> {
        self.clbits.get(clbit.0).copied()
    }

    /// Unsigned value of a register, bit `i` of the register weighted `2^i`.
    ///
    /// Registers wider than 64 bits do not fit and are rejected.
    pub fn register_value(&self, reg: &ClassicalRegister) -> Result<u64> {
        if reg.size() > u64::BITS as usize {
            return Err(QlError::InvalidArgument {
                message: format!("register '{}' has {} bits, at most 64 fit in a u64", reg.name(), reg.size()),
            });
        }
        reg.clbits().enumerate().try_fold(0u64, |acc, (i, c)| {
            let bit = self.clbit(c).ok_or(QlError::ClbitOutOfRange { clbit: c, num_clbits: self.clbits.len() })?;
            Ok(if bit { acc | (1u64 << i) } else { acc })
        })
    }

    /// Single-shot histogram for this run.
    pub fn counts(&self) -> &Counts {
        &self.counts
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        writeln!(f, "  counts: {}", self.counts)?;
        writeln!(f, "  statevector: {:.3}", self.state.rounded(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_list_registers_last_first() {
        let mut qc = Circuit::new();
        qc.add_qreg("q", 3);
        qc.add_creg("first", 1);
        qc.add_creg("second", 2);
        // first = 1, second = 0b10
        let key = Counts::key_for(&qc, &[true, false, true]);
        assert_eq!(key, "10 1");
    }

    #[test]
    fn display_matches_histogram_order() {
        let mut counts = Counts::new();
        counts.record_many("11".to_string(), 3);
        counts.record("00".to_string());
        assert_eq!(counts.to_string(), "{'00': 1, '11': 3}");
        assert_eq!(counts.most_frequent(), Some("11"));
        assert_eq!(counts.total(), 4);
        assert!((counts.frequency("11") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn most_frequent_breaks_ties_on_smallest_key() {
        let mut counts = Counts::new();
        counts.record("1".to_string());
        counts.record("0".to_string());
        assert_eq!(counts.most_frequent(), Some("0"));
    }

    #[test]
    fn register_value_reads_little_endian_bits() {
        let mut qc = Circuit::new();
        qc.add_qreg("q", 3);
        qc.add_creg("lo", 1);
        let hi = qc.add_creg("hi", 2);
        let result = SimulationResult::new(
            StateVector::zero_state(3),
            vec![true, false, true],
            Counts::new(),
        );
        assert_eq!(result.register_value(&hi).unwrap(), 0b10);
    }

    #[test]
    fn register_wider_than_u64_is_rejected() {
        let mut qc = Circuit::new();
        qc.add_qreg("q", 1);
        let wide = qc.add_creg("wide", 70);
        let mut clbits = vec![false; 70];
        clbits[69] = true;
        let result = SimulationResult::new(StateVector::zero_state(1), clbits, Counts::new());
        let err = result.register_value(&wide).unwrap_err();
        assert!(matches!(err, QlError::InvalidArgument { .. }));
    }

    #[test]
    fn sixty_four_bit_register_sets_top_bit() {
        let mut qc = Circuit::new();
        qc.add_qreg("q", 1);
        let full = qc.add_creg("full", 64);
        let mut clbits = vec![false; 64];
        clbits[63] = true;
        let result = SimulationResult::new(StateVector::zero_state(1), clbits, Counts::new());
        assert_eq!(result.register_value(&full).unwrap(), 1u64 << 63);
    }
}
