//! Randomness from superposition: one bit, one byte, and a product state.

use crate::circuits::Circuit;
use crate::core::{QlError, Result, StateVector};
use crate::simulation::Simulator;
use std::fmt;

/// Number of samples whose bytes are printed individually.
const SHOWN_SAMPLES: usize = 10;
const HISTOGRAM_BINS: usize = 16;
const HISTOGRAM_WIDTH: usize = 40;

/// Expected mean of a uniform byte.
pub const EXPECTED_BYTE_MEAN: f64 = 127.5;

pub fn random_bit_circuit() -> Circuit {
    let mut qc = Circuit::with_size(1, 1);
    qc.h(0).measure(0, 0);
    qc
}

/// One shot of `H` then measure.
pub fn random_bit(sim: &mut Simulator) -> Result<u8> {
    let counts = sim.run_shots(&random_bit_circuit(), 1)?;
    let bit = u8::from(counts.keys().next() == Some("1"));
    tracing::info!(bit, "random bit drawn");
    Ok(bit)
}

pub fn random_byte_circuit() -> Circuit {
    let mut qc = Circuit::with_size(8, 8);
    for q in 0..8 {
        qc.h(q);
    }
    for q in 0..8 {
        qc.measure(q, q);
    }
    qc
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomByte {
    pub value: u8,
}

impl RandomByte {
    /// Bitstring with clbit 7 first, as the counts key reads.
    pub fn binary(&self) -> String {
        format!("{:08b}", self.value)
    }
}

impl fmt::Display for RandomByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generated random byte:")?;
        writeln!(f, "Binary:  {}", self.binary())?;
        writeln!(f, "Decimal: {}", self.value)?;
        writeln!(f, "Hex:     0x{:02X}", self.value)
    }
}

/// Eight Hadamards measured once.
pub fn random_byte(sim: &mut Simulator) -> Result<RandomByte> {
    let circuit = random_byte_circuit();
    let reg = circuit.creg("c").ok_or_else(|| QlError::SimulationError {
        message: "random byte circuit has no classical register 'c'".to_string(),
    })?;
    let raw = sim.run(&circuit)?.register_value(reg)?;
    let value = u8::try_from(raw).map_err(|_| QlError::SimulationError {
        message: format!("register value {} does not fit in a byte", raw),
    })?;
    Ok(RandomByte { value })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ByteStatistics {
    pub samples: Vec<u8>,
}

impl ByteStatistics {
    pub fn min(&self) -> Option<u8> {
        self.samples.iter().copied().min()
    }

    pub fn max(&self) -> Option<u8> {
        self.samples.iter().copied().max()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: u64 = self.samples.iter().map(|&b| u64::from(b)).sum();
        Some(sum as f64 / self.samples.len() as f64)
    }

    /// Sample counts in 16 equal-width bins over `0..=255`.
    pub fn histogram(&self) -> [usize; HISTOGRAM_BINS] {
        let mut bins = [0usize; HISTOGRAM_BINS];
        for &b in &self.samples {
            bins[usize::from(b) / (256 / HISTOGRAM_BINS)] += 1;
        }
        bins
    }
}

impl fmt::Display for ByteStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.samples.iter().take(SHOWN_SAMPLES).enumerate() {
            writeln!(f, "Sample {:2}: Binary: {:08b} → Decimal: {:3}", i + 1, b, b)?;
        }
        writeln!(f)?;
        writeln!(f, "Statistics for {} samples:", self.samples.len())?;
        if let (Some(min), Some(max), Some(mean)) = (self.min(), self.max(), self.mean()) {
            writeln!(f, "Min: {}", min)?;
            writeln!(f, "Max: {}", max)?;
            writeln!(f, "Average: {:.2}", mean)?;
        }
        writeln!(f, "Expected average for uniform distribution: {}", EXPECTED_BYTE_MEAN)?;

        let bins = self.histogram();
        let peak = bins.iter().copied().max().unwrap_or(0).max(1);
        writeln!(f)?;
        writeln!(f, "Distribution of quantum random bytes:")?;
        let width = 256 / HISTOGRAM_BINS;
        for (i, &n) in bins.iter().enumerate() {
            let bar = "#".repeat(n * HISTOGRAM_WIDTH / peak);
            writeln!(f, "{:3}-{:3} | {:<w$} {}", i * width, i * width + width - 1, bar, n, w = HISTOGRAM_WIDTH)?;
        }
        Ok(())
    }
}

/// Draws `samples` independent random bytes.
pub fn byte_statistics(sim: &mut Simulator, samples: usize) -> Result<ByteStatistics> {
    let samples = (0..samples)
        .map(|_| random_byte(sim).map(|b| b.value))
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(samples = samples.len(), "random byte statistics collected");
    Ok(ByteStatistics { samples })
}

pub fn separable_circuit() -> Circuit {
    let mut qc = Circuit::with_size(3, 0);
    qc.h(1).h(2);
    qc
}

/// Statevector of `H` on qubits 1 and 2 of a three-qubit register.
pub fn separable_state(sim: &mut Simulator) -> Result<StateVector> {
    sim.statevector(&separable_circuit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bit_is_binary() {
        let mut sim = Simulator::with_seed(12);
        for _ in 0..20 {
            assert!(random_bit(&mut sim).unwrap() <= 1);
        }
    }

    #[test]
    fn random_byte_matches_measured_clbits() {
        let circuit = random_byte_circuit();
        let mut expected_sim = Simulator::with_seed(31);
        let run = expected_sim.run(&circuit).unwrap();
        let expected = run
            .clbits()
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &b)| if b { acc | (1 << i) } else { acc });

        let byte = random_byte(&mut Simulator::with_seed(31)).unwrap();
        assert_eq!(byte.value, expected);
        assert_eq!(byte.binary(), run.counts().keys().next().unwrap());
    }

    #[test]
    fn byte_report_formats() {
        let byte = RandomByte { value: 0b1010_0001 };
        let text = byte.to_string();
        assert!(text.contains("Binary:  10100001"));
        assert!(text.contains("Decimal: 161"));
        assert!(text.contains("Hex:     0xA1"));
    }

    #[test]
    fn histogram_bins_cover_every_sample() {
        let stats = ByteStatistics { samples: vec![0, 15, 16, 255, 128] };
        let bins = stats.histogram();
        assert_eq!(bins[0], 2);
        assert_eq!(bins[1], 1);
        assert_eq!(bins[8], 1);
        assert_eq!(bins[15], 1);
        assert_eq!(bins.iter().sum::<usize>(), 5);
    }

    #[test]
    fn empty_statistics_have_no_mean() {
        let stats = ByteStatistics { samples: Vec::new() };
        assert_eq!(stats.mean(), None);
        assert!(stats.to_string().contains("Statistics for 0 samples"));
    }

    #[test]
    fn separable_amplitudes() {
        let state = separable_state(&mut Simulator::with_seed(0)).unwrap();
        for (k, amp) in state.vector().iter().enumerate() {
            let expected = if k % 2 == 0 { 0.5 } else { 0.0 };
            assert!((amp.re - expected).abs() < 1e-12 && amp.im.abs() < 1e-12, "index {k}");
        }
    }
}
