// src/simulation/engine.rs
use crate::core::constants::ql_constants::{AMPLITUDE_TOLERANCE, MAX_QUBITS};
use crate::core::{ClbitId, QlError, QubitId, Result, StateVector};
use crate::operations::{Matrix2, Operation};
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;

/// Dense statevector engine for a single run of a circuit.
///
/// Holds the `2^n` amplitude vector and the classical bits. Unitary
/// operations are applied in place; measurement and reset sample from the
/// supplied RNG and collapse the state.
#[derive(Debug)]
pub(crate) struct SimulationEngine {
    state: StateVector,
    clbits: Vec<bool>,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes `|0...0>` on `num_qubits` qubits with every classical bit 0.
    pub(crate) fn init(num_qubits: usize, num_clbits: usize) -> Result<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(QlError::SimulationError {
                message: format!(
                    "{} qubits requested, the statevector engine supports at most {}",
                    num_qubits, MAX_QUBITS
                ),
            });
        }
        Ok(Self {
            state: StateVector::zero_state(num_qubits),
            clbits: vec![false; num_clbits],
            num_qubits,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<()> {
        if state.dim() != self.state.dim() {
            Err(QlError::SimulationError {
                message: format!(
                    "Cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            })
        } else {
            self.state = state;
            Ok(())
        }
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_parts(self) -> (StateVector, Vec<bool>) {
        (self.state, self.clbits)
    }

    pub(crate) fn clbits(&self) -> &[bool] {
        &self.clbits
    }

    /// Executes any operation, sampling from `rng` where the operation is
    /// non-unitary.
    pub(crate) fn execute<R: Rng>(&mut self, op: &Operation, rng: &mut R) -> Result<()> {
        match op {
            Operation::Measure { qubit, clbit } => {
                let outcome = self.measure(*qubit, rng)?;
                self.write_clbit(*clbit, outcome)?;
            }
            Operation::Reset { qubit } => self.reset(*qubit, rng)?,
            Operation::Conditional { clbit, value, op } => {
                let current = self.read_clbit(*clbit)?;
                if current == *value {
                    tracing::trace!(clbit = clbit.0, value = *value, "condition met");
                    self.execute(op, rng)?;
                } else {
                    tracing::trace!(clbit = clbit.0, value = *value, "condition not met, skipping");
                }
            }
            unitary => self.apply_unitary(unitary)?,
        }
        Ok(())
    }

    /// Applies a unitary operation to the state. Non-unitary operations are
    /// rejected.
    pub(crate) fn apply_unitary(&mut self, op: &Operation) -> Result<()> {
        match op {
            Operation::Gate { gate, target } => {
                let t = self.index(*target)?;
                self.apply_single_qubit_gate(t, &gate.matrix(), 0);
            }
            Operation::Controlled { gate, control, target } => {
                let c = self.index(*control)?;
                let t = self.index(*target)?;
                if c == t {
                    return Err(QlError::InvalidOperation {
                        message: "Control and target qubits cannot be the same for a controlled gate".to_string(),
                    });
                }
                self.apply_single_qubit_gate(t, &gate.matrix(), 1 << c);
            }
            Operation::Swap { a, b } => {
                let (a, b) = (self.index(*a)?, self.index(*b)?);
                self.apply_swap(a, b, 0)?;
            }
            Operation::ControlledSwap { control, a, b } => {
                let c = self.index(*control)?;
                let (a, b) = (self.index(*a)?, self.index(*b)?);
                if c == a || c == b {
                    return Err(QlError::InvalidOperation {
                        message: "Control qubit of a controlled swap cannot be one of the swapped qubits".to_string(),
                    });
                }
                self.apply_swap(a, b, 1 << c)?;
            }
            Operation::Barrier { .. } => {}
            other => {
                return Err(QlError::InvalidOperation {
                    message: format!("{:?} is not a unitary operation", other),
                });
            }
        }
        tracing::trace!(?op, "applied");
        Ok(())
    }

    /// Projectively measures `qubit` in the computational basis and
    /// renormalizes the post-measurement state.
    pub(crate) fn measure<R: Rng>(&mut self, qubit: QubitId, rng: &mut R) -> Result<bool> {
        let q = self.index(qubit)?;
        let p_one = self.state.probability_of_one(q);
        let outcome = rng.random::<f64>() < p_one;
        let p_outcome = if outcome { p_one } else { 1.0 - p_one };
        if p_outcome <= AMPLITUDE_TOLERANCE {
            return Err(QlError::Incoherence {
                message: format!("Measurement of {} selected an outcome with probability {:e}", qubit, p_outcome),
            });
        }

        let mask = 1usize << q;
        let norm = p_outcome.sqrt();
        for (k, amp) in self.state.vector_mut().iter_mut().enumerate() {
            if (k & mask != 0) == outcome {
                *amp /= norm;
            } else {
                *amp = Complex::zero();
            }
        }
        tracing::debug!(qubit = q, outcome, p_one, "measured");
        Ok(outcome)
    }

    /// Returns `qubit` to `|0>`: measure, then flip if the outcome was 1.
    pub(crate) fn reset<R: Rng>(&mut self, qubit: QubitId, rng: &mut R) -> Result<()> {
        if self.measure(qubit, rng)? {
            let q = self.index(qubit)?;
            self.apply_single_qubit_gate(q, &crate::operations::Gate::X.matrix(), 0);
        }
        Ok(())
    }

    fn read_clbit(&self, clbit: ClbitId) -> Result<bool> {
        self.clbits.get(clbit.0).copied().ok_or(QlError::ClbitOutOfRange {
            clbit,
            num_clbits: self.clbits.len(),
        })
    }

    fn write_clbit(&mut self, clbit: ClbitId, value: bool) -> Result<()> {
        let num_clbits = self.clbits.len();
        let slot = self
            .clbits
            .get_mut(clbit.0)
            .ok_or(QlError::ClbitOutOfRange { clbit, num_clbits })?;
        *slot = value;
        Ok(())
    }

    /// Helper to get a qubit's bit position, returning a specific error if
    /// it does not exist.
    fn index(&self, qubit: QubitId) -> Result<usize> {
        if qubit.0 < self.num_qubits {
            Ok(qubit.0)
        } else {
            Err(QlError::QubitOutOfRange { qubit, num_qubits: self.num_qubits })
        }
    }

    /// Applies a 2x2 matrix to qubit `target` on every basis pair whose
    /// control bits (`control_mask`) are all set. A zero mask is unconditional.
    fn apply_single_qubit_gate(&mut self, target: usize, matrix: &Matrix2, control_mask: usize) {
        let t_mask = 1usize << target;
        let amps = self.state.vector_mut();
        for i0 in 0..amps.len() {
            if i0 & t_mask != 0 || i0 & control_mask != control_mask {
                continue;
            }
            let i1 = i0 | t_mask;
            let [psi_0, psi_1] = matrix.apply([amps[i0], amps[i1]]);
            amps[i0] = psi_0;
            amps[i1] = psi_1;
        }
    }

    /// Exchanges qubits `a` and `b` on every basis state whose control bits
    /// are set.
    fn apply_swap(&mut self, a: usize, b: usize, control_mask: usize) -> Result<()> {
        if a == b {
            return Err(QlError::InvalidOperation {
                message: "Swap requires two distinct qubits".to_string(),
            });
        }
        let (a_mask, b_mask) = (1usize << a, 1usize << b);
        let amps = self.state.vector_mut();
        for k in 0..amps.len() {
            // Visit each pair once: from the member with a=1, b=0.
            if k & a_mask != 0 && k & b_mask == 0 && k & control_mask == control_mask {
                amps.swap(k, k ^ a_mask ^ b_mask);
            }
        }
        Ok(())
    }
}
