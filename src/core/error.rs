//! Identifiers and the crate error type

use std::fmt;

/// Index of a qubit within a circuit's flat qubit array.
///
/// Qubit `q` is bit `q` of a statevector basis index (little-endian), so
/// `QubitId(0)` is the rightmost character of a printed basis label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub usize);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    fn from(index: usize) -> Self {
        QubitId(index)
    }
}

/// Index of a classical bit within a circuit's flat classical-bit array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClbitId(pub usize);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<usize> for ClbitId {
    fn from(index: usize) -> Self {
        ClbitId(index)
    }
}

/// Errors raised while building, validating or simulating circuits, and
/// while configuring the classical experiments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QlError {
    /// The state vector lost its normalization.
    #[error("Incoherence: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// An operation references a qubit the circuit does not have.
    #[error("Qubit {qubit} out of range for a circuit with {num_qubits} qubits")]
    QubitOutOfRange {
        /// Offending qubit
        qubit: QubitId,
        /// Number of qubits in the circuit
        num_qubits: usize,
    },

    /// An operation references a classical bit the circuit does not have.
    #[error("Clbit {clbit} out of range for a circuit with {num_clbits} classical bits")]
    ClbitOutOfRange {
        /// Offending classical bit
        clbit: ClbitId,
        /// Number of classical bits in the circuit
        num_clbits: usize,
    },

    /// An operation is inconsistent with itself or with the circuit, such as a
    /// controlled gate whose control equals its target.
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// A caller-supplied parameter is outside its domain.
    #[error("Invalid Argument: {message}")]
    InvalidArgument {
        /// InvalidArgument failure message
        message: String,
    },

    /// General error encountered during the simulation process itself.
    #[error("Simulation Process Error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QlError>;
