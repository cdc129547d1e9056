//! Numeric constants shared by the simulator and the demos.

/// Tolerances and fixed values used across the crate
pub mod ql_constants {
    /// Amplitudes with squared magnitude below this are treated as zero.
    pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;
    /// Allowed deviation of the squared norm from 1.0.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Default tolerance for matrix and state comparisons.
    pub const COMPARE_TOLERANCE: f64 = 1e-8;
    /// Largest register the engine will allocate (2^24 amplitudes).
    pub const MAX_QUBITS: usize = 24;
    /// Used for phase angles (`e^(iθ)`)
    pub const PI: f64 = std::f64::consts::PI;
}
