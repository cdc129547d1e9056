// src/demos/mod.rs

//! Quantum circuit lessons. Each lesson builds its circuit, runs it on a
//! [`Simulator`](crate::Simulator) supplied by the caller and returns a report
//! that prints the way the lesson presents its results.

pub mod bb84;
pub mod entanglement;
pub mod phase;
pub mod sqrt_not;
pub mod superposition;

pub use bb84::{ErrorRateEstimate, SpyHuntConfig, SpyHuntReport};
pub use entanglement::BellReport;
pub use phase::PhaseReport;
pub use sqrt_not::{MatrixAnalysis, SqrtNotReport};
pub use superposition::{ByteStatistics, RandomByte};
pub use swap_test::{OverlapEstimate, SwapTestReport};
