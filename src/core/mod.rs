// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

pub use error::{ClbitId, QlError, QubitId, Result};
pub use state::StateVector;

pub mod constants;
pub use constants::ql_constants::PI;
