// src/validation/mod.rs

//! Checks on states and matrices: normalization, approximate equality, and
//! equality up to a global phase.

use crate::core::constants::ql_constants::{AMPLITUDE_TOLERANCE, NORM_TOLERANCE};
use crate::core::{QlError, Result, StateVector};
use crate::operations::Matrix2;
use num_complex::Complex;

/// Checks that the squared norm of `state` is 1 within `tolerance`
/// (default [`NORM_TOLERANCE`]).
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QlError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(QlError::Incoherence {
            message: format!(
                "State vector norm squared ({}) deviates from 1.0 by more than tolerance ({})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Component-wise comparison of two states.
pub fn states_approx_equal(a: &StateVector, b: &StateVector, tolerance: f64) -> bool {
    a.dim() == b.dim()
        && a
            .vector()
            .iter()
            .zip(b.vector())
            .all(|(x, y)| (x - y).norm_sqr() <= tolerance * tolerance)
}

pub fn matrices_approx_equal(a: &Matrix2, b: &Matrix2, tolerance: f64) -> bool {
    a.approx_eq(b, tolerance)
}

/// Whether `a = e^{iφ} b` for some real φ, within `tolerance`.
///
/// The phase is taken from the largest entry of `b`, so the check is
/// insensitive to which entries happen to be zero.
pub fn equal_up_to_global_phase(a: &Matrix2, b: &Matrix2, tolerance: f64) -> bool {
    let pivot = b
        .0
        .iter()
        .flatten()
        .zip(a.0.iter().flatten())
        .max_by(|x, y| x.0.norm_sqr().total_cmp(&y.0.norm_sqr()));
    let Some((b_pivot, a_pivot)) = pivot else {
        return false;
    };
    if b_pivot.norm_sqr() < AMPLITUDE_TOLERANCE || a_pivot.norm_sqr() < AMPLITUDE_TOLERANCE {
        return false;
    }
    let ratio: Complex<f64> = a_pivot / b_pivot;
    if (ratio.norm() - 1.0).abs() > tolerance {
        return false;
    }
    a.approx_eq(&b.scale(ratio), tolerance)
}
