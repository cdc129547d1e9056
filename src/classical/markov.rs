//! Two-state Markov chain over coin faces.
//!
//! Probability vectors are `[p_heads, p_tails]`. The transition matrix is
//! column-stochastic: column `j` holds the probabilities of leaving state `j`.

use crate::core::{QlError, Result};
use std::fmt;

const STOCHASTIC_TOLERANCE: f64 = 1e-9;

/// Default number of iterations.
pub const DEFAULT_STEPS: usize = 10;

/// Starting vector: the coin shows heads.
pub const START_HEADS: [f64; 2] = [1.0, 0.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkovChain {
    /// `transition[to][from]`
    transition: [[f64; 2]; 2],
}

impl Default for MarkovChain {
    /// heads→heads 0.6, heads→tails 0.4, tails→heads 0.3, tails→tails 0.7.
    fn default() -> Self {
        Self { transition: [[0.6, 0.3], [0.4, 0.7]] }
    }
}

impl MarkovChain {
    /// Builds a chain from `transition[to][from]`, rejecting entries outside
    /// `[0, 1]` and columns that do not sum to 1.
    pub fn new(transition: [[f64; 2]; 2]) -> Result<Self> {
        if transition.iter().flatten().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(QlError::InvalidArgument {
                message: format!("transition probabilities must lie in [0, 1]: {:?}", transition),
            });
        }
        for from in 0..2 {
            let sum = transition[0][from] + transition[1][from];
            if (sum - 1.0).abs() > STOCHASTIC_TOLERANCE {
                return Err(QlError::InvalidArgument {
                    message: format!("column {} of the transition matrix sums to {}, not 1", from, sum),
                });
            }
        }
        Ok(Self { transition })
    }

    pub fn transition(&self) -> [[f64; 2]; 2] {
        self.transition
    }

    /// One application of the transition matrix.
    pub fn step(&self, p: [f64; 2]) -> [f64; 2] {
        let t = &self.transition;
        [t[0][0] * p[0] + t[0][1] * p[1], t[1][0] * p[0] + t[1][1] * p[1]]
    }

    /// Applies `steps` transitions with no convergence check.
    pub fn iterate(&self, p: [f64; 2], steps: usize) -> [f64; 2] {
        (0..steps).fold(p, |acc, _| self.step(acc))
    }

    /// `p` followed by every intermediate vector, `steps + 1` entries in total.
    pub fn trajectory(&self, p: [f64; 2], steps: usize) -> Vec<[f64; 2]> {
        std::iter::successors(Some(p), |prev| Some(self.step(*prev)))
            .take(steps + 1)
            .collect()
    }

    /// Closed-form fixed point `p_h = t_th / (t_ht + t_th)`.
    ///
    /// Returns `None` for the identity chain, where every vector is
    /// stationary.
    pub fn stationary(&self) -> Option<[f64; 2]> {
        let heads_to_tails = self.transition[1][0];
        let tails_to_heads = self.transition[0][1];
        let leave = heads_to_tails + tails_to_heads;
        if leave <= STOCHASTIC_TOLERANCE {
            return None;
        }
        let heads = tails_to_heads / leave;
        Some([heads, 1.0 - heads])
    }

    /// Iterates until two successive vectors differ by less than `tolerance`
    /// in every component, or `max_steps` is reached.
    pub fn iterate_until(&self, p: [f64; 2], tolerance: f64, max_steps: usize) -> Convergence {
        let mut current = p;
        for steps in 1..=max_steps {
            let next = self.step(current);
            let delta = (next[0] - current[0]).abs().max((next[1] - current[1]).abs());
            current = next;
            if delta < tolerance {
                tracing::debug!(steps, delta, "markov chain converged");
                return Convergence { vector: current, steps, converged: true };
            }
        }
        Convergence { vector: current, steps: max_steps, converged: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    pub vector: [f64; 2],
    pub steps: usize,
    pub converged: bool,
}

/// Printable run of the chain: the trajectory and its limit.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkovReport {
    pub trajectory: Vec<[f64; 2]>,
    pub stationary: Option<[f64; 2]>,
}

impl MarkovReport {
    pub fn run(chain: &MarkovChain, start: [f64; 2], steps: usize) -> Self {
        Self {
            trajectory: chain.trajectory(start, steps),
            stationary: chain.stationary(),
        }
    }

    pub fn final_vector(&self) -> Option<[f64; 2]> {
        self.trajectory.last().copied()
    }
}

impl fmt::Display for MarkovReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.trajectory.iter().enumerate() {
            writeln!(f, "step {:>2}: heads = {:.6}  tails = {:.6}", i, p[0], p[1])?;
        }
        if let Some(p) = self.final_vector() {
            writeln!(f, "final state = [{}, {}]", p[0], p[1])?;
        }
        if let Some(s) = self.stationary {
            writeln!(f, "stationary  = [{:.6}, {:.6}]", s[0], s[1])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2], tol: f64) -> bool {
        (a[0] - b[0]).abs() < tol && (a[1] - b[1]).abs() < tol
    }

    #[test]
    fn first_steps_by_hand() {
        let chain = MarkovChain::default();
        let p1 = chain.step(START_HEADS);
        assert!(close(p1, [0.6, 0.4], 1e-12));
        let p2 = chain.step(p1);
        assert!(close(p2, [0.48, 0.52], 1e-12));
        let p3 = chain.step(p2);
        assert!(close(p3, [0.444, 0.556], 1e-12));
    }

    #[test]
    fn ten_steps_approach_three_sevenths() {
        let chain = MarkovChain::default();
        let p = chain.iterate(START_HEADS, DEFAULT_STEPS);
        assert!(close(p, [3.0 / 7.0, 4.0 / 7.0], 1e-4), "{:?}", p);
        assert!(close(chain.stationary().unwrap(), [3.0 / 7.0, 4.0 / 7.0], 1e-12));
    }

    #[test]
    fn trajectory_includes_start() {
        let t = MarkovChain::default().trajectory(START_HEADS, 3);
        assert_eq!(t.len(), 4);
        assert_eq!(t[0], START_HEADS);
    }

    #[test]
    fn iterate_until_stops_early() {
        let c = MarkovChain::default().iterate_until(START_HEADS, 1e-10, 1000);
        assert!(c.converged);
        assert!(c.steps < 100);
        assert!(close(c.vector, [3.0 / 7.0, 4.0 / 7.0], 1e-9));
    }

    #[test]
    fn rejects_non_stochastic_columns() {
        assert!(matches!(
            MarkovChain::new([[0.6, 0.3], [0.5, 0.7]]),
            Err(QlError::InvalidArgument { .. })
        ));
        assert!(MarkovChain::new([[1.2, 0.3], [-0.2, 0.7]]).is_err());
    }

    #[test]
    fn identity_chain_has_no_unique_limit() {
        let chain = MarkovChain::new([[1.0, 0.0], [0.0, 1.0]]).unwrap();
        assert_eq!(chain.stationary(), None);
        let c = chain.iterate_until([0.2, 0.8], 1e-6, 5);
        assert!(c.converged);
        assert_eq!(c.steps, 1);
    }
}
