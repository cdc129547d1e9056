//! Monte Carlo coin-flip estimators.

use crate::core::{QlError, Result};
use rand::Rng;
use std::fmt;

/// Trial sizes used by the coin-flip lessons.
pub const DEFAULT_EXPERIMENT_SIZES: [usize; 4] = [100, 1_000, 10_000, 100_000];

/// Heads probability, in percent, of the biased coin.
pub const DEFAULT_HEADS_PERCENT: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoinSide {
    Heads,
    Tails,
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinSide::Heads => write!(f, "Heads"),
            CoinSide::Tails => write!(f, "Tails"),
        }
    }
}

/// Fair coin: heads when a uniform draw from `{0, 1}` is 0.
pub fn flip_fair<R: Rng>(rng: &mut R) -> CoinSide {
    if rng.random_range(0..2u32) == 0 { CoinSide::Heads } else { CoinSide::Tails }
}

/// Biased coin: heads when a uniform draw from `0..100` is below
/// `heads_percent`.
pub fn flip_biased<R: Rng>(rng: &mut R, heads_percent: u32) -> CoinSide {
    if rng.random_range(0..100u32) < heads_percent { CoinSide::Heads } else { CoinSide::Tails }
}

/// Coin with a bias of `bias_numerator / denominator`: heads when a uniform
/// draw from `0..denominator` is below `bias_numerator`.
pub fn flip_with_bias<R: Rng>(rng: &mut R, denominator: u32, bias_numerator: u32) -> CoinSide {
    if rng.random_range(0..denominator) < bias_numerator { CoinSide::Heads } else { CoinSide::Tails }
}

/// Tally of one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipTally {
    pub trials: usize,
    pub heads: usize,
    pub tails: usize,
}

impl FlipTally {
    /// `heads / tails`, or `None` when no tails were thrown.
    pub fn ratio(&self) -> Option<f64> {
        (self.tails > 0).then(|| self.heads as f64 / self.tails as f64)
    }

    /// Fraction of trials that came up heads.
    pub fn heads_fraction(&self) -> f64 {
        if self.trials == 0 { 0.0 } else { self.heads as f64 / self.trials as f64 }
    }
}

impl fmt::Display for FlipTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "experiment: {}", self.trials)?;
        writeln!(f, "heads = {}   tails = {}", self.heads, self.tails)?;
        match self.ratio() {
            Some(r) => writeln!(f, "the ratio of #heads/#tails is {}", round4(r)),
            None => writeln!(f, "the ratio of #heads/#tails is undefined (no tails)"),
        }
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Runs `trials` flips of `flip` and counts both sides.
pub fn run_experiment<R, F>(rng: &mut R, trials: usize, mut flip: F) -> FlipTally
where
    R: Rng,
    F: FnMut(&mut R) -> CoinSide,
{
    let heads = (0..trials).filter(|_| flip(rng) == CoinSide::Heads).count();
    FlipTally { trials, heads, tails: trials - heads }
}

/// One experiment per entry of `sizes`, in order.
pub fn experiment_series<R, F>(rng: &mut R, sizes: &[usize], mut flip: F) -> Vec<FlipTally>
where
    R: Rng,
    F: FnMut(&mut R) -> CoinSide,
{
    sizes.iter().map(|&n| run_experiment(rng, n, &mut flip)).collect()
}

/// Result of guessing a hidden coin bias from its toss frequencies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasEstimate {
    pub denominator: u32,
    pub hidden_numerator: u32,
    pub tosses: usize,
    pub heads: usize,
}

impl BiasEstimate {
    pub fn guess(&self) -> f64 {
        self.heads as f64 / self.tosses as f64
    }

    pub fn real_bias(&self) -> f64 {
        self.hidden_numerator as f64 / self.denominator as f64
    }

    /// `|guess - real| / real * 100`, or `None` for a coin that never shows
    /// heads.
    pub fn error_percent(&self) -> Option<f64> {
        let real = self.real_bias();
        (real > 0.0).then(|| (self.guess() - real).abs() / real * 100.0)
    }
}

impl fmt::Display for BiasEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "my guess is {}", self.guess())?;
        writeln!(f, "real bias is {}", self.real_bias())?;
        match self.error_percent() {
            Some(e) => writeln!(f, "error (%) is {}", e),
            None => writeln!(f, "error (%) is undefined (real bias is 0)"),
        }
    }
}

/// Draws a hidden bias `B` uniformly from `0..=denominator`, tosses a coin of
/// bias `B / denominator` `tosses` times, and reports the frequency estimate.
pub fn estimate_bias<R: Rng>(rng: &mut R, denominator: u32, tosses: usize) -> Result<BiasEstimate> {
    if denominator == 0 {
        return Err(QlError::InvalidArgument {
            message: "bias denominator must be positive".to_string(),
        });
    }
    if tosses == 0 {
        return Err(QlError::InvalidArgument {
            message: "at least one toss is required to estimate a bias".to_string(),
        });
    }
    let hidden_numerator = rng.random_range(0..=denominator);
    let heads = (0..tosses)
        .filter(|_| flip_with_bias(rng, denominator, hidden_numerator) == CoinSide::Heads)
        .count();
    tracing::debug!(hidden_numerator, heads, tosses, "bias estimated");
    Ok(BiasEstimate { denominator, hidden_numerator, tosses, heads })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn ratio_undefined_without_tails() {
        let tally = FlipTally { trials: 3, heads: 3, tails: 0 };
        assert_eq!(tally.ratio(), None);
        assert!(tally.to_string().contains("undefined"));
    }

    #[test]
    fn tally_display_rounds_to_four_places() {
        let tally = FlipTally { trials: 10, heads: 7, tails: 3 };
        assert!(tally.to_string().contains("the ratio of #heads/#tails is 2.3333"));
    }

    #[test]
    fn extreme_biases_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!((0..200).all(|_| flip_biased(&mut rng, 100) == CoinSide::Heads));
        assert!((0..200).all(|_| flip_biased(&mut rng, 0) == CoinSide::Tails));
    }

    #[test]
    fn series_follows_requested_sizes() {
        let mut rng = StdRng::seed_from_u64(8);
        let series = experiment_series(&mut rng, &[10, 20], |r| flip_fair(r));
        assert_eq!(series.iter().map(|t| t.trials).collect::<Vec<_>>(), vec![10, 20]);
        assert!(series.iter().all(|t| t.heads + t.tails == t.trials));
    }

    #[test]
    fn zero_bias_has_no_error_percent() {
        let estimate = BiasEstimate { denominator: 101, hidden_numerator: 0, tosses: 500, heads: 0 };
        assert_eq!(estimate.error_percent(), None);
    }

    #[test]
    fn estimate_rejects_degenerate_arguments() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(estimate_bias(&mut rng, 0, 10).is_err());
        assert!(estimate_bias(&mut rng, 101, 0).is_err());
    }
}
