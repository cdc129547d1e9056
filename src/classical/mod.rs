// src/classical/mod.rs

//! Classical probability lessons: coin flips, bias estimation and a
//! two-state Markov chain.

pub mod coin;
pub mod markov;

pub use coin::{BiasEstimate, CoinSide, FlipTally};
pub use markov::{MarkovChain, MarkovReport};

/// Tunables of the coin lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinConfig {
    /// Heads probability of the biased coin, in percent.
    pub heads_percent: u32,
    /// Denominator `n` of the hidden bias `B / n`.
    pub bias_denominator: u32,
    /// Tosses used to estimate the hidden bias.
    pub bias_tosses: usize,
}

impl Default for CoinConfig {
    fn default() -> Self {
        Self {
            heads_percent: coin::DEFAULT_HEADS_PERCENT,
            bias_denominator: 101,
            bias_tosses: 500,
        }
    }
}
