// src/config.rs

//! Run-wide settings shared by every lesson.

use crate::simulation::Simulator;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Environment variable that supplies a seed when `--seed` is absent.
pub const SEED_ENV: &str = "QLESSONS_SEED";

/// Seed and sample-size overrides for a lesson run.
///
/// `shots` and `trials` are `None` unless the user overrides them; each lesson
/// then falls back to its own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DemoConfig {
    pub seed: Option<u64>,
    pub shots: Option<usize>,
    pub trials: Option<usize>,
}

impl DemoConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    pub fn shots_or(&self, default: usize) -> usize {
        self.shots.unwrap_or(default)
    }

    pub fn trials_or(&self, default: usize) -> usize {
        self.trials.unwrap_or(default)
    }

    /// Simulator seeded from `seed`, or from the OS.
    pub fn simulator(&self) -> Simulator {
        Simulator::from_seed_option(self.seed)
    }

    /// Classical generator seeded from `seed`, or from the OS.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
