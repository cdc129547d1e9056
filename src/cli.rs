// src/cli.rs

//! Command-line front end: one subcommand per lesson.

use crate::classical::coin::{self, DEFAULT_EXPERIMENT_SIZES};
use crate::classical::markov::{self, MarkovChain, MarkovReport};
use crate::classical::CoinConfig;
use crate::config::{DemoConfig, SEED_ENV};
use crate::core::{PI, Result};
use crate::demos::{bb84, entanglement, phase, sqrt_not, superposition, swap_test};
use crate::operations::Gate;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser, Debug)]
#[command(name = "qlessons", version, about = "Probability and quantum-circuit lessons")]
pub struct Cli {
    #[arg(long, global = true, env = SEED_ENV, help = "Seed for every random draw of the run")]
    pub seed: Option<u64>,
    #[arg(long, global = true, help = "Override the lesson's shot count")]
    pub shots: Option<usize>,
    #[arg(long, global = true, help = "Override the lesson's trial, step or sample count")]
    pub trials: Option<usize>,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_LOG_LEVEL,
        help = "Log filter used when RUST_LOG is unset"
    )]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fair coin ratio over growing trial counts
    CoinFlip,
    /// Biased coin ratio over growing trial counts
    BiasedCoin {
        #[arg(long, default_value_t = coin::DEFAULT_HEADS_PERCENT, value_parser = clap::value_parser!(u32).range(0..=100))]
        heads_percent: u32,
    },
    /// Guess a hidden coin bias from its tosses
    BiasEstimate {
        #[arg(long, default_value_t = 101, value_parser = clap::value_parser!(u32).range(1..))]
        denominator: u32,
    },
    /// Iterate the two-state coin Markov chain
    Markov {
        #[arg(long, help = "Stop once successive vectors differ by less than this")]
        tolerance: Option<f64>,
    },
    /// One random bit from a Hadamard
    RandomBit,
    /// A random byte and sample statistics
    RandomByte,
    /// Statevector of two independent superpositions
    Separable,
    /// Bell pair measurement counts
    Entangled,
    /// Controlled phases on a |0> target
    PhaseKickback,
    /// Conditional phase from Rz and CX, then CRz
    ConditionalPhase {
        #[arg(long, default_value_t = PI / 2.0, allow_hyphen_values = true)]
        theta: f64,
    },
    /// BB84 eavesdropper detection
    SpyHunter {
        #[arg(long, default_value_t = false)]
        no_spy: bool,
        #[arg(
            long,
            default_value_t = false,
            conflicts_with = "spy_random_basis",
            help = "Spy measures in the computational basis"
        )]
        spy_computational: bool,
        #[arg(long, default_value_t = false, help = "Spy picks a random basis every round")]
        spy_random_basis: bool,
        #[arg(long, help = "Also estimate the error rate over this many rounds")]
        rounds: Option<usize>,
    },
    /// Swap test of two |0> inputs
    SwapTest {
        #[arg(long, value_enum, help = "Also estimate the overlap of input1 with this state")]
        overlap_with: Option<PrepState>,
    },
    /// Square root of NOT, by hand and with SX
    SqrtNot,
}

/// Single-qubit states the swap test can compare against `|0>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PrepState {
    Zero,
    One,
    Plus,
    Minus,
}

impl PrepState {
    pub fn gates(self) -> &'static [Gate] {
        match self {
            PrepState::Zero => &[],
            PrepState::One => &[Gate::X],
            PrepState::Plus => &[Gate::H],
            PrepState::Minus => &[Gate::X, Gate::H],
        }
    }
}

impl Cli {
    pub fn demo_config(&self) -> DemoConfig {
        DemoConfig {
            seed: self.seed,
            shots: self.shots,
            trials: self.trials,
        }
    }
}

/// Runs `command` and returns the text to print.
pub fn run(command: &Commands, config: &DemoConfig) -> Result<String> {
    let mut out = String::new();
    match command {
        Commands::CoinFlip => {
            let mut rng = config.rng();
            for tally in coin::experiment_series(&mut rng, &experiment_sizes(config), |r| coin::flip_fair(r)) {
                push(&mut out, tally);
            }
        }
        Commands::BiasedCoin { heads_percent } => {
            let mut rng = config.rng();
            let p = *heads_percent;
            for tally in coin::experiment_series(&mut rng, &experiment_sizes(config), |r| coin::flip_biased(r, p)) {
                push(&mut out, tally);
            }
        }
        Commands::BiasEstimate { denominator } => {
            let defaults = CoinConfig::default();
            let tosses = config.trials_or(defaults.bias_tosses);
            let estimate = coin::estimate_bias(&mut config.rng(), *denominator, tosses)?;
            push(&mut out, estimate);
        }
        Commands::Markov { tolerance } => {
            let chain = MarkovChain::default();
            match tolerance {
                Some(tol) => {
                    let c = chain.iterate_until(markov::START_HEADS, *tol, config.trials_or(1_000));
                    let _ = writeln!(
                        out,
                        "after {} steps (converged: {}): [{}, {}]",
                        c.steps, c.converged, c.vector[0], c.vector[1]
                    );
                }
                None => {
                    let steps = config.trials_or(markov::DEFAULT_STEPS);
                    push(&mut out, MarkovReport::run(&chain, markov::START_HEADS, steps));
                }
            }
        }
        Commands::RandomBit => {
            let bit = superposition::random_bit(&mut config.simulator())?;
            let _ = writeln!(out, "Random bit: {}", bit);
        }
        Commands::RandomByte => {
            let mut sim = config.simulator();
            out.push_str("=== Quantum Random Byte Generator ===\n");
            push(&mut out, superposition::random_byte(&mut sim)?);
            let _ = writeln!(out, "\n{}\n", "=".repeat(50));
            out.push_str("Generating random bytes using quantum superposition...\n\n");
            let samples = config.trials_or(100);
            push(&mut out, superposition::byte_statistics(&mut sim, samples)?);
        }
        Commands::Separable => {
            let state = superposition::separable_state(&mut config.simulator())?;
            out.push_str("Quantum Statevector:\n");
            let _ = writeln!(out, "{}", state);
        }
        Commands::Entangled => {
            let shots = config.shots_or(entanglement::DEFAULT_SHOTS);
            push(&mut out, entanglement::bell_pair(&mut config.simulator(), shots)?);
        }
        Commands::PhaseKickback => {
            push(&mut out, phase::phase_kickback(&mut config.simulator())?);
        }
        Commands::ConditionalPhase { theta } => {
            push(&mut out, phase::conditional_phase(&mut config.simulator(), *theta)?);
        }
        Commands::SpyHunter {
            no_spy,
            spy_computational,
            spy_random_basis,
            rounds,
        } => {
            let spy = bb84::SpyHuntConfig {
                spy_present: !no_spy,
                spy_hadamard: !spy_computational,
                spy_random_basis: *spy_random_basis,
            };
            let mut sim = config.simulator();
            push(&mut out, bb84::spy_hunt(&mut sim, &spy, config.shots_or(1))?);
            if let Some(rounds) = rounds {
                out.push('\n');
                push(&mut out, bb84::estimate_error_rate(&mut sim, &spy, *rounds)?);
            }
        }
        Commands::SwapTest { overlap_with } => {
            let mut sim = config.simulator();
            push(&mut out, swap_test::swap_test(&mut sim)?);
            if let Some(state) = overlap_with {
                let shots = config.shots_or(1000);
                let estimate = swap_test::swap_test_overlap(&mut sim, &[], state.gates(), shots)?;
                out.push('\n');
                push(&mut out, estimate);
                let _ = writeln!(
                    out,
                    "exact |<a|b>|²:     {:.4}",
                    swap_test::exact_overlap(&[], state.gates())
                );
            }
        }
        Commands::SqrtNot => {
            let shots = config.shots_or(sqrt_not::DEFAULT_SHOTS);
            push(&mut out, sqrt_not::sqrt_not(&mut config.simulator(), shots)?);
        }
    }
    Ok(out)
}

fn experiment_sizes(config: &DemoConfig) -> Vec<usize> {
    match config.trials {
        Some(n) => vec![n],
        None => DEFAULT_EXPERIMENT_SIZES.to_vec(),
    }
}

fn push(out: &mut String, item: impl std::fmt::Display) {
    let _ = write!(out, "{}", item);
    if !out.ends_with('\n') {
        out.push('\n');
    }
}
