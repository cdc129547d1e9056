//! BB84 with and without an eavesdropper, one round each and then error
//! statistics over many rounds.
//!
//! Run with `cargo run --example spy_hunter`.

use qlessons::demos::bb84::{self, SpyHuntConfig};
use qlessons::{QlError, Simulator};

const ROUNDS: usize = 2_000;

fn main() -> Result<(), QlError> {
    let mut sim = Simulator::new();

    let scenarios = [
        ("no spy", SpyHuntConfig { spy_present: false, ..SpyHuntConfig::default() }),
        ("spy in the Hadamard basis", SpyHuntConfig::default()),
        ("spy in the computational basis", SpyHuntConfig { spy_hadamard: false, ..SpyHuntConfig::default() }),
        ("spy with a random basis", SpyHuntConfig { spy_random_basis: true, ..SpyHuntConfig::default() }),
    ];

    for (name, config) in &scenarios {
        println!("=== {} ===", name);
        let round = bb84::spy_hunt(&mut sim, config, 1)?;
        println!("single round counts: {}", round.counts);
        println!("{}", if round.caught() { "Caught a spy!" } else { "No spies detected." });
        println!("{}", bb84::estimate_error_rate(&mut sim, config, ROUNDS)?);
    }
    Ok(())
}
