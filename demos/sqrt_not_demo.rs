//! Square root of NOT built two ways, with the matrix algebra behind it.
//!
//! Run with `cargo run --example sqrt_not_demo`.

use qlessons::demos::sqrt_not::{self, DEFAULT_SHOTS};
use qlessons::{QlError, Simulator};

fn main() -> Result<(), QlError> {
    let mut sim = Simulator::new();
    let report = sqrt_not::sqrt_not(&mut sim, DEFAULT_SHOTS)?;
    println!("{}", report);

    println!("\n=== Summary ===");
    println!("• ROOTNOT is the square root of the NOT gate");
    println!("• Hadamard → Phase(-90°) → Hadamard gives SX†, the inverse square root");
    println!("• Hadamard → Phase(+90°) → Hadamard gives SX itself");
    println!("• Either one applied twice is a NOT gate");
    println!("• A single ROOTNOT creates a superposition with complex phases");
    Ok(())
}
