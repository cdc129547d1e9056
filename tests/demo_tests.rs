// tests/demo_tests.rs

use qlessons::demos::bb84::{self, SpyHuntConfig, INTERCEPT_RESEND_ERROR_RATE};
use qlessons::demos::{entanglement, phase, sqrt_not, superposition, swap_test};
use qlessons::{Gate, QlError, Simulator};

#[test]
fn test_bell_pair_is_correlated() -> Result<(), QlError> {
    let report = entanglement::bell_pair(&mut Simulator::with_seed(31), 1024)?;
    let keys: Vec<&str> = report.counts.keys().collect();
    assert_eq!(keys, vec!["0 0", "1 1"]);
    assert_eq!(report.counts.total(), 1024);
    Ok(())
}

#[test]
fn test_separable_and_kickback_amplitudes() -> Result<(), QlError> {
    let mut sim = Simulator::with_seed(0);
    let separable = superposition::separable_state(&mut sim)?;
    let kickback = phase::phase_kickback(&mut sim)?.state;
    for k in 0..8 {
        let expected_sep = if k % 2 == 0 { 0.5 } else { 0.0 };
        let expected_kick = if k < 4 { 0.5 } else { 0.0 };
        assert!((separable.vector()[k].re - expected_sep).abs() < 1e-9);
        assert!((kickback.vector()[k].re - expected_kick).abs() < 1e-9);
        assert!(kickback.vector()[k].im.abs() < 1e-9);
    }
    Ok(())
}

#[test]
fn test_conditional_phase_report_prints_three_decimals() -> Result<(), QlError> {
    let report = phase::conditional_phase(&mut Simulator::with_seed(0), std::f64::consts::PI / 2.0)?;
    let first_line = report.to_string().lines().next().unwrap_or_default().to_string();
    assert!(first_line.starts_with('[') && first_line.ends_with(']'));
    assert_eq!(first_line.matches(", ").count(), 3);
    assert_eq!(first_line, "[0.462+0.191i, -0.191-0.462i, 0.462+0.191i, 0.191+0.462i]");
    Ok(())
}

#[test]
fn test_byte_statistics_are_plausible() -> Result<(), QlError> {
    let stats = superposition::byte_statistics(&mut Simulator::with_seed(99), 400)?;
    let mean = stats.mean().unwrap_or_default();
    assert!((mean - superposition::EXPECTED_BYTE_MEAN).abs() < 20.0, "mean {}", mean);
    assert!(stats.to_string().contains("Expected average for uniform distribution: 127.5"));
    Ok(())
}

#[test]
fn test_spy_hunter_without_spy_never_catches() -> Result<(), QlError> {
    let config = SpyHuntConfig { spy_present: false, ..SpyHuntConfig::default() };
    let mut sim = Simulator::with_seed(4);
    for _ in 0..50 {
        let report = bb84::spy_hunt(&mut sim, &config, 1)?;
        assert!(!report.caught());
        assert!(report.to_string().contains("No spies detected."));
    }
    Ok(())
}

#[test]
fn test_hadamard_spy_error_rate_near_quarter() -> Result<(), QlError> {
    let estimate = bb84::estimate_error_rate(&mut Simulator::with_seed(2718), &SpyHuntConfig::default(), 4000)?;
    let rate = estimate.error_rate().unwrap();
    assert!((rate - INTERCEPT_RESEND_ERROR_RATE).abs() < 0.04, "rate {}", rate);
    Ok(())
}

#[test]
fn test_random_basis_spy_error_rate_near_quarter() -> Result<(), QlError> {
    let config = SpyHuntConfig { spy_random_basis: true, ..SpyHuntConfig::default() };
    let estimate = bb84::estimate_error_rate(&mut Simulator::with_seed(161), &config, 4000)?;
    let rate = estimate.error_rate().unwrap();
    assert!((rate - INTERCEPT_RESEND_ERROR_RATE).abs() < 0.04, "rate {}", rate);
    Ok(())
}

#[test]
fn test_spy_is_eventually_caught() -> Result<(), QlError> {
    let report = bb84::spy_hunt(&mut Simulator::with_seed(10), &SpyHuntConfig::default(), 200)?;
    assert!(report.caught());
    assert!(report.to_string().contains("Caught a spy!"));
    Ok(())
}

#[test]
fn test_swap_test_identical_inputs() -> Result<(), QlError> {
    let report = swap_test::swap_test(&mut Simulator::with_seed(3))?;
    assert_eq!(report.counts.get("1"), 1);
    Ok(())
}

#[test]
fn test_swap_test_overlap_of_plus_and_zero() -> Result<(), QlError> {
    let estimate = swap_test::swap_test_overlap(&mut Simulator::with_seed(8), &[], &[Gate::H], 8000)?;
    let exact = swap_test::exact_overlap(&[], &[Gate::H]);
    assert!((estimate.overlap() - exact).abs() < 0.05, "{} vs {}", estimate.overlap(), exact);
    Ok(())
}

#[test]
fn test_sqrt_not_report() -> Result<(), QlError> {
    let report = sqrt_not::sqrt_not(&mut Simulator::with_seed(6), 1000)?;
    assert_eq!(report.manual_counts.get("1"), 1000);
    assert_eq!(report.builtin_counts.get("1"), 1000);
    let text = report.to_string();
    assert!(text.contains("Manual ROOTNOT² ≈ X: true"));
    assert!(text.contains("Built-in SX² ≈ X: true"));
    assert!(text.contains("Manual matrix equals SX†: true"));
    assert!(text.contains("Probabilities: |0⟩: 0.500, |1⟩: 0.500"));
    Ok(())
}
