// tests/simulation_tests.rs

use qlessons::{
    check_normalization, states_approx_equal, Circuit, CircuitBuilder, ClbitId, Gate, Operation, QlError, QubitId,
    Simulator, StateVector,
};

use num_complex::Complex;
use proptest::prelude::*;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

fn qid(id: usize) -> QubitId {
    QubitId(id)
}

fn assert_amplitudes(state: &StateVector, expected: &[(f64, f64)]) {
    assert_eq!(state.dim(), expected.len(), "dimension mismatch");
    for (k, (amp, (re, im))) in state.vector().iter().zip(expected).enumerate() {
        assert!(
            (amp.re - re).abs() < 1e-9 && (amp.im - im).abs() < 1e-9,
            "amplitude {} was {}, expected {}+{}i",
            k,
            amp,
            re,
            im
        );
    }
}

#[test]
fn test_empty_circuit() -> Result<(), QlError> {
    let circuit = Circuit::with_size(2, 0);
    let state = Simulator::with_seed(0).statevector(&circuit)?;
    assert!(states_approx_equal(&state, &StateVector::zero_state(2), 1e-12));
    Ok(())
}

#[test]
fn test_hadamard_superposition() -> Result<(), QlError> {
    let circuit = CircuitBuilder::new(1, 0)
        .add_op(Operation::Gate { gate: Gate::H, target: qid(0) })
        .build()?;
    let state = Simulator::with_seed(0).statevector(&circuit)?;
    assert_amplitudes(&state, &[(FRAC_1_SQRT_2, 0.0), (FRAC_1_SQRT_2, 0.0)]);
    Ok(())
}

#[test]
fn test_qubit_zero_is_least_significant() -> Result<(), QlError> {
    let mut circuit = Circuit::with_size(3, 0);
    circuit.x(0);
    let state = Simulator::with_seed(0).statevector(&circuit)?;
    assert_eq!(state.nonzero_terms().len(), 1);
    assert_eq!(state.nonzero_terms()[0].0, "001");
    assert!((state.vector()[1].re - 1.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_pauli_y_adds_imaginary_phase() -> Result<(), QlError> {
    let mut circuit = Circuit::with_size(2, 0);
    circuit.y(0).x(1).y(1);
    let state = Simulator::with_seed(0).statevector(&circuit)?;
    // Y|0> = i|1>, Y|1> = -i|0>, so the product is (i)(-i)|01> = |01>.
    assert_amplitudes(&state, &[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0), (0.0, 0.0)]);
    Ok(())
}

#[test]
fn test_bell_state_amplitudes() -> Result<(), QlError> {
    let mut circuit = Circuit::with_size(2, 0);
    circuit.h(0).cx(0, 1);
    let state = Simulator::with_seed(0).statevector(&circuit)?;
    assert_amplitudes(
        &state,
        &[(FRAC_1_SQRT_2, 0.0), (0.0, 0.0), (0.0, 0.0), (FRAC_1_SQRT_2, 0.0)],
    );
    Ok(())
}

#[test]
fn test_sx_on_zero() -> Result<(), QlError> {
    let mut circuit = Circuit::with_size(1, 0);
    circuit.sx(0);
    let state = Simulator::with_seed(0).statevector(&circuit)?;
    assert_amplitudes(&state, &[(0.5, 0.5), (0.5, -0.5)]);
    Ok(())
}

#[test]
fn test_controlled_phase_on_one_one() -> Result<(), QlError> {
    let mut circuit = Circuit::with_size(2, 0);
    circuit.x(0).x(1).cp(PI / 2.0, 0, 1);
    let state = Simulator::with_seed(0).statevector(&circuit)?;
    assert!((state.vector()[3] - Complex::new(0.0, 1.0)).norm() < 1e-12);
    Ok(())
}

#[test]
fn test_crz_only_acts_when_control_set() -> Result<(), QlError> {
    let mut off = Circuit::with_size(2, 0);
    off.x(1).crz(PI, 0, 1);
    let state = Simulator::with_seed(0).statevector(&off)?;
    assert!((state.vector()[2] - Complex::new(1.0, 0.0)).norm() < 1e-12);

    let mut on = Circuit::with_size(2, 0);
    on.x(0).x(1).crz(PI, 0, 1);
    let state = Simulator::with_seed(0).statevector(&on)?;
    // Rz(π) on |1> is e^{iπ/2} = i
    assert!((state.vector()[3] - Complex::new(0.0, 1.0)).norm() < 1e-12);
    Ok(())
}

#[test]
fn test_measurement_collapses_and_records() -> Result<(), QlError> {
    let mut circuit = Circuit::with_size(2, 2);
    circuit.h(0).cx(0, 1).measure(0, 0);
    let mut sim = Simulator::with_seed(13);
    for _ in 0..20 {
        let result = sim.run(&circuit)?;
        let bit = result.clbit(ClbitId(0)).unwrap_or(false);
        let index = if bit { 3 } else { 0 };
        assert!((result.state().vector()[index].norm() - 1.0).abs() < 1e-12);
        check_normalization(result.state(), None)?;
    }
    Ok(())
}

#[test]
fn test_conditional_follows_classical_bit() -> Result<(), QlError> {
    // Copy a random bit from qubit 0 to qubit 1 through the classical register.
    let mut circuit = Circuit::with_size(2, 2);
    circuit
        .h(0)
        .measure(0, 0)
        .if_test(0, true, Operation::Gate { gate: Gate::X, target: qid(1) })
        .measure(1, 1);
    let counts = Simulator::with_seed(8).run_shots(&circuit, 200)?;
    assert_eq!(counts.get("00") + counts.get("11"), 200, "{}", counts);
    assert!(counts.get("11") > 50);
    Ok(())
}

#[test]
fn test_reset_returns_to_zero() -> Result<(), QlError> {
    let mut circuit = Circuit::with_size(1, 1);
    circuit.h(0).reset(0).measure(0, 0);
    let counts = Simulator::with_seed(2).run_shots(&circuit, 50)?;
    assert_eq!(counts.get("0"), 50);
    Ok(())
}

#[test]
fn test_out_of_range_rejected_before_running() {
    let mut circuit = Circuit::with_size(1, 1);
    circuit.measure(0, 4);
    let err = Simulator::with_seed(0).run_shots(&circuit, 1).unwrap_err();
    assert!(matches!(err, QlError::ClbitOutOfRange { .. }));
}

#[test]
fn test_seeded_simulators_agree() -> Result<(), QlError> {
    let mut circuit = Circuit::with_size(4, 4);
    for q in 0..4 {
        circuit.h(q);
    }
    for q in 0..4 {
        circuit.measure(q, q);
    }
    let a = Simulator::with_seed(1234).run_shots(&circuit, 100)?;
    let b = Simulator::with_seed(1234).run_shots(&circuit, 100)?;
    assert_eq!(a, b);
    Ok(())
}

fn gate_strategy() -> impl Strategy<Value = Gate> {
    prop_oneof![
        Just(Gate::H),
        Just(Gate::X),
        Just(Gate::Y),
        Just(Gate::Z),
        Just(Gate::S),
        Just(Gate::T),
        Just(Gate::Sx),
        Just(Gate::Sxdg),
        (-PI..PI).prop_map(Gate::Phase),
        (-PI..PI).prop_map(Gate::Rx),
        (-PI..PI).prop_map(Gate::Ry),
        (-PI..PI).prop_map(Gate::Rz),
    ]
}

fn operation_strategy(num_qubits: usize) -> impl Strategy<Value = Operation> {
    let single = (gate_strategy(), 0..num_qubits)
        .prop_map(|(gate, t)| Operation::Gate { gate, target: QubitId(t) });
    let controlled = (gate_strategy(), 0..num_qubits, 1..num_qubits).prop_map(move |(gate, c, offset)| {
        Operation::Controlled {
            gate,
            control: QubitId(c),
            target: QubitId((c + offset) % num_qubits),
        }
    });
    let swap = (0..num_qubits, 1..num_qubits).prop_map(move |(a, offset)| Operation::Swap {
        a: QubitId(a),
        b: QubitId((a + offset) % num_qubits),
    });
    prop_oneof![single, controlled, swap]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_unitary_sequences_preserve_norm(ops in prop::collection::vec(operation_strategy(3), 0..40)) {
        let mut circuit = Circuit::with_size(3, 0);
        circuit.add_operations(ops);
        let state = Simulator::with_seed(0).statevector(&circuit).unwrap();
        prop_assert!(check_normalization(&state, None).is_ok());
    }

    #[test]
    fn prop_gate_then_inverse_is_identity(gate in gate_strategy()) {
        let mut circuit = Circuit::with_size(1, 0);
        circuit.h(0).gate(gate, 0).gate(gate.inverse(), 0);
        let mut reference = Circuit::with_size(1, 0);
        reference.h(0);
        let mut sim = Simulator::with_seed(0);
        let a = sim.statevector(&circuit).unwrap();
        let b = sim.statevector(&reference).unwrap();
        prop_assert!(states_approx_equal(&a, &b, 1e-9));
    }
}
