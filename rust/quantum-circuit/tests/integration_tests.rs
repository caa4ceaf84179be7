//! Small circuits assembled from the public builders.

use quantum_circuit::gates::{identity_gate, inverse_qft, qft, quantum_not_gate, swap_qubits_gate};
use quantum_circuit::state::{apply_swaps, qubit_vector};
use quantum_circuit::{ket, ket_of, CircuitError, Complex64, Gates, Matrix, QubitArg};

const TOL: f64 = 1e-10;

#[test]
fn test_bell_state() {
    let g = Gates::get();
    // H on the high qubit, then CNOT: |00⟩ -> (|00⟩ + |11⟩)/√2
    let circuit = g.cnot.matmul(&g.h1).unwrap();
    let bell = circuit.matmul(&ket_of("00").unwrap()).unwrap();
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let expected = Matrix::column(&[
        Complex64::new(h, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(h, 0.0),
    ]);
    assert!(bell.approx_eq(&expected, TOL));
}

#[test]
fn test_qft_of_zero_state_is_uniform() {
    for n in 1..=4 {
        let f = qft(n).unwrap();
        let zero = qubit_vector(n, &[]).unwrap();
        let out = f.matmul(&zero).unwrap();
        let amplitude = 1.0 / ((1usize << n) as f64).sqrt();
        for c in out.as_slice() {
            assert!((c - Complex64::new(amplitude, 0.0)).norm() < TOL);
        }
        // And back again
        let back = inverse_qft(n).unwrap().matmul(&out).unwrap();
        assert!(back.approx_eq(&zero, 1e-9));
    }
}

#[test]
fn test_toffoli_truth_table() {
    let toffoli = quantum_not_gate(3).unwrap();
    for input in 0..8u64 {
        let state = ket(&[QubitArg::Index(input)], "").unwrap();
        // Indices below 4 are built on fewer qubits; widen with |0⟩ factors
        let state = match state.rows() {
            2 => ket_of("00").unwrap().kron(&state),
            4 => ket_of("0").unwrap().kron(&state),
            _ => state,
        };
        let out = toffoli.matmul(&state).unwrap();
        let expected = if input >= 6 { input ^ 1 } else { input };
        assert_eq!(
            out.get(expected as usize, 0),
            Some(Complex64::new(1.0, 0.0)),
            "input {input:03b}"
        );
    }
}

#[test]
fn test_swap_gate_and_register_swap_agree() {
    let state = qubit_vector(4, &[0b0011]).unwrap();
    let by_gate = swap_qubits_gate(4, 0, 3).unwrap().matmul(&state).unwrap();
    let by_register = apply_swaps(&state, &[(0, 3)]).unwrap();
    assert_eq!(by_gate, by_register);
    assert_eq!(by_gate, qubit_vector(4, &[0b1010]).unwrap());
}

#[test]
fn test_identity_gate_leaves_states_alone() {
    let id = identity_gate(3).unwrap();
    let psi = ket_of("+-1").unwrap();
    assert!(id.matmul(&psi).unwrap().approx_eq(&psi, TOL));
}

#[test]
fn test_qubit_cap_is_enforced_everywhere() {
    assert!(matches!(qft(11), Err(CircuitError::QubitLimit { .. })));
    assert!(matches!(identity_gate(11), Err(CircuitError::QubitLimit { .. })));
    assert!(matches!(quantum_not_gate(11), Err(CircuitError::QubitLimit { .. })));
    assert!(matches!(swap_qubits_gate(11, 0, 1), Err(CircuitError::QubitLimit { .. })));
    assert!(matches!(qubit_vector(11, &[]), Err(CircuitError::QubitLimit { .. })));
}
