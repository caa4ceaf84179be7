//! Elementary and composite quantum gates.
//!
//! Gates are built from outer products of basis bras/kets and combined with
//! Kronecker products. The fixed-size gates are also available precomputed
//! through the read-only [`Gates`] handle.

use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::sync::OnceLock;

use crate::basis::{bra_of, ket_of, outer};
use crate::error::CircuitError;
use crate::matrix::{Complex64, Matrix};
use crate::state::qubits_to_bits;

/// `|0⟩⟨0|` and `|1⟩⟨1|`.
fn projectors() -> Result<(Matrix, Matrix), CircuitError> {
    Ok((
        outer(&ket_of("0")?, &bra_of("0")?)?,
        outer(&ket_of("1")?, &bra_of("1")?)?,
    ))
}

/// Pauli-X (NOT): `|1⟩⟨0| + |0⟩⟨1|`.
pub fn pauli_x_gate() -> Result<Matrix, CircuitError> {
    outer(&ket_of("1")?, &bra_of("0")?)?.add(&outer(&ket_of("0")?, &bra_of("1")?)?)
}

/// Pauli-Y: `i|1⟩⟨0| - i|0⟩⟨1|`.
pub fn pauli_y_gate() -> Result<Matrix, CircuitError> {
    let diff = outer(&ket_of("1")?, &bra_of("0")?)?.sub(&outer(&ket_of("0")?, &bra_of("1")?)?)?;
    Ok(diff.scale(Complex64::i()))
}

/// Pauli-Z: `|0⟩⟨0| - |1⟩⟨1|`.
pub fn pauli_z_gate() -> Result<Matrix, CircuitError> {
    let (zero, one) = projectors()?;
    zero.sub(&one)
}

/// Hadamard: `|+⟩⟨0| + |-⟩⟨1|`.
pub fn hadamard_gate() -> Result<Matrix, CircuitError> {
    outer(&ket_of("+")?, &bra_of("0")?)?.add(&outer(&ket_of("-")?, &bra_of("1")?)?)
}

/// Two-qubit swap: `|00⟩⟨00| + |10⟩⟨01| + |01⟩⟨10| + |11⟩⟨11|`.
pub fn swap_gate() -> Result<Matrix, CircuitError> {
    let terms = [
        outer(&ket_of("00")?, &bra_of("00")?)?,
        outer(&ket_of("10")?, &bra_of("01")?)?,
        outer(&ket_of("01")?, &bra_of("10")?)?,
        outer(&ket_of("11")?, &bra_of("11")?)?,
    ];
    Matrix::sum(&terms)
}

/// Controlled-U with the high qubit as control:
/// `|0⟩⟨0| ⊗ |0⟩⟨0| + |0⟩⟨0| ⊗ |1⟩⟨1| + |1⟩⟨1| ⊗ U`.
///
/// `u` must be a 2×2 single-qubit gate.
pub fn controlled_u_gate(u: &Matrix) -> Result<Matrix, CircuitError> {
    if u.shape() != (2, 2) {
        return Err(CircuitError::DimensionMismatch {
            op: "controlled_u_gate",
            lhs: (2, 2),
            rhs: u.shape(),
        });
    }
    let (zero, one) = projectors()?;
    let terms = [zero.kron(&zero), zero.kron(&one), one.kron(u)];
    Matrix::sum(&terms)
}

/// CNOT, mapping `|a, b⟩ ⟼ |a, a ⊕ b⟩`.
pub fn cnot_gate() -> Result<Matrix, CircuitError> {
    controlled_u_gate(&pauli_x_gate()?)
}

pub fn cy_gate() -> Result<Matrix, CircuitError> {
    controlled_u_gate(&pauli_y_gate()?)
}

pub fn cz_gate() -> Result<Matrix, CircuitError> {
    controlled_u_gate(&pauli_z_gate()?)
}

/// The `2^n` projectors `|i⟩⟨i|` whose sum is the `n`-qubit identity.
///
/// Built as an iterative fold: each step tensors every `(k-1)`-qubit
/// projector with `|0⟩⟨0|` and `|1⟩⟨1|`. For `n = 1` this is just the two
/// single-qubit projectors; `n = 0` yields nothing.
pub fn identity_decomposition(num_qubits: usize) -> Result<Vec<Matrix>, CircuitError> {
    crate::check_qubits(num_qubits)?;
    if num_qubits == 0 {
        return Ok(Vec::new());
    }
    let (zero, one) = projectors()?;
    let mut terms = vec![zero.clone(), one.clone()];
    for _ in 1..num_qubits {
        terms = terms
            .iter()
            .flat_map(|q| [q.kron(&zero), q.kron(&one)])
            .collect();
    }
    Ok(terms)
}

/// Identity gate as the sum of its outer-product decomposition.
pub fn identity_gate(num_qubits: usize) -> Result<Matrix, CircuitError> {
    if num_qubits == 0 {
        return Ok(Matrix::identity(1));
    }
    Matrix::sum(&identity_decomposition(num_qubits)?)
}

/// Quantum analogue of the classical NOT for `n` qubits: Pauli-X for one,
/// CNOT for two, and for more the Toffoli family
/// `diag(1,0) ⊗ I_{n-1} + diag(0,1) ⊗ NOT_{n-1}` (the top qubit controls the
/// rest). Zero qubits gives an empty gate.
pub fn quantum_not_gate(num_qubits: usize) -> Result<Matrix, CircuitError> {
    crate::check_qubits(num_qubits)?;
    let gates = Gates::get();
    let mut gate = match num_qubits {
        0 => return Ok(Matrix::zeros(0, 0)),
        1 => return Ok(gates.pauli_x.clone()),
        _ => gates.cnot.clone(),
    };
    let (off, on) = (Matrix::diag_real(&[1.0, 0.0]), Matrix::diag_real(&[0.0, 1.0]));
    for k in 3..=num_qubits {
        let identity = Matrix::identity(qubits_to_bits(k - 1));
        gate = off.kron(&identity).add(&on.kron(&gate))?;
    }
    Ok(gate)
}

/// Mirror of [`quantum_not_gate`] that fires when the top qubit is `|0⟩`:
/// `diag(0,1) ⊗ I_{n-1} + diag(1,0) ⊗ NOT_{n-1}`. Only the top control is
/// mirrored; the inner gate is the ordinary NOT.
pub fn reverse_quantum_not_gate(num_qubits: usize) -> Result<Matrix, CircuitError> {
    crate::check_qubits(num_qubits)?;
    let gates = Gates::get();
    match num_qubits {
        0 => return Ok(Matrix::zeros(0, 0)),
        1 => return Ok(gates.pauli_x.clone()),
        _ => {}
    }
    let (off, on) = (Matrix::diag_real(&[1.0, 0.0]), Matrix::diag_real(&[0.0, 1.0]));
    let identity = Matrix::identity(qubits_to_bits(num_qubits - 1));
    let inner = quantum_not_gate(num_qubits - 1)?;
    on.kron(&identity).add(&off.kron(&inner))
}

/// Gate swapping qubits `a` and `b` of an `n`-qubit register.
///
/// Composed from adjacent swaps `I ⊗ SWAP ⊗ I`: the higher qubit is walked
/// down to the lower one and the path is then retraced.
pub fn swap_qubits_gate(num_qubits: usize, a: usize, b: usize) -> Result<Matrix, CircuitError> {
    crate::check_qubits(num_qubits)?;
    for qubit in [a, b] {
        if qubit >= num_qubits {
            return Err(CircuitError::InvalidQubit { qubit, num_qubits });
        }
    }
    let dim = qubits_to_bits(num_qubits);
    if a == b {
        return Ok(Matrix::identity(dim));
    }
    let (lo, hi) = (a.min(b), a.max(b));
    let swap = &Gates::get().swap;
    let adjacent = |k: usize| {
        // Swaps qubits k and k+1; qubit 0 is the rightmost factor
        let above = Matrix::identity(qubits_to_bits(num_qubits - k - 2));
        let below = Matrix::identity(qubits_to_bits(k));
        above.kron(swap).kron(&below)
    };

    let mut gate = Matrix::identity(dim);
    let path: Vec<usize> = (lo..hi).rev().chain(lo + 1..hi).collect();
    for k in path {
        gate = adjacent(k).matmul(&gate)?;
    }
    Ok(gate)
}

/// Quantum Fourier transform on `n` qubits: entry `(j, k)` is
/// `exp(2πi·j·k/d) / √d` with `d = 2^n`.
pub fn qft(num_qubits: usize) -> Result<Matrix, CircuitError> {
    crate::check_qubits(num_qubits)?;
    let d = qubits_to_bits(num_qubits);
    let norm = 1.0 / (d as f64).sqrt();
    let mut data = Vec::with_capacity(d * d);
    for j in 0..d {
        for k in 0..d {
            // Reduce j*k mod d first to keep the phase argument small
            let phase = 2.0 * PI * ((j * k) % d) as f64 / d as f64;
            data.push(Complex64::from_polar(norm, phase));
        }
    }
    Matrix::new(d, d, data)
}

/// Inverse QFT, computed by general matrix inversion.
pub fn inverse_qft(num_qubits: usize) -> Result<Matrix, CircuitError> {
    qft(num_qubits)?.inverse()
}

/// Precomputed fixed-size gates, built once on first use.
#[derive(Debug, Clone)]
pub struct Gates {
    pub one_qubit_identity: Matrix,
    pub two_qubit_identity: Matrix,
    pub pauli_x: Matrix,
    pub pauli_y: Matrix,
    pub pauli_z: Matrix,
    pub hadamard: Matrix,
    /// Hadamard on the high qubit of a pair, `H ⊗ I`.
    pub h1: Matrix,
    pub swap: Matrix,
    pub cnot: Matrix,
    pub cy: Matrix,
    pub cz: Matrix,
}

static GATES: OnceLock<Gates> = OnceLock::new();

impl Gates {
    /// Shared read-only handle.
    pub fn get() -> &'static Gates {
        GATES.get_or_init(Gates::constants)
    }

    /// The constants written out entry by entry, independent of the
    /// outer-product builders so the two can be cross-checked.
    fn constants() -> Gates {
        log::debug!("building fixed gate constants");
        let c = Complex64::new;
        let (o, l, i) = (c(0.0, 0.0), c(1.0, 0.0), c(0.0, 1.0));
        let h = c(FRAC_1_SQRT_2, 0.0);

        let pauli_x = Matrix::from_array([[o, l], [l, o]]);
        let pauli_y = Matrix::from_array([[o, -i], [i, o]]);
        let pauli_z = Matrix::from_array([[l, o], [o, -l]]);
        let hadamard = Matrix::from_array([[h, h], [h, -h]]);
        let swap = Matrix::from_array([
            [l, o, o, o],
            [o, o, l, o],
            [o, l, o, o],
            [o, o, o, l],
        ]);
        let one_qubit_identity = Matrix::identity(2);

        Gates {
            two_qubit_identity: Matrix::identity(4),
            h1: hadamard.kron(&one_qubit_identity),
            cnot: one_qubit_identity.direct_sum(&pauli_x),
            cy: one_qubit_identity.direct_sum(&pauli_y),
            cz: one_qubit_identity.direct_sum(&pauli_z),
            one_qubit_identity,
            pauli_x,
            pauli_y,
            pauli_z,
            hadamard,
            swap,
        }
    }
}
