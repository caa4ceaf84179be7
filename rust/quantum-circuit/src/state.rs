//! Register states and permutation utilities.
//!
//! Two encodings appear here. A *basis register* of `n` qubits is a
//! `2^n`-dimensional vector (or its diagonal matrix form). A *pair-encoded*
//! register spends two slots per qubit, slot `2q` for `|0⟩` and `2q + 1` for
//! `|1⟩`, giving a `2n`-dimensional vector.

use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt::Write;

use crate::error::CircuitError;
use crate::gates::{swap_qubits_gate, Gates};
use crate::matrix::{Complex64, Matrix};

const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// State-space dimension of `n` qubits, `2^n`.
pub fn qubits_to_bits(num_qubits: usize) -> usize {
    1 << num_qubits
}

/// Qubits needed to span `num_bits` basis states, `⌈log₂ num_bits⌉`.
pub fn bits_to_qubits(num_bits: usize) -> usize {
    match num_bits {
        0 | 1 => 0,
        n => (usize::BITS - (n - 1).leading_zeros()) as usize,
    }
}

fn mark(values: &mut [Complex64], set: &[usize]) -> Result<(), CircuitError> {
    let len = values.len();
    for &index in set {
        let slot = values.get_mut(index).ok_or_else(|| {
            CircuitError::InvalidState(format!("index {index} out of range for {len} slots"))
        })?;
        *slot = ONE;
    }
    if set.is_empty() {
        if let Some(first) = values.first_mut() {
            *first = ONE;
        }
    }
    Ok(())
}

fn basis_values(num_qubits: usize, set: &[usize]) -> Result<Vec<Complex64>, CircuitError> {
    crate::check_qubits(num_qubits)?;
    let mut values = vec![Complex64::new(0.0, 0.0); qubits_to_bits(num_qubits)];
    mark(&mut values, set)?;
    Ok(values)
}

/// Diagonal `2^n × 2^n` register with ones at the `set` basis indices,
/// `|0…0⟩` when `set` is empty.
pub fn qubit_matrix(num_qubits: usize, set: &[usize]) -> Result<Matrix, CircuitError> {
    Ok(Matrix::diag(&basis_values(num_qubits, set)?))
}

/// Column form of [`qubit_matrix`].
pub fn qubit_vector(num_qubits: usize, set: &[usize]) -> Result<Matrix, CircuitError> {
    Ok(Matrix::column(&basis_values(num_qubits, set)?))
}

/// Pair-encoded slots: `set` slots switched on, and every qubit whose `|1⟩`
/// slot stays off gets its `|0⟩` slot on.
fn zero_pair_values(num_qubits: usize, set: &[usize]) -> Result<Vec<Complex64>, CircuitError> {
    let mut values = vec![Complex64::new(0.0, 0.0); 2 * num_qubits];
    mark(&mut values, set)?;
    for q in 0..num_qubits {
        if values[2 * q + 1] != ONE {
            values[2 * q] = ONE;
        }
    }
    Ok(values)
}

/// Pair-encoded register in diagonal form, every qubit `|0⟩` unless its
/// `|1⟩` slot is listed in `set`.
pub fn zero_qubit_matrix(num_qubits: usize, set: &[usize]) -> Result<Matrix, CircuitError> {
    Ok(Matrix::diag(&zero_pair_values(num_qubits, set)?))
}

/// Column form of [`zero_qubit_matrix`].
pub fn zero_qubit_vector(num_qubits: usize, set: &[usize]) -> Result<Matrix, CircuitError> {
    Ok(Matrix::column(&zero_pair_values(num_qubits, set)?))
}

/// Pair-encoded column with only the `set` slots on (slot 0 when empty);
/// unlike [`zero_qubit_vector`] the `|0⟩` slots are not filled in.
pub fn zero_ket_qubit_vector(num_qubits: usize, set: &[usize]) -> Result<Matrix, CircuitError> {
    let mut values = vec![Complex64::new(0.0, 0.0); 2 * num_qubits];
    mark(&mut values, set)?;
    Ok(Matrix::column(&values))
}

/// Pair-encoded register with every qubit in `|+⟩`, except the qubits in
/// `minus`, which are put in `|-⟩`.
pub fn hadamard_matrix(num_qubits: usize, minus: &[usize]) -> Result<Matrix, CircuitError> {
    let mut values = vec![Complex64::new(FRAC_1_SQRT_2, 0.0); 2 * num_qubits];
    for &qubit in minus {
        if qubit >= num_qubits {
            return Err(CircuitError::InvalidQubit { qubit, num_qubits });
        }
        values[2 * qubit + 1] = -values[2 * qubit + 1];
    }
    Ok(Matrix::diag(&values))
}

/// Column form of [`hadamard_matrix`].
pub fn hadamard_vector(num_qubits: usize, minus: &[usize]) -> Result<Matrix, CircuitError> {
    Ok(matrix_to_vector(&hadamard_matrix(num_qubits, minus)?))
}

/// Collapse a register matrix into a column by summing each row. Columns
/// are returned unchanged.
pub fn matrix_to_vector(state: &Matrix) -> Matrix {
    if state.is_column() {
        return state.clone();
    }
    let sums: Vec<Complex64> = state
        .as_slice()
        .chunks(state.cols().max(1))
        .map(|row| row.iter().sum())
        .collect();
    Matrix::column(&sums)
}

/// Spread a column onto a diagonal. Square matrices are returned unchanged.
pub fn vector_to_matrix(state: &Matrix) -> Result<Matrix, CircuitError> {
    if state.is_square() {
        return Ok(state.clone());
    }
    if !state.is_column() {
        return Err(CircuitError::DimensionMismatch {
            op: "vector_to_matrix",
            lhs: state.shape(),
            rhs: (state.rows(), 1),
        });
    }
    Ok(Matrix::diag(state.as_slice()))
}

/// Swap qubit pairs of a basis register given as a column or a diagonal
/// matrix; the result has the same form as the input.
///
/// With no pairs the two highest qubits are swapped (`SWAP ⊗ I`).
pub fn apply_swaps(state: &Matrix, pairs: &[(usize, usize)]) -> Result<Matrix, CircuitError> {
    let column = state.is_column();
    let vector = if column {
        state.clone()
    } else if state.is_square() {
        Matrix::column(&state.diagonal())
    } else {
        return Err(CircuitError::NotSquare {
            op: "apply_swaps",
            rows: state.rows(),
            cols: state.cols(),
        });
    };

    let dim = vector.rows();
    if !dim.is_power_of_two() || dim < 4 {
        return Err(CircuitError::InvalidState(format!(
            "cannot swap qubits of a {dim}-dimensional register"
        )));
    }
    let num_qubits = bits_to_qubits(dim);

    let swapped = if pairs.is_empty() {
        let gate = Gates::get()
            .swap
            .kron(&Matrix::identity(qubits_to_bits(num_qubits - 2)));
        gate.matmul(&vector)?
    } else {
        pairs.iter().try_fold(vector, |v, &(a, b)| {
            swap_qubits_gate(num_qubits, a, b)?.matmul(&v)
        })?
    };

    if column {
        Ok(swapped)
    } else {
        vector_to_matrix(&swapped)
    }
}

/// Render registers the way the diagnostic printers do: a dimensions line,
/// a label, the matrix, and a blank line per register. `decimals` rounds
/// every entry first.
pub fn format_qubits(states: &[Matrix], decimals: Option<u32>) -> String {
    let mut out = String::new();
    for (i, state) in states.iter().enumerate() {
        let shown = match decimals {
            Some(d) => state.rounded(d),
            None => state.clone(),
        };
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "qubit {i} dimensions: {:?}\nqubit {i}:\n{shown}\n",
            state.shape()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_bits_qubits_conversion() {
        assert_eq!(qubits_to_bits(0), 1);
        assert_eq!(qubits_to_bits(4), 16);
        assert_eq!(bits_to_qubits(1), 0);
        assert_eq!(bits_to_qubits(2), 1);
        assert_eq!(bits_to_qubits(16), 4);
        assert_eq!(bits_to_qubits(17), 5);
        for n in 0..=10 {
            assert_eq!(bits_to_qubits(qubits_to_bits(n)), n);
        }
    }

    #[test]
    fn test_qubit_matrix_and_vector() {
        let m = qubit_matrix(2, &[]).unwrap();
        assert_eq!(m.shape(), (4, 4));
        assert_eq!(m.diagonal(), vec![c(1.0), c(0.0), c(0.0), c(0.0)]);

        let v = qubit_vector(2, &[1, 3]).unwrap();
        assert_eq!(v.as_slice(), &[c(0.0), c(1.0), c(0.0), c(1.0)]);
        assert_eq!(vector_to_matrix(&v).unwrap(), qubit_matrix(2, &[1, 3]).unwrap());

        assert!(matches!(qubit_vector(2, &[4]), Err(CircuitError::InvalidState(_))));
        assert!(matches!(qubit_matrix(12, &[]), Err(CircuitError::QubitLimit { .. })));
    }

    #[test]
    fn test_zero_pair_registers() {
        // Qubit 1 set to |1⟩ (slot 3), qubits 0 and 2 stay |0⟩
        let v = zero_qubit_vector(3, &[3]).unwrap();
        assert_eq!(
            v.as_slice(),
            &[c(1.0), c(0.0), c(0.0), c(1.0), c(1.0), c(0.0)]
        );
        assert_eq!(zero_qubit_matrix(3, &[3]).unwrap(), vector_to_matrix(&v).unwrap());

        let k = zero_ket_qubit_vector(3, &[3]).unwrap();
        assert_eq!(
            k.as_slice(),
            &[c(0.0), c(0.0), c(0.0), c(1.0), c(0.0), c(0.0)]
        );
        assert_eq!(zero_ket_qubit_vector(2, &[]).unwrap().get(0, 0), Some(c(1.0)));
    }

    #[test]
    fn test_hadamard_register() {
        let h = FRAC_1_SQRT_2;
        let v = hadamard_vector(2, &[1]).unwrap();
        let expected = Matrix::column(&[c(h), c(h), c(h), c(-h)]);
        assert!(v.approx_eq(&expected, TOL));
        assert!(matches!(
            hadamard_matrix(2, &[2]),
            Err(CircuitError::InvalidQubit { qubit: 2, .. })
        ));
    }

    #[test]
    fn test_matrix_vector_conversion() {
        let m = Matrix::from_real(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let v = matrix_to_vector(&m);
        assert_eq!(v.as_slice(), &[c(3.0), c(7.0)]);
        assert_eq!(matrix_to_vector(&v), v);
        assert_eq!(vector_to_matrix(&m).unwrap(), m);
        assert!(vector_to_matrix(&Matrix::zeros(1, 3)).is_err());
    }

    #[test]
    fn test_apply_swaps_default_swaps_top_qubits() {
        // |010⟩ (qubit 1 set) becomes |100⟩ when qubits 1 and 2 swap
        let v = qubit_vector(3, &[2]).unwrap();
        let swapped = apply_swaps(&v, &[]).unwrap();
        assert_eq!(swapped, qubit_vector(3, &[4]).unwrap());
    }

    #[test]
    fn test_apply_swaps_pairs_and_diagonal_form() {
        let m = qubit_matrix(3, &[1]).unwrap();
        let swapped = apply_swaps(&m, &[(0, 2)]).unwrap();
        assert_eq!(swapped, qubit_matrix(3, &[4]).unwrap());
        // Swapping back restores the register
        let back = apply_swaps(&swapped, &[(2, 0)]).unwrap();
        assert_eq!(back, m);
        assert!(apply_swaps(&qubit_vector(1, &[]).unwrap(), &[]).is_err());
    }

    #[test]
    fn test_format_qubits() {
        let text = format_qubits(&[qubit_vector(1, &[1]).unwrap()], Some(2));
        assert_eq!(text, "qubit 0 dimensions: (2, 1)\nqubit 0:\n[0]\n[1]\n\n");
    }
}
