//! Period extraction from a simulated counting register.
//!
//! For each counting qubit `q` the `(q, q)` entry of the gate for power `2^q`
//! is placed on a diagonal `n_count × n_count` matrix. That matrix is widened
//! with an identity to the inverse QFT's dimension, multiplied into the
//! inverse QFT, and the real part of the element sum divided by 4 is the
//! period estimate.
//!
//! The result is a *candidate*. It is not checked against the base here, and
//! callers must verify it before use.

use quantum_circuit::gates::inverse_qft;
use quantum_circuit::state::qubits_to_bits;
use quantum_circuit::{check_qubits, CircuitError, Matrix};

use crate::error::ShorError;
use crate::modexp::{controlled_mod, wiring, WORK_QUBITS};

/// Default counting-register size.
pub const DEFAULT_COUNTING_QUBITS: usize = 8;

/// Absorbs floating-point noise before truncating, so `3.9999999999` reads
/// as 4.
const TRUNCATION_EPSILON: f64 = 1e-9;

/// `n_count` must divide `2^n_count` (a power of two) and index a diagonal
/// entry of the work-register gate.
pub fn check_counting_qubits(n_count: usize) -> Result<(), ShorError> {
    let invalid = || ShorError::InvalidCountingQubits(n_count);
    if !n_count.is_power_of_two() || n_count > qubits_to_bits(WORK_QUBITS) {
        return Err(invalid());
    }
    check_qubits(n_count).map_err(|_| invalid())
}

/// Estimate a period from any gate-for-power builder.
///
/// `gate_for_power(p)` must return a square gate with at least `n_count`
/// rows. Negative estimates are reported as 0.
pub fn estimate_period<F>(n_count: usize, gate_for_power: F) -> Result<u64, ShorError>
where
    F: FnMut(u64) -> Result<Matrix, ShorError>,
{
    check_counting_qubits(n_count)?;
    estimate_period_with(&inverse_qft(n_count)?, n_count, gate_for_power)
}

/// [`estimate_period`] against a precomputed `inverse_qft(n_count)`.
pub fn estimate_period_with<F>(
    qft_dagger: &Matrix,
    n_count: usize,
    mut gate_for_power: F,
) -> Result<u64, ShorError>
where
    F: FnMut(u64) -> Result<Matrix, ShorError>,
{
    check_counting_qubits(n_count)?;
    let dim = qubits_to_bits(n_count);
    if qft_dagger.shape() != (dim, dim) {
        return Err(CircuitError::DimensionMismatch {
            op: "estimate_period",
            lhs: (dim, dim),
            rhs: qft_dagger.shape(),
        }
        .into());
    }

    let mut samples = Vec::with_capacity(n_count);
    for q in 0..n_count {
        let gate = gate_for_power(1u64 << q)?;
        let entry = gate
            .get(q, q)
            .ok_or(ShorError::InvalidCountingQubits(n_count))?;
        samples.push(entry);
    }

    let widen = Matrix::identity(dim / n_count);
    let register = Matrix::diag(&samples).kron(&widen).matmul(qft_dagger)?;
    let estimate = register.element_sum().re / 4.0;
    log::trace!("raw period estimate {estimate} from {n_count} counting qubits");

    let truncated = (estimate + TRUNCATION_EPSILON).trunc();
    Ok(if truncated > 0.0 { truncated as u64 } else { 0 })
}

/// Estimate the period of `base` modulo `modulus` with the controlled
/// modular-multiplication gates.
pub fn period_find(modulus: u64, base: u64, n_count: usize) -> Result<u64, ShorError> {
    check_counting_qubits(n_count)?;
    // Fail on an unsupported base before building any transform
    wiring(base, modulus)?;
    estimate_period(n_count, |power| controlled_mod(base, power, modulus))
}

/// [`period_find`] against a precomputed `inverse_qft(n_count)`.
pub fn period_find_with(
    qft_dagger: &Matrix,
    modulus: u64,
    base: u64,
    n_count: usize,
) -> Result<u64, ShorError> {
    let gate = wiring(base, modulus)?.gate()?;
    estimate_period_with(qft_dagger, n_count, |power| Ok(gate.pow(power)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_qubit_constraints() {
        for n in [1, 2, 4, 8] {
            assert!(check_counting_qubits(n).is_ok(), "{n}");
        }
        for n in [0, 3, 6, 16, 32] {
            assert_eq!(
                check_counting_qubits(n),
                Err(ShorError::InvalidCountingQubits(n))
            );
        }
    }

    #[test]
    fn test_period_of_two_and_eight_mod15() {
        assert_eq!(period_find(15, 2, 8).unwrap(), 4);
        assert_eq!(period_find(15, 8, 8).unwrap(), 4);
    }

    #[test]
    fn test_flipped_bases_give_zero_candidate() {
        // The high-qubit NOT moves |0000⟩, so the sampled (0,0) entry is 0
        for base in [7, 11, 13] {
            assert_eq!(period_find(15, base, 8).unwrap(), 0, "base {base}");
        }
    }

    #[test]
    fn test_estimate_scales_with_register() {
        // With the identity every sample is 1 and the sum is sqrt(2^n)
        let identity = |_: u64| -> Result<Matrix, ShorError> { Ok(Matrix::identity(16)) };
        assert_eq!(estimate_period(8, identity).unwrap(), 4);
        assert_eq!(estimate_period(4, identity).unwrap(), 1);
        assert_eq!(estimate_period(2, identity).unwrap(), 0);
    }

    #[test]
    fn test_gate_too_small_for_register() {
        let tiny = |_: u64| -> Result<Matrix, ShorError> { Ok(Matrix::identity(2)) };
        assert_eq!(
            estimate_period(4, tiny),
            Err(ShorError::InvalidCountingQubits(4))
        );
    }

    #[test]
    fn test_precomputed_transform_agrees() {
        let qft_dagger = inverse_qft(8).unwrap();
        for base in [2, 7, 8, 11, 13] {
            assert_eq!(
                period_find_with(&qft_dagger, 15, base, 8).unwrap(),
                period_find(15, base, 8).unwrap()
            );
        }
        assert!(matches!(
            period_find_with(&qft_dagger, 15, 2, 4),
            Err(ShorError::Circuit(CircuitError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_rejects_unsupported_input() {
        assert!(matches!(
            period_find(15, 4, 8),
            Err(ShorError::InvalidBase { .. })
        ));
        assert_eq!(period_find(16, 2, 8), Err(ShorError::InvalidModulus(16)));
        assert_eq!(
            period_find(15, 2, 5),
            Err(ShorError::InvalidCountingQubits(5))
        );
    }
}
