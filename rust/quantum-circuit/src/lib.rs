//! # Quantum Circuit Matrix
//!
//! Builds quantum logic circuits as dense complex matrices of size
//! `2^n × 2^n`, entirely by outer and Kronecker (tensor) products of
//! computational-basis bras and kets.
//!
//! ## Conventions
//!
//! Qubit `q` corresponds to bit `q` of a basis index, so qubit 0 is the least
//! significant and the highest qubit is the leftmost Kronecker factor. A symbol
//! string such as `"01"` lists qubits in index order: `ket_of("01")` is qubit 0
//! in `|0⟩` and qubit 1 in `|1⟩`, i.e. basis index 2.
//!
//! Dense matrices grow as `4^n`, so every builder that takes a qubit count
//! refuses counts above [`MAX_QUBITS`].

pub mod basis;
pub mod error;
pub mod gates;
pub mod matrix;
pub mod state;

pub use basis::{bra, bra_of, ket, ket_of, outer, QubitArg};
pub use error::CircuitError;
pub use gates::Gates;
pub use matrix::{Complex64, Matrix};

/// Largest qubit count any builder accepts.
pub const MAX_QUBITS: usize = 10;

/// Fail fast when `num_qubits` exceeds [`MAX_QUBITS`].
pub fn check_qubits(num_qubits: usize) -> Result<(), CircuitError> {
    if num_qubits > MAX_QUBITS {
        return Err(CircuitError::QubitLimit {
            requested: num_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}
