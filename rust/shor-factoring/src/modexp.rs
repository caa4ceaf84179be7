//! Controlled modular-multiplication gates on a 4-qubit work register.
//!
//! "Multiply by `a` mod `b`" is hard-wired as a permutation of the four work
//! qubits built from qubit swaps, optionally followed by a Pauli-X on the
//! most significant qubit. Only a handful of bases per modulus have such a
//! wiring, so each builder checks its whitelist before touching a matrix.

use quantum_circuit::gates::{swap_qubits_gate, Gates};
use quantum_circuit::state::qubits_to_bits;
use quantum_circuit::Matrix;

use crate::error::ShorError;

/// Work-register width.
pub const WORK_QUBITS: usize = 4;

/// Bases with a hard-wired multiplier modulo 15.
pub const MOD15_BASES: [u64; 5] = [2, 7, 8, 11, 13];

/// Qubit permutations available to the multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Swaps (0,1), (1,2), (2,3) in turn
    Cycle,
    /// Swaps (2,3), (1,2), (0,1) in turn
    ReverseCycle,
    /// Swaps (1,3) then (0,2)
    Transpose,
}

impl Pattern {
    pub fn swaps(self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Cycle => &[(0, 1), (1, 2), (2, 3)],
            Pattern::ReverseCycle => &[(2, 3), (1, 2), (0, 1)],
            Pattern::Transpose => &[(1, 3), (0, 2)],
        }
    }
}

/// The wiring chosen for one base: permutations applied in order, then an
/// optional NOT on qubit 3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wiring {
    pub patterns: Vec<Pattern>,
    pub flip_high: bool,
}

fn check_modulus(modulus: u64) -> Result<(), ShorError> {
    if modulus < 5 || modulus % 2 == 0 {
        return Err(ShorError::InvalidModulus(modulus));
    }
    Ok(())
}

/// Supported bases for an odd modulus `b`:
/// `{2, (b-1)/2, (b-1)/2 + 1, b-4, b-2}`, deduplicated and restricted to
/// `(1, b)`.
pub fn allowed_bases(modulus: u64) -> Result<Vec<u64>, ShorError> {
    check_modulus(modulus)?;
    let half = (modulus - 1) / 2;
    let mut bases: Vec<u64> = [2, half, half + 1, modulus - 4, modulus - 2]
        .into_iter()
        .filter(|&a| a > 1 && a < modulus)
        .collect();
    bases.sort_unstable();
    bases.dedup();
    Ok(bases)
}

/// Classify `a` against the modulus-`b` wiring table. Several rows can match
/// for small moduli; they are all applied, in table order.
///
/// Every whitelisted base is coprime to an odd modulus.
pub fn wiring(a: u64, modulus: u64) -> Result<Wiring, ShorError> {
    let allowed = allowed_bases(modulus)?;
    if !allowed.contains(&a) {
        return Err(ShorError::InvalidBase {
            base: a,
            modulus,
            allowed,
        });
    }

    let half = (modulus - 1) / 2;
    let mut patterns = Vec::new();
    if a == 2 || a == modulus - 2 {
        patterns.push(Pattern::Cycle);
    }
    if a == half || a == half + 1 {
        patterns.push(Pattern::ReverseCycle);
    }
    if a == modulus - 4 {
        patterns.push(Pattern::Transpose);
    }
    let flip_high = a == half || a == modulus - 4 || a == modulus - 2;
    Ok(Wiring { patterns, flip_high })
}

impl Wiring {
    /// The single-application permutation gate on the work register.
    pub fn gate(&self) -> Result<Matrix, ShorError> {
        let mut gate = Matrix::identity(qubits_to_bits(WORK_QUBITS));
        for pattern in &self.patterns {
            for &(i, j) in pattern.swaps() {
                gate = swap_qubits_gate(WORK_QUBITS, i, j)?.matmul(&gate)?;
            }
        }
        if self.flip_high {
            let not_high = Gates::get()
                .pauli_x
                .kron(&Matrix::identity(qubits_to_bits(WORK_QUBITS - 1)));
            gate = not_high.matmul(&gate)?;
        }
        Ok(gate)
    }
}

/// Controlled multiplication by `a` mod `modulus`, applied `power` times.
pub fn controlled_mod(a: u64, power: u64, modulus: u64) -> Result<Matrix, ShorError> {
    let gate = wiring(a, modulus)?.gate()?;
    Ok(gate.pow(power)?)
}

/// [`controlled_mod`] for modulus 15, restricted to [`MOD15_BASES`].
pub fn controlled_mod15(a: u64, power: u64) -> Result<Matrix, ShorError> {
    if !MOD15_BASES.contains(&a) {
        return Err(ShorError::InvalidBase {
            base: a,
            modulus: 15,
            allowed: MOD15_BASES.to_vec(),
        });
    }
    controlled_mod(a, power, 15)
}
