//! Shared number-theory helpers and result types for Shor-style factorization.
//!
//! Everything here works on `u64`; modular products go through `u128`
//! intermediates, so any `u64` modulus is usable.

use num_bigint::BigUint;
use num_integer::{Integer, Roots};
use num_traits::One;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Errors raised by the number-theory helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberTheoryError {
    #[error("{base} has no multiplicative period modulo {modulus} (searched up to {searched})")]
    NoPeriod {
        base: u64,
        modulus: u64,
        searched: u64,
    },

    #[error("modulus must be non-zero")]
    ZeroModulus,
}

/// Which period-finding backend produced a factorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    ClassicalOrder,
    SimulatedCircuit,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::ClassicalOrder => write!(f, "Classical modular order"),
            Algorithm::SimulatedCircuit => write!(f, "Simulated quantum circuit"),
        }
    }
}

/// Result of a factorization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorResult {
    /// The number that was factored
    pub n: u64,
    /// Factors found, sorted ascending, with no 1 entries
    pub factors: Vec<u64>,
    /// Which period-finding backend drove the run
    pub algorithm: Algorithm,
    /// Time taken
    pub duration: Duration,
    /// Whether the cofactor was driven all the way to 1
    pub complete: bool,
}

impl FactorResult {
    /// Check the factor list: sorted, every entry > 1, product equals `n`.
    pub fn verify(&self) -> bool {
        let sorted = self.factors.windows(2).all(|w| w[0] <= w[1]);
        let nontrivial = self.factors.iter().all(|&f| f > 1);
        sorted && nontrivial && product(&self.factors) == BigUint::from(self.n)
    }
}

/// Product of a factor list, computed without overflow.
pub fn product(factors: &[u64]) -> BigUint {
    factors
        .iter()
        .fold(BigUint::one(), |acc, &f| acc * BigUint::from(f))
}

/// Greatest common divisor.
pub fn gcd(a: u64, b: u64) -> u64 {
    a.gcd(&b)
}

/// Floor of the square root.
pub fn isqrt(n: u64) -> u64 {
    n.sqrt()
}

/// `isqrt(n)^2 == n`.
pub fn is_perfect_square(n: u64) -> bool {
    let r = isqrt(n);
    r.checked_mul(r) == Some(n)
}

/// `a * b mod m` with a `u128` intermediate.
pub fn mod_mul(a: u64, b: u64, m: u64) -> Result<u64, NumberTheoryError> {
    if m == 0 {
        return Err(NumberTheoryError::ZeroModulus);
    }
    Ok(((a as u128 * b as u128) % m as u128) as u64)
}

/// Modular exponentiation by squaring: `base^exp mod m`.
pub fn mod_pow(base: u64, exp: u64, m: u64) -> Result<u64, NumberTheoryError> {
    if m == 0 {
        return Err(NumberTheoryError::ZeroModulus);
    }
    let mut result = 1 % m;
    let mut base = base % m;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mod_mul(result, base, m)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = mod_mul(base, base, m)?;
        }
    }
    Ok(result)
}

/// Classical period of `f(x) = base^x mod modulus`: the smallest `r >= 1`
/// with `base^r ≡ 1`. Exponential in general; only meant for small moduli.
pub fn multiplicative_order(
    base: u64,
    modulus: u64,
    max_period: u64,
) -> Result<u64, NumberTheoryError> {
    if modulus == 0 {
        return Err(NumberTheoryError::ZeroModulus);
    }
    let no_period = NumberTheoryError::NoPeriod {
        base,
        modulus,
        searched: 0,
    };
    if modulus == 1 {
        return Ok(1);
    }
    if gcd(base, modulus) != 1 {
        return Err(no_period);
    }

    let start = base % modulus;
    let mut current = start;
    for period in 1..=max_period {
        if current == 1 {
            return Ok(period);
        }
        current = mod_mul(current, start, modulus)?;
    }

    Err(NumberTheoryError::NoPeriod {
        base,
        modulus,
        searched: max_period,
    })
}
