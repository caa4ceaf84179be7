//! Period estimators: the pluggable "find the period of `base` mod
//! `modulus`" step of the factorization loop.

use std::sync::OnceLock;

use factoring_core::{gcd, multiplicative_order, Algorithm};
use quantum_circuit::gates::inverse_qft;
use quantum_circuit::Matrix;
use serde::{Deserialize, Serialize};

use crate::error::ShorError;
use crate::modexp::allowed_bases;
use crate::period::{check_counting_qubits, period_find_with, DEFAULT_COUNTING_QUBITS};

/// Which bases an estimator can handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseSupport {
    /// Any base coprime to the modulus
    Arbitrary,
    /// Only the bases returned by [`allowed_bases`]
    Whitelist,
}

/// Estimates the multiplicative period of `base` modulo `modulus`.
///
/// Estimates may be wrong; the caller verifies `base^r ≡ 1` before using one.
pub trait PeriodFinder {
    fn estimate(&self, modulus: u64, base: u64) -> Result<u64, ShorError>;

    fn base_support(&self) -> BaseSupport;

    /// Backend tag recorded in the factorization result.
    fn algorithm(&self) -> Algorithm;

    /// Whether `base` is worth passing to [`PeriodFinder::estimate`].
    fn supports(&self, modulus: u64, base: u64) -> bool {
        match self.base_support() {
            BaseSupport::Arbitrary => gcd(base, modulus) == 1,
            BaseSupport::Whitelist => allowed_bases(modulus)
                .map(|bases| bases.contains(&base))
                .unwrap_or(false),
        }
    }
}

/// Exact period by stepping through powers of the base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassicalPeriodFinder {
    /// Give up after this many powers
    pub max_period: u64,
}

impl Default for ClassicalPeriodFinder {
    fn default() -> Self {
        Self {
            max_period: 1 << 24,
        }
    }
}

impl PeriodFinder for ClassicalPeriodFinder {
    fn estimate(&self, modulus: u64, base: u64) -> Result<u64, ShorError> {
        if gcd(base, modulus) != 1 {
            return Err(ShorError::NotCoprime { base, modulus });
        }
        Ok(multiplicative_order(base, modulus, self.max_period)?)
    }

    fn base_support(&self) -> BaseSupport {
        BaseSupport::Arbitrary
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::ClassicalOrder
    }
}

/// Period estimate from the simulated counting register.
///
/// The inverse QFT is built on first use and reused for every later call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedPeriodFinder {
    /// Counting-register size (1, 2, 4 or 8)
    pub n_count: usize,
    #[serde(skip)]
    qft_dagger: OnceLock<Matrix>,
}

impl SimulatedPeriodFinder {
    pub fn new(n_count: usize) -> Result<Self, ShorError> {
        check_counting_qubits(n_count)?;
        Ok(Self {
            n_count,
            qft_dagger: OnceLock::new(),
        })
    }

    fn qft_dagger(&self) -> Result<&Matrix, ShorError> {
        if let Some(m) = self.qft_dagger.get() {
            return Ok(m);
        }
        let m = inverse_qft(self.n_count)?;
        Ok(self.qft_dagger.get_or_init(|| m))
    }
}

impl Default for SimulatedPeriodFinder {
    fn default() -> Self {
        Self {
            n_count: DEFAULT_COUNTING_QUBITS,
            qft_dagger: OnceLock::new(),
        }
    }
}

impl PeriodFinder for SimulatedPeriodFinder {
    fn estimate(&self, modulus: u64, base: u64) -> Result<u64, ShorError> {
        check_counting_qubits(self.n_count)?;
        // Reject unsupported bases before paying for the transform
        if !self.supports(modulus, base) {
            return Err(ShorError::InvalidBase {
                base,
                modulus,
                allowed: allowed_bases(modulus)?,
            });
        }
        period_find_with(self.qft_dagger()?, modulus, base, self.n_count)
    }

    fn base_support(&self) -> BaseSupport {
        BaseSupport::Whitelist
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::SimulatedCircuit
    }
}
