use factoring_core::NumberTheoryError;
use quantum_circuit::CircuitError;

/// Errors raised by the modular-exponentiation builder, period estimators
/// and the factorization driver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShorError {
    #[error("base {base} is not supported for modulus {modulus} (allowed: {allowed:?})")]
    InvalidBase {
        base: u64,
        modulus: u64,
        allowed: Vec<u64>,
    },

    #[error("modulus {0} is not supported (must be odd and at least 5)")]
    InvalidModulus(u64),

    #[error("base {base} shares a factor with modulus {modulus}")]
    NotCoprime { base: u64, modulus: u64 },

    #[error("counting register of {0} qubits is not supported")]
    InvalidCountingQubits(usize),

    #[error("no candidate base in [3, {cofactor}) to sample")]
    EmptyRange { cofactor: u64 },

    #[error("estimated period {period} is not a period of {base} mod {modulus}")]
    InvalidPeriod { base: u64, modulus: u64, period: u64 },

    /// Reported by period finders whose own arithmetic overflows
    #[error("arithmetic overflow: {0}")]
    Overflow(String),

    #[error("period search failed: {0}")]
    NoPeriod(String),

    #[error("cannot factor zero")]
    ZeroInput,

    #[error("circuit error: {0}")]
    Circuit(#[from] CircuitError),

    #[error("number theory error: {0}")]
    NumberTheory(NumberTheoryError),
}

impl From<NumberTheoryError> for ShorError {
    fn from(err: NumberTheoryError) -> Self {
        match err {
            NumberTheoryError::NoPeriod { .. } => ShorError::NoPeriod(err.to_string()),
            NumberTheoryError::ZeroModulus => ShorError::NumberTheory(err),
        }
    }
}

impl ShorError {
    /// Short label used when tallying recoverable errors in a run report.
    pub fn kind(&self) -> &'static str {
        match self {
            ShorError::InvalidBase { .. } => "invalid_base",
            ShorError::InvalidModulus(_) => "invalid_modulus",
            ShorError::NotCoprime { .. } => "not_coprime",
            ShorError::InvalidCountingQubits(_) => "invalid_counting_qubits",
            ShorError::EmptyRange { .. } => "empty_range",
            ShorError::InvalidPeriod { .. } => "invalid_period",
            ShorError::Overflow(_) => "overflow",
            ShorError::NoPeriod(_) => "no_period",
            ShorError::ZeroInput => "zero_input",
            ShorError::Circuit(_) => "circuit",
            ShorError::NumberTheory(_) => "number_theory",
        }
    }
}
