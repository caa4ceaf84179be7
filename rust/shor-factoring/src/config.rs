use serde::{Deserialize, Serialize};

/// Configuration for the factorization driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShorConfig {
    /// Maximum main-loop iterations before giving up with a partial result
    pub limit: usize,
    /// Stop after the first successful gcd extraction, appending the
    /// remaining cofactor as-is
    pub quick_compute: bool,
    /// Surface recoverable errors at `warn` instead of `debug`
    pub show_errors: bool,
    /// Seed for candidate-base sampling; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for ShorConfig {
    fn default() -> Self {
        Self {
            limit: 1000,
            quick_compute: false,
            show_errors: false,
            seed: None,
        }
    }
}

impl ShorConfig {
    /// Default configuration with a fixed sampling seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
