//! # Shor Factoring
//!
//! Shor's factoring algorithm on a classical machine. The period-finding step
//! is pluggable: [`ClassicalPeriodFinder`] computes the exact multiplicative
//! order, [`SimulatedPeriodFinder`] contracts a simulated counting register
//! built from controlled modular-multiplication gates.
//!
//! ```no_run
//! use shor_factoring::{ClassicalPeriodFinder, ShorConfig, ShorFactorizer};
//!
//! let factorizer = ShorFactorizer::new(ShorConfig::seeded(42));
//! let report = factorizer.factorize(21, &ClassicalPeriodFinder::default()).unwrap();
//! assert_eq!(report.result.factors, vec![3, 7]);
//! ```

pub mod config;
pub mod error;
pub mod estimator;
pub mod modexp;
pub mod orchestrator;
pub mod period;

pub use config::ShorConfig;
pub use error::ShorError;
pub use estimator::{BaseSupport, ClassicalPeriodFinder, PeriodFinder, SimulatedPeriodFinder};
pub use modexp::{allowed_bases, controlled_mod, controlled_mod15, MOD15_BASES};
pub use orchestrator::{factorize_classical, factorize_quantum, Outcome, ShorFactorizer, ShorReport};
pub use period::{estimate_period, period_find};
