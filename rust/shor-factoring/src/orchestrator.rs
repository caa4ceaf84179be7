//! The classical control loop of Shor's algorithm.
//!
//! Small primes 2 and 5 are stripped first. The loop then repeatedly guesses
//! a base, asks a [`PeriodFinder`] for its period, and pulls factors out of
//! the working cofactor with `gcd(base^(r/2) ± 1, cofactor)`. Every factor
//! appended is exactly what the cofactor was divided by, so the product of
//! the accumulator and the cofactor always equals the input.

use std::collections::BTreeMap;
use std::time::Instant;

use factoring_core::{gcd, is_perfect_square, isqrt, mod_pow, FactorResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::ShorConfig;
use crate::error::ShorError;
use crate::estimator::{ClassicalPeriodFinder, PeriodFinder, SimulatedPeriodFinder};

/// How a factorization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The cofactor was reduced to 1
    Complete,
    /// The cofactor was a perfect square and was split by its root
    PerfectSquare,
    /// Stopped after the first extraction, cofactor appended as-is
    QuickCompute,
    /// Ran out of iterations; the remaining cofactor was appended as-is
    Exhausted,
}

/// Everything a run produced, including the recoverable failures it absorbed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShorReport {
    pub result: FactorResult,
    pub outcome: Outcome,
    /// Main-loop iterations entered (never more than the configured limit)
    pub iterations: usize,
    /// Count of absorbed errors by kind
    pub recoverable_errors: BTreeMap<String, usize>,
}

impl ShorReport {
    pub fn total_errors(&self) -> usize {
        self.recoverable_errors.values().sum()
    }
}

/// Drives a [`PeriodFinder`] to a factorization.
#[derive(Debug, Clone, Default)]
pub struct ShorFactorizer {
    config: ShorConfig,
}

/// Mutable state of one run.
struct Run {
    cofactor: u64,
    factors: Vec<u64>,
    errors: BTreeMap<String, usize>,
}

impl Run {
    fn pull(&mut self, factor: u64) {
        self.factors.push(factor);
        if factor > 1 {
            self.cofactor /= factor;
        }
    }

    fn strip(&mut self, prime: u64) {
        while self.cofactor % prime == 0 {
            self.pull(prime);
        }
    }
}

impl ShorFactorizer {
    pub fn new(config: ShorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShorConfig {
        &self.config
    }

    /// Factor `n`. Only `n == 0` is an error; running out of iterations
    /// returns a partial factorization with [`Outcome::Exhausted`].
    pub fn factorize(&self, n: u64, finder: &dyn PeriodFinder) -> Result<ShorReport, ShorError> {
        if n == 0 {
            return Err(ShorError::ZeroInput);
        }
        let start = Instant::now();
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        log::info!(
            "Factoring {} with {} (limit {}, {:?} bases)",
            n,
            finder.algorithm(),
            self.config.limit,
            finder.base_support()
        );

        let mut run = Run {
            cofactor: n,
            factors: Vec::new(),
            errors: BTreeMap::new(),
        };
        run.strip(2);
        run.strip(5);

        let mut iterations = 0;
        let mut outcome = None;
        while iterations < self.config.limit {
            iterations += 1;
            if run.cofactor == 1 {
                outcome = Some(Outcome::Complete);
                break;
            }
            if is_perfect_square(run.cofactor) {
                let root = isqrt(run.cofactor);
                run.pull(root);
                run.pull(root);
                outcome = Some(Outcome::PerfectSquare);
                break;
            }

            match self.attempt(&mut run, &mut rng, finder) {
                Ok(Some(done)) => {
                    outcome = Some(done);
                    break;
                }
                Ok(None) => {}
                Err(e) => self.record(&mut run, iterations, e),
            }
        }

        let complete = run.cofactor == 1;
        let outcome = match outcome {
            Some(outcome) => outcome,
            None if complete => Outcome::Complete,
            None => Outcome::Exhausted,
        };
        if !complete {
            let rest = run.cofactor;
            run.pull(rest);
        }

        let mut factors = run.factors;
        factors.retain(|&f| f != 1);
        factors.sort_unstable();

        log::info!(
            "{} -> {:?} ({:?} after {} iterations, {} recoverable errors)",
            n,
            factors,
            outcome,
            iterations,
            run.errors.values().sum::<usize>()
        );

        Ok(ShorReport {
            result: FactorResult {
                n,
                factors,
                algorithm: finder.algorithm(),
                duration: start.elapsed(),
                complete,
            },
            outcome,
            iterations,
            recoverable_errors: run.errors,
        })
    }

    /// One guess. `Ok(Some(_))` ends the run, `Ok(None)` moves on, `Err` is
    /// recorded and retried.
    fn attempt(
        &self,
        run: &mut Run,
        rng: &mut StdRng,
        finder: &dyn PeriodFinder,
    ) -> Result<Option<Outcome>, ShorError> {
        let cofactor = run.cofactor;
        if cofactor < 4 {
            return Err(ShorError::EmptyRange { cofactor });
        }
        let base = rng.gen_range(3..cofactor);

        let period = finder.estimate(cofactor, base)?;
        if period == 0 || mod_pow(base, period, cofactor)? != 1 {
            return Err(ShorError::InvalidPeriod {
                base,
                modulus: cofactor,
                period,
            });
        }
        if period % 2 != 0 {
            log::debug!("odd period {} for base {} mod {}", period, base, cofactor);
            return Ok(None);
        }

        let half = mod_pow(base, period / 2, cofactor)?;
        // half < cofactor, so neither side can overflow
        let plus = (half + 1) % cofactor;
        let minus = if half == 0 { cofactor - 1 } else { half - 1 };
        if plus == 0 || minus == 0 {
            log::debug!("base {} gives a trivial square root mod {}", base, cofactor);
            return Ok(None);
        }

        run.pull(gcd(plus, run.cofactor));
        run.pull(gcd(minus, run.cofactor));
        if period == 2 {
            run.pull(gcd(base, run.cofactor));
            run.pull(gcd(base, run.cofactor));
        }
        log::debug!(
            "base {} (period {}) split {} down to {}",
            base,
            period,
            cofactor,
            run.cofactor
        );

        if self.config.quick_compute {
            // Whatever is left gets appended after the loop
            return Ok(Some(Outcome::QuickCompute));
        }
        Ok(None)
    }

    fn record(&self, run: &mut Run, iteration: usize, err: ShorError) {
        if self.config.show_errors {
            log::warn!("iteration {}: {}", iteration, err);
        } else {
            log::debug!("iteration {}: {}", iteration, err);
        }
        *run.errors.entry(err.kind().to_string()).or_insert(0) += 1;
    }
}

/// Factor `n` with the default configuration and the classical estimator.
pub fn factorize_classical(n: u64) -> Result<Vec<u64>, ShorError> {
    let report = ShorFactorizer::default().factorize(n, &ClassicalPeriodFinder::default())?;
    Ok(report.result.factors)
}

/// Factor `n` with the default configuration and the simulated-circuit
/// estimator.
pub fn factorize_quantum(n: u64) -> Result<Vec<u64>, ShorError> {
    let report = ShorFactorizer::default().factorize(n, &SimulatedPeriodFinder::default())?;
    Ok(report.result.factors)
}
