//! End-to-end tests of the factorization loop and the simulated period finder.

use factoring_core::{multiplicative_order, product, Algorithm};
use num_bigint::BigUint;
use shor_factoring::{
    factorize_classical, factorize_quantum, period_find, ClassicalPeriodFinder, Outcome,
    ShorConfig, ShorError, ShorFactorizer, SimulatedPeriodFinder,
};

fn classical(seed: u64) -> (ShorFactorizer, ClassicalPeriodFinder) {
    (
        ShorFactorizer::new(ShorConfig::seeded(seed)),
        ClassicalPeriodFinder::default(),
    )
}

#[test]
fn test_factorize_fifteen() {
    assert_eq!(factorize_classical(15).unwrap(), vec![3, 5]);
}

#[test]
fn test_factorize_hundred() {
    assert_eq!(factorize_classical(100).unwrap(), vec![2, 2, 5, 5]);
}

#[test]
fn test_composite_set_products() {
    let (factorizer, finder) = classical(2024);
    for n in [15u64, 21, 35, 100, 9973 * 17] {
        let report = factorizer.factorize(n, &finder).unwrap();
        let factors = &report.result.factors;
        assert_eq!(product(factors), BigUint::from(n), "{n} -> {factors:?}");
        assert!(factors.iter().all(|&f| f > 1), "{n} -> {factors:?}");
        assert!(factors.windows(2).all(|w| w[0] <= w[1]), "{n} -> {factors:?}");
        assert!(report.iterations <= 1000);
        assert_eq!(report.result.algorithm, Algorithm::ClassicalOrder);
    }
}

#[test]
fn test_semiprime_split() {
    let (factorizer, finder) = classical(17);
    let report = factorizer.factorize(9973 * 17, &finder).unwrap();
    assert_eq!(report.result.factors, vec![17, 9973]);
    assert_eq!(report.outcome, Outcome::Complete);
    assert!(report.result.verify());
}

#[test]
fn test_perfect_squares() {
    let (factorizer, finder) = classical(1);
    // 3^2, 7^2, 11^2 * 4, 13^2 * 25
    for (n, expected) in [
        (9u64, vec![3, 3]),
        (49, vec![7, 7]),
        (484, vec![2, 2, 11, 11]),
        (4225, vec![5, 5, 13, 13]),
    ] {
        let report = factorizer.factorize(n, &finder).unwrap();
        assert_eq!(report.result.factors, expected, "{n}");
        assert_eq!(report.outcome, Outcome::PerfectSquare);
        assert_eq!(report.total_errors(), 0);
    }
}

#[test]
fn test_limit_one_partial_result_divides_input() {
    for n in [21u64, 77, 143, 9973 * 17] {
        let config = ShorConfig {
            limit: 1,
            ..ShorConfig::seeded(n)
        };
        let report = ShorFactorizer::new(config)
            .factorize(n, &ClassicalPeriodFinder::default())
            .unwrap();
        assert!(report.iterations <= 1);
        assert_eq!(product(&report.result.factors), BigUint::from(n));
    }
}

#[test]
fn test_prime_input_is_returned_whole() {
    let config = ShorConfig {
        limit: 25,
        ..ShorConfig::seeded(3)
    };
    let report = ShorFactorizer::new(config)
        .factorize(9973, &ClassicalPeriodFinder::default())
        .unwrap();
    assert_eq!(report.result.factors, vec![9973]);
    assert_eq!(report.outcome, Outcome::Exhausted);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = || {
        let (factorizer, finder) = classical(99);
        let report = factorizer.factorize(3 * 7 * 11 * 13, &finder).unwrap();
        (report.result.factors, report.iterations, report.recoverable_errors)
    };
    assert_eq!(run(), run());
}

#[test]
fn test_zero_input() {
    assert_eq!(factorize_classical(0), Err(ShorError::ZeroInput));
}

#[test]
fn test_simulated_estimates_mod15() {
    assert_eq!(period_find(15, 2, 8).unwrap(), 4);
    assert_eq!(period_find(15, 8, 8).unwrap(), 4);
    assert_eq!(multiplicative_order(2, 15, 100).unwrap(), 4);
    // Bases wired with the high-qubit NOT produce the zero candidate,
    // even though 7 has period 4
    assert_eq!(period_find(15, 7, 8).unwrap(), 0);
    assert_eq!(multiplicative_order(7, 15, 100).unwrap(), 4);
}

#[test]
fn test_quantum_factorizer() {
    assert_eq!(factorize_quantum(15).unwrap(), vec![3, 5]);

    let config = ShorConfig {
        limit: 40,
        ..ShorConfig::seeded(5)
    };
    let report = ShorFactorizer::new(config)
        .factorize(3 * 7 * 5, &SimulatedPeriodFinder::default())
        .unwrap();
    assert_eq!(product(&report.result.factors), BigUint::from(105u64));
    assert_eq!(report.result.algorithm, Algorithm::SimulatedCircuit);
    assert!(report.iterations <= 40);
}

#[test]
fn test_report_serializes() {
    let (factorizer, finder) = classical(4);
    let report = factorizer.factorize(100, &finder).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"], "Complete");
    assert_eq!(json["result"]["factors"], serde_json::json!([2, 2, 5, 5]));
    assert_eq!(json["result"]["algorithm"], "ClassicalOrder");
}
