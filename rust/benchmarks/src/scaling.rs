//! Scaling run for the factorization loop.
//!
//! Factors random semiprimes of increasing bit size with the exact-order
//! finder, then runs the simulated circuit finder on the mod-15 family,
//! reporting time, iterations and recoverable errors per target.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shor_factoring::{
    ClassicalPeriodFinder, Outcome, ShorConfig, ShorFactorizer, ShorReport, SimulatedPeriodFinder,
};

/// Maximum time per single factorization (seconds).
const TIMEOUT_SECS: u64 = 30;

/// A random semiprime `n = p * q`.
struct Target {
    bit_size: u32,
    n: u64,
    p: u64,
    q: u64,
}

/// Run a closure with a timeout. Returns None if timed out.
fn with_timeout<T: Send + 'static>(
    timeout: Duration,
    f: impl FnOnce() -> T + Send + 'static,
) -> Option<(T, Duration)> {
    let (tx, rx) = mpsc::channel();
    let start = Instant::now();
    std::thread::spawn(move || {
        let result = f();
        let _ = tx.send(result);
    });
    match rx.recv_timeout(timeout) {
        Ok(result) => Some((result, start.elapsed())),
        Err(_) => None,
    }
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Random odd prime with exactly `bits` bits.
fn random_prime(bits: u32, rng: &mut impl Rng) -> u64 {
    let lo = 1u64 << (bits - 1);
    let hi = 1u64 << bits;
    loop {
        let candidate = rng.gen_range(lo..hi) | 1;
        if candidate > 2 && is_prime(candidate) {
            return candidate;
        }
    }
}

fn generate_target(bits: u32, rng: &mut impl Rng) -> Target {
    let half = (bits / 2).max(3);
    loop {
        let p = random_prime(half, rng);
        let q = random_prime(bits - half, rng);
        // Distinct primes keep the perfect-square shortcut out of the timings
        if p != q {
            let (p, q) = (p.min(q), p.max(q));
            return Target {
                bit_size: bits,
                n: p * q,
                p,
                q,
            };
        }
    }
}

fn main() {
    env_logger::init();

    println!("================================================================");
    println!("  SCALING: Shor factorization with exact-order period finding");
    println!("================================================================\n");

    let mut rng = StdRng::seed_from_u64(12345);
    let bit_sizes: Vec<u32> = vec![8, 12, 16, 20, 24, 28];
    let targets: Vec<Target> = bit_sizes
        .iter()
        .map(|&bits| generate_target(bits, &mut rng))
        .collect();

    println!("Test semiprimes:");
    for t in &targets {
        println!("  {:>2}-bit: N = {} = {} x {}", t.bit_size, t.n, t.p, t.q);
    }
    println!();

    bench_classical(&targets);
    bench_simulated();
}

fn bench_classical(targets: &[Target]) {
    println!(
        "  {:>5} {:>14} {:>12} {:>6} {:>7} {:>13}",
        "bits", "N", "time_us", "iters", "errors", "status"
    );
    println!("  {}", "-".repeat(64));

    for t in targets {
        let n = t.n;
        let run = with_timeout(Duration::from_secs(TIMEOUT_SECS), move || {
            ShorFactorizer::new(ShorConfig::seeded(n))
                .factorize(n, &ClassicalPeriodFinder::default())
        });

        match run {
            Some((Ok(report), elapsed)) => {
                let status = status(&report, t);
                println!(
                    "  {:>5} {:>14} {:>12} {:>6} {:>7} {:>13}",
                    t.bit_size,
                    n,
                    elapsed.as_micros(),
                    report.iterations,
                    report.total_errors(),
                    status
                );
            }
            Some((Err(e), _)) => {
                println!("  {:>5} {:>14} {:>12}  error: {e}", t.bit_size, n, "-");
            }
            None => {
                println!(
                    "  {:>5} {:>14} {:>12} {:>6} {:>7} {:>13}",
                    t.bit_size, n, "-", "-", "-", "TIMEOUT"
                );
            }
        }
    }
    println!();
}

fn status(report: &ShorReport, target: &Target) -> &'static str {
    if !report.result.verify() {
        return "BAD PRODUCT";
    }
    match report.outcome {
        Outcome::Complete if report.result.factors == [target.p, target.q] => "SPLIT",
        Outcome::Complete | Outcome::PerfectSquare => "COMPLETE",
        Outcome::QuickCompute => "QUICK",
        Outcome::Exhausted => "EXHAUSTED",
    }
}

fn bench_simulated() {
    println!("  Simulated circuit finder on the mod-15 family:");
    println!(
        "  {:>6} {:>16} {:>12} {:>6} {:>7}",
        "N", "factors", "time_us", "iters", "errors"
    );
    println!("  {}", "-".repeat(54));

    let finder = SimulatedPeriodFinder::default();
    for n in [15u64, 45, 105, 225] {
        let config = ShorConfig {
            limit: 50,
            ..ShorConfig::seeded(n)
        };
        let start = Instant::now();
        match ShorFactorizer::new(config).factorize(n, &finder) {
            Ok(report) => println!(
                "  {:>6} {:>16} {:>12} {:>6} {:>7}",
                n,
                format!("{:?}", report.result.factors),
                start.elapsed().as_micros(),
                report.iterations,
                report.total_errors()
            ),
            Err(e) => println!("  {n:>6}  error: {e}"),
        }
    }
}
