//! Shor factoring demo CLI
//!
//! Usage:
//!   shor-factoring --mode=factor [--n=15,21,35,100] [--finder=classical|quantum]
//!                  [--limit=1000] [--n-count=8] [--quick] [--seed=N] [--show-errors]
//!                  [--json] [--out=path.json]
//!   shor-factoring --mode=period [--n=15] [--base=2,7] [--n-count=8]
//!   shor-factoring --mode=gates  [--decimals=3]
//!
//! Modes:
//!   factor: run the factorization loop on each number
//!   period: compare simulated period estimates with the exact order
//!   gates:  print the fixed gates and a small QFT
//!
//! Logging goes through RUST_LOG, e.g. RUST_LOG=shor_factoring=debug.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use factoring_core::multiplicative_order;
use quantum_circuit::gates::{inverse_qft, qft};
use quantum_circuit::state::format_qubits;
use quantum_circuit::Gates;
use serde::Serialize;
use shor_factoring::{
    allowed_bases, period_find, ClassicalPeriodFinder, PeriodFinder, ShorConfig, ShorFactorizer,
    ShorReport, SimulatedPeriodFinder,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_args(&args);

    let mode = opts.get("mode").map(|s| s.as_str()).unwrap_or("factor");

    match mode {
        "factor" => run_factor(&opts),
        "period" => run_period(&opts),
        "gates" => run_gates(&opts),
        other => {
            eprintln!("Unknown mode: {other}. Use --mode=factor|period|gates");
            std::process::exit(1);
        }
    }
}

fn run_factor(opts: &HashMap<String, String>) {
    let numbers = parse_list(opts, "n", &[15, 21, 35, 100, 9973 * 17]);
    let config = ShorConfig {
        limit: parse_or(opts, "limit", 1000),
        quick_compute: opts.contains_key("quick"),
        show_errors: opts.contains_key("show-errors"),
        seed: opts.get("seed").and_then(|v| v.parse().ok()),
    };
    let finder: Box<dyn PeriodFinder> = match opts.get("finder").map(|s| s.as_str()) {
        None | Some("classical") => Box::new(ClassicalPeriodFinder::default()),
        Some("quantum") => {
            let n_count = parse_or(opts, "n-count", 8);
            match SimulatedPeriodFinder::new(n_count) {
                Ok(finder) => Box::new(finder),
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(other) => {
            eprintln!("Unknown finder: {other}. Use --finder=classical|quantum");
            std::process::exit(1);
        }
    };

    let factorizer = ShorFactorizer::new(config);
    let json = opts.contains_key("json");
    if !json {
        println!("=== Shor Factoring ({}) ===\n", finder.algorithm());
        println!(
            "  {:>12}  {:<24}  {:>13}  {:>6}  {:>6}  {:>10}",
            "N", "Factors", "Outcome", "Iters", "Errors", "Time"
        );
        println!("  {}", "-".repeat(82));
    }

    let mut reports: Vec<ShorReport> = Vec::new();
    for n in numbers {
        match factorizer.factorize(n, finder.as_ref()) {
            Ok(report) => {
                if !json {
                    println!(
                        "  {:>12}  {:<24}  {:>13}  {:>6}  {:>6}  {:>10}",
                        n,
                        format!("{:?}", report.result.factors),
                        format!("{:?}", report.outcome),
                        report.iterations,
                        report.total_errors(),
                        format!("{:.2?}", report.result.duration)
                    );
                }
                reports.push(report);
            }
            Err(e) => eprintln!("  {n:>12}  error: {e}"),
        }
    }

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("Warning: could not serialize results: {e}"),
        }
    }
    if let Some(path) = opts.get("out") {
        write_json(&reports, Path::new(path));
    }
}

#[derive(Serialize)]
struct PeriodRow {
    modulus: u64,
    base: u64,
    estimate: Option<u64>,
    exact: Option<u64>,
}

fn run_period(opts: &HashMap<String, String>) {
    let modulus = parse_or(opts, "n", 15);
    let n_count = parse_or(opts, "n-count", 8);
    let bases = match opts.get("base") {
        Some(_) => parse_list(opts, "base", &[]),
        None => match allowed_bases(modulus) {
            Ok(bases) => bases,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
    };

    println!("=== Period Estimates mod {modulus} ({n_count} counting qubits) ===\n");
    println!("  {:>6}  {:>9}  {:>6}", "Base", "Estimate", "Exact");
    println!("  {}", "-".repeat(25));

    let mut rows = Vec::new();
    for base in bases {
        let estimate = period_find(modulus, base, n_count);
        let exact = multiplicative_order(base, modulus, 1 << 24).ok();
        match &estimate {
            Ok(r) => println!("  {:>6}  {:>9}  {:>6}", base, r, show(exact)),
            Err(e) => println!("  {:>6}  {:>9}  {:>6}  ({e})", base, "-", show(exact)),
        }
        rows.push(PeriodRow {
            modulus,
            base,
            estimate: estimate.ok(),
            exact,
        });
    }

    if let Some(path) = opts.get("out") {
        write_json(&rows, Path::new(path));
    }
}

fn run_gates(opts: &HashMap<String, String>) {
    let decimals = parse_or(opts, "decimals", 3);
    let g = Gates::get();

    println!("=== Fixed Gates ===\n");
    for (name, gate) in [
        ("Pauli-X", &g.pauli_x),
        ("Pauli-Y", &g.pauli_y),
        ("Pauli-Z", &g.pauli_z),
        ("Hadamard", &g.hadamard),
        ("H (x) I", &g.h1),
        ("Swap", &g.swap),
        ("CNOT", &g.cnot),
        ("CY", &g.cy),
        ("CZ", &g.cz),
    ] {
        println!("{name}:");
        print!("{}", gate.rounded(decimals));
        println!();
    }

    println!("=== QFT(2) and its inverse ===\n");
    match (qft(2), inverse_qft(2)) {
        (Ok(f), Ok(inv)) => print!("{}", format_qubits(&[f, inv], Some(decimals))),
        (Err(e), _) | (_, Err(e)) => eprintln!("Error: {e}"),
    }
}

fn show(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// `--key=value` pairs; a bare `--flag` maps to `"true"`.
fn parse_args(args: &[String]) -> HashMap<String, String> {
    args.iter()
        .filter_map(|arg| arg.strip_prefix("--"))
        .map(|kv| match kv.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (kv.to_string(), "true".to_string()),
        })
        .collect()
}

fn parse_or<T: FromStr>(opts: &HashMap<String, String>, key: &str, default: T) -> T {
    opts.get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_list(opts: &HashMap<String, String>, key: &str, default: &[u64]) -> Vec<u64> {
    opts.get(key)
        .map(|v| v.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_else(|| default.to_vec())
}

fn write_json<T: Serialize>(value: &T, path: &Path) {
    let written = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or(Ok(()), fs::create_dir_all)
        .map_err(|e| e.to_string())
        .and_then(|()| serde_json::to_string_pretty(value).map_err(|e| e.to_string()))
        .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
    match written {
        Ok(()) => println!("\nResults written to {}", path.display()),
        Err(e) => eprintln!("Warning: could not write {}: {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(args: &[&str]) -> HashMap<String, String> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args(&args)
    }

    #[test]
    fn test_flags_and_values() {
        let o = opts(&["--mode=period", "--quick", "stray", "--n=15,21, 35,x"]);
        assert_eq!(o.get("mode").map(String::as_str), Some("period"));
        assert_eq!(o.get("quick").map(String::as_str), Some("true"));
        assert!(!o.contains_key("stray"));
        assert_eq!(parse_list(&o, "n", &[]), vec![15, 21, 35]);
        assert_eq!(parse_list(&o, "base", &[2, 7]), vec![2, 7]);
    }

    #[test]
    fn test_typed_defaults() {
        let o = opts(&["--limit=50", "--decimals=x"]);
        assert_eq!(parse_or::<usize>(&o, "limit", 1000), 50);
        assert_eq!(parse_or::<u32>(&o, "decimals", 3), 3);
        assert_eq!(parse_or::<u64>(&o, "n", 15), 15);
    }
}
