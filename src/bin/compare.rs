//! Benchmark comparison tool.
//!
//! Compares two JSON report files produced by `run-bench` and prints a table
//! of mean-time deltas.
//!
//! Usage: `bench-compare <baseline.json> <candidate.json>`

use bfs_benchmarks::report::fmt_us;
use bfs_benchmarks::schema::{BenchmarkReport, BenchmarkResult};

use std::collections::HashMap;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <baseline.json> <candidate.json>", args[0]);
        std::process::exit(1);
    }

    let baseline = load_report(&args[1]);
    let candidate = load_report(&args[2]);

    let base_map: HashMap<&str, &BenchmarkResult> = baseline
        .results
        .iter()
        .map(|r| (r.benchmark.as_str(), r))
        .collect();

    eprintln!("Baseline: {} ({})", args[1], baseline.metadata.timestamp);
    eprintln!("Candidate: {} ({})", args[2], candidate.metadata.timestamp);
    eprintln!();

    println!(
        "{:<40} | {:>12} | {:>12} | {:>12}",
        "Benchmark", "Base mean", "New mean", "Delta"
    );
    println!("{}", "-".repeat(84));

    let mut matched = 0u32;
    let mut only_cand = 0u32;

    for cand in &candidate.results {
        match base_map.get(cand.benchmark.as_str()) {
            Some(base) => {
                matched += 1;
                print_comparison(cand, base);
            }
            None => only_cand += 1,
        }
    }

    let only_base = baseline
        .results
        .iter()
        .filter(|r| {
            !candidate
                .results
                .iter()
                .any(|c| c.benchmark == r.benchmark)
        })
        .count();

    println!("{}", "-".repeat(84));
    println!(
        "Compared: {} | Baseline only: {} | Candidate only: {}",
        matched, only_base, only_cand
    );
}

fn load_report(path: &str) -> BenchmarkReport {
    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    });
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        eprintln!("Error parsing {}: {}", path, e);
        std::process::exit(1);
    })
}

fn print_comparison(cand: &BenchmarkResult, base: &BenchmarkResult) {
    let (Some(base_mean), Some(cand_mean)) = (base.metrics.mean_us, cand.metrics.mean_us) else {
        println!("{:<40} | {:>12} | {:>12} | {:>12}", cand.benchmark, "-", "-", "-");
        return;
    };

    let delta_pct = if base_mean > 0.0 {
        (cand_mean - base_mean) / base_mean * 100.0
    } else {
        0.0
    };
    let hint = if delta_pct < -1.0 {
        "faster"
    } else if delta_pct > 1.0 {
        "slower"
    } else {
        "~same"
    };

    println!(
        "{:<40} | {:>12} | {:>12} | {:>+.1}% ({})",
        cand.benchmark,
        fmt_us(base_mean),
        fmt_us(cand_mean),
        delta_pct,
        hint,
    );
}
