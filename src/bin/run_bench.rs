//! Benchmark repetition driver.
//!
//! Runs the BFS engine executable a number of times, scrapes the kernel and
//! total durations it prints per run, and summarizes them. A JSON report is
//! saved under `results/` for later comparison with `bench-compare`.
//!
//! Usage: `run-bench <iters> -- <executable> [args...]`
//!
//! The engine is expected to print, once per run:
//!
//! ```text
//! [*] Kernels duration: <n> us
//! [*] Total duration: <n> us
//! ```
//!
//! Runs exiting non-zero contribute no samples and are counted as failed.

use bfs_benchmarks::report::ReportWriter;
use bfs_benchmarks::schema::{BenchmarkMetrics, BenchmarkResult};
use bfs_benchmarks::stats::Summary;

use std::collections::HashMap;
use std::process::Command;

struct Config {
    iters: usize,
    program: String,
    args: Vec<String>,
}

fn parse_args() -> Result<Config, String> {
    let mut args = std::env::args().skip(1);
    let iters: usize = args
        .next()
        .ok_or("missing iteration count")?
        .parse()
        .map_err(|e| format!("bad iteration count: {}", e))?;
    if iters == 0 {
        return Err("iteration count must be at least 1".into());
    }

    let mut rest: Vec<String> = args.collect();
    if rest.first().map(String::as_str) == Some("--") {
        rest.remove(0);
    }
    if rest.is_empty() {
        return Err("missing executable".into());
    }
    let program = rest.remove(0);
    Ok(Config {
        iters,
        program,
        args: rest,
    })
}

/// Second-to-last whitespace token of the line, as a microsecond sample.
/// The engine prints `[*] Kernels duration: 1234 us`.
fn scrape_us(line: &str) -> Option<f64> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let token = tokens.get(tokens.len().checked_sub(2)?)?;
    token.parse::<u64>().ok().map(|us| us as f64)
}

fn print_pair(label: &str, kernel: f64, total: f64) {
    println!("- {} kernel time: {}", label, kernel);
    println!("- {} runtime time: {}", label, total);
}

fn main() {
    let config = parse_args().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Usage: run-bench <iters> -- <executable> [args...]");
        std::process::exit(1);
    });

    let mut kernel_times: Vec<f64> = Vec::new();
    let mut total_times: Vec<f64> = Vec::new();
    let mut failed_runs: u64 = 0;

    eprintln!("[*] Running benchmark...");
    for run in 1..=config.iters {
        eprint!("\r  run {}/{}", run, config.iters);
        let output = Command::new(&config.program)
            .args(&config.args)
            .output()
            .unwrap_or_else(|e| {
                eprintln!("\nError spawning {}: {}", config.program, e);
                std::process::exit(1);
            });

        if !output.status.success() {
            failed_runs += 1;
            continue;
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines() {
            if line.contains("Kernels") {
                kernel_times.extend(scrape_us(line));
            } else if line.contains("Total") {
                total_times.extend(scrape_us(line));
            }
        }
    }
    eprintln!();
    eprintln!("[*] Benchmark finished (all results are expressed in us)");

    let kernel = Summary::from_samples(&kernel_times);
    let total = Summary::from_samples(&total_times);
    let (Some(kernel), Some(total)) = (kernel, total) else {
        eprintln!(
            "Error: no timing samples collected ({} of {} runs failed)",
            failed_runs, config.iters
        );
        std::process::exit(1);
    };

    println!("Kernel times: {:?}", kernel_times);
    println!("Runtime times: {:?}", total_times);
    print_pair("Mean", kernel.mean, total.mean);
    print_pair(
        "Harmonic mean",
        kernel.harmonic_mean.unwrap_or(f64::NAN),
        total.harmonic_mean.unwrap_or(f64::NAN),
    );
    print_pair("Median", kernel.median, total.median);
    print_pair("Min", kernel.min, total.min);
    print_pair("Max", kernel.max, total.max);
    print_pair("Variance", kernel.variance, total.variance);
    print_pair("Standard deviation", kernel.std_dev, total.std_dev);
    print_pair("Standard error", kernel.std_error, total.std_error);
    print_pair("Confidence interval", kernel.ci95, total.ci95);

    let mut recorder = ReportWriter::new("bfs-engine");
    let mut params = HashMap::new();
    params.insert("command".into(), serde_json::json!(config.program));
    params.insert("args".into(), serde_json::json!(config.args));
    params.insert("iterations".into(), serde_json::json!(config.iters));

    for (name, summary) in [("bfs/kernel", &kernel), ("bfs/total", &total)] {
        let mut metrics = BenchmarkMetrics::from(summary);
        metrics.failed_runs = Some(failed_runs);
        recorder.record(BenchmarkResult {
            benchmark: name.to_string(),
            category: "bfs-engine".to_string(),
            parameters: params.clone(),
            metrics,
        });
    }
    if let Err(e) = recorder.save() {
        eprintln!("Error saving report: {}", e);
        std::process::exit(1);
    }
}
