//! Grouped statistics over an accumulated engine log.
//!
//! The multi-subgroup engine build prints, per run and per sub-group size:
//!
//! ```text
//! SubGroup size  8:
//! - Kernel time: <n> us
//! - Total time: <n> us
//! ```
//!
//! This tool scans a log of many such runs and prints average, min, max,
//! standard deviation and harmonic mean per sub-group size.
//!
//! Usage: `collect-metrics <log_file>`

use bfs_benchmarks::stats;

const SUBGROUP_SIZES: [(&str, &str); 3] = [
    ("SubGroup size  8", " 8"),
    ("SubGroup size 16", "16"),
    ("SubGroup size 32", "32"),
];

#[derive(Default)]
struct Group {
    kernel: Vec<f64>,
    total: Vec<f64>,
}

/// Fourth whitespace token of a `- Kernel time: <n> us` line.
fn time_token(line: &str, lineno: usize) -> Result<f64, String> {
    line.split_whitespace()
        .nth(3)
        .ok_or_else(|| format!("line {}: expected a timing line, got '{}'", lineno + 1, line))?
        .parse::<f64>()
        .map_err(|e| format!("line {}: bad timing value: {}", lineno + 1, e))
}

fn collect(log: &str) -> Result<Vec<Group>, String> {
    let lines: Vec<&str> = log.lines().collect();
    let mut groups: Vec<Group> = SUBGROUP_SIZES.iter().map(|_| Group::default()).collect();

    for (i, line) in lines.iter().enumerate() {
        for (slot, (marker, _)) in SUBGROUP_SIZES.iter().enumerate() {
            if !line.contains(marker) {
                continue;
            }
            if i + 2 >= lines.len() {
                return Err(format!("line {}: truncated sub-group section", i + 1));
            }
            groups[slot].kernel.push(time_token(lines[i + 1], i + 1)?);
            groups[slot].total.push(time_token(lines[i + 2], i + 2)?);
        }
    }
    Ok(groups)
}

fn print_section(title: &str, groups: &[Group], stat: impl Fn(&[f64]) -> f64) {
    println!("[{}]", title);
    for (group, (_, size)) in groups.iter().zip(SUBGROUP_SIZES) {
        if group.kernel.is_empty() {
            continue;
        }
        println!(
            "SubGroup size {}: kernel: {} total: {}",
            size,
            stat(&group.kernel),
            stat(&group.total)
        );
    }
    println!();
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <log_file>", args[0]);
        std::process::exit(1);
    }

    let log = std::fs::read_to_string(&args[1]).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", args[1], e);
        std::process::exit(1);
    });
    let groups = collect(&log).unwrap_or_else(|e| {
        eprintln!("Error parsing {}: {}", args[1], e);
        std::process::exit(1);
    });

    if groups.iter().all(|g| g.kernel.is_empty()) {
        eprintln!("No sub-group sections found in {}", args[1]);
        std::process::exit(1);
    }

    print_section("Average", &groups, stats::mean);
    print_section("Min", &groups, stats::min);
    print_section("Max", &groups, stats::max);
    print_section("Standard deviation", &groups, |s| {
        stats::population_variance(s, stats::mean(s)).sqrt()
    });
    print_section("Harmonic mean", &groups, |s| {
        stats::harmonic_mean(s).unwrap_or(f64::NAN)
    });
}
