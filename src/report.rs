//! Writing benchmark reports to JSON files.
//!
//! Reports land in `results/` as `<category>-<timestamp>-<commit>.json`,
//! with run metadata (git state, hardware, timestamp) captured when the
//! writer is created.

use crate::schema::{BenchmarkReport, BenchmarkResult, HardwareInfo, RunMetadata};

use std::io;
use std::path::PathBuf;
use std::process::Command;
use std::time::SystemTime;

/// Accumulates benchmark results and writes them to a JSON file.
pub struct ReportWriter {
    category: String,
    metadata: RunMetadata,
    results: Vec<BenchmarkResult>,
}

impl ReportWriter {
    /// Create a new writer for the given category.
    ///
    /// Metadata (hardware, git, timestamp) is captured here, not at save
    /// time, so it reflects when the run started.
    pub fn new(category: &str) -> Self {
        let git = GitInfo::probe();
        ReportWriter {
            category: category.to_string(),
            metadata: RunMetadata {
                timestamp: iso8601_now(),
                git_commit: git.commit,
                git_branch: git.branch,
                git_dirty: git.dirty,
                driver: "rust".to_string(),
                driver_version: env!("CARGO_PKG_VERSION").to_string(),
                hardware: capture_hardware(),
            },
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }

    /// Write all accumulated results to a JSON file in `results/`.
    pub fn save(self) -> io::Result<PathBuf> {
        let commit = self.metadata.git_commit.as_deref().unwrap_or("unknown");
        // Colons are not filename-safe everywhere
        let ts = self.metadata.timestamp.replace(':', "-");
        let filename = format!("{}-{}-{}.json", self.category, ts, commit);

        let report = BenchmarkReport {
            schema_version: 1,
            metadata: self.metadata,
            results: self.results,
        };

        let results_dir = PathBuf::from("results");
        std::fs::create_dir_all(&results_dir)?;
        let path = results_dir.join(filename);

        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        std::fs::write(&path, json)?;

        eprintln!("Results saved to {}", path.display());
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Git state
// ---------------------------------------------------------------------------

struct GitInfo {
    commit: Option<String>,
    branch: Option<String>,
    dirty: Option<bool>,
}

impl GitInfo {
    fn probe() -> Self {
        GitInfo {
            commit: git_stdout(&["rev-parse", "--short", "HEAD"]),
            branch: git_stdout(&["rev-parse", "--abbrev-ref", "HEAD"]),
            dirty: git_stdout(&["status", "--porcelain"]).map(|s| !s.is_empty()),
        }
    }
}

fn git_stdout(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

// ---------------------------------------------------------------------------
// Hardware
// ---------------------------------------------------------------------------

fn capture_hardware() -> HardwareInfo {
    HardwareInfo {
        cpu: read_cpu_model(),
        cores: std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(0),
        ram_gb: read_total_ram_gb(),
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    }
}

/// CPU model from /proc/cpuinfo; "unknown" on non-Linux hosts.
fn read_cpu_model() -> String {
    std::fs::read_to_string("/proc/cpuinfo")
        .ok()
        .and_then(|s| {
            s.lines()
                .find(|l| l.starts_with("model name"))
                .and_then(|l| l.split_once(':').map(|(_, v)| v.trim().to_string()))
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Total RAM in GB from /proc/meminfo; 0 when unavailable.
fn read_total_ram_gb() -> u64 {
    std::fs::read_to_string("/proc/meminfo")
        .ok()
        .and_then(|s| {
            s.lines().find(|l| l.starts_with("MemTotal:")).and_then(|l| {
                l.split_whitespace()
                    .nth(1)
                    .and_then(|kb| kb.parse::<u64>().ok())
            })
        })
        .map(|kb| kb / (1024 * 1024))
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

fn iso8601_now() -> String {
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let (year, month, day) = days_to_ymd(secs / 86400);
    let time_of_day = secs % 86400;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60,
    )
}

// Civil-from-days conversion (Howard Hinnant's algorithm); avoids pulling in
// a date crate for one timestamp.
fn days_to_ymd(mut days: u64) -> (u64, u64, u64) {
    days += 719468;
    let era = days / 146097;
    let doe = days - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let mut y = yoe + era * 400;
    if m <= 2 {
        y += 1;
    }
    (y, m, d)
}

// ---------------------------------------------------------------------------
// Display helpers shared by run-bench and bench-compare
// ---------------------------------------------------------------------------

/// Render a microsecond quantity with a readable unit.
pub fn fmt_us(us: f64) -> String {
    if us < 1_000.0 {
        format!("{:.1} us", us)
    } else if us < 1_000_000.0 {
        format!("{:.2} ms", us / 1_000.0)
    } else {
        format!("{:.2} s", us / 1_000_000.0)
    }
}

/// Thousands-separated integer rendering.
pub fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.chars().rev().collect()
}
