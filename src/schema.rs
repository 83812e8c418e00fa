//! Shared benchmark result types.
//!
//! `run-bench` writes JSON files matching these types and `bench-compare`
//! reads them back, so runs on different machines or engine builds can be
//! compared from their saved reports.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level benchmark report written to a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Schema version for forward compatibility.
    pub schema_version: u32,
    /// Metadata about this run (hardware, git, timestamp).
    pub metadata: RunMetadata,
    /// Individual benchmark results.
    pub results: Vec<BenchmarkResult>,
}

/// Metadata captured at the start of a benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// ISO 8601 timestamp of the run start.
    pub timestamp: String,
    /// Short git commit hash (absent outside a git repo).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
    /// Git branch name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    /// Whether the working tree had uncommitted changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_dirty: Option<bool>,
    /// Driver identifier (always "rust" for this crate).
    pub driver: String,
    /// Driver crate version.
    pub driver_version: String,
    /// Hardware information.
    pub hardware: HardwareInfo,
}

/// Hardware information for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareInfo {
    /// CPU model string.
    pub cpu: String,
    /// Number of logical cores.
    pub cores: usize,
    /// Total RAM in GB.
    pub ram_gb: u64,
    /// Operating system.
    pub os: String,
    /// CPU architecture.
    pub arch: String,
}

/// A single benchmark measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Benchmark name (e.g. "bfs/kernel" or "bfs/total").
    pub benchmark: String,
    /// Category (e.g. "bfs-engine").
    pub category: String,
    /// Benchmark-specific parameters (command line, iteration count, ...).
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
    /// Measured metrics.
    pub metrics: BenchmarkMetrics,
}

/// Metrics collected from a benchmark measurement, in microseconds (the unit
/// the engine reports).
///
/// All fields are optional so partial measurements still serialize; fields
/// that don't apply are omitted from the JSON output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_us: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harmonic_mean_us: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_us: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_us: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_us: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance_us2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev_us: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_error_us: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_runs: Option<u64>,
}

impl From<&crate::stats::Summary> for BenchmarkMetrics {
    fn from(s: &crate::stats::Summary) -> Self {
        BenchmarkMetrics {
            mean_us: Some(s.mean),
            harmonic_mean_us: s.harmonic_mean,
            median_us: Some(s.median),
            min_us: Some(s.min),
            max_us: Some(s.max),
            variance_us2: Some(s.variance),
            std_dev_us: Some(s.std_dev),
            std_error_us: Some(s.std_error),
            samples: Some(s.samples as u64),
            failed_runs: None,
        }
    }
}
