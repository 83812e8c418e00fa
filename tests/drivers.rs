//! Driver binaries: run-bench scraping and reports, collect-metrics
//! grouping, bench-compare deltas.

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Stand-in for the engine: a script printing fixed timing lines.
fn fake_engine(dir: &Path, kernel_us: u64, total_us: u64) -> PathBuf {
    let path = dir.join("engine.sh");
    let mut file = std::fs::File::create(&path).expect("failed to create engine script");
    writeln!(file, "#!/bin/sh").unwrap();
    writeln!(file, "echo '[*] Kernels duration: {} us'", kernel_us).unwrap();
    writeln!(file, "echo '[*] Total duration: {} us'", total_us).unwrap();
    drop(file);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("failed to chmod engine script");
    path
}

fn run_bench(dir: &Path, engine: &Path, iters: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_run-bench"))
        .args([iters, "--", engine.to_str().unwrap()])
        .current_dir(dir)
        .output()
        .expect("failed to run run-bench")
}

fn saved_report(dir: &Path) -> PathBuf {
    let results = dir.join("results");
    let mut entries: Vec<PathBuf> = std::fs::read_dir(&results)
        .expect("results dir missing")
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected exactly one report");
    entries.pop().unwrap()
}

#[test]
fn run_bench_scrapes_and_summarizes() {
    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(dir.path(), 120, 150);

    let output = run_bench(dir.path(), &engine, "4");
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Kernel times: [120.0, 120.0, 120.0, 120.0]"));
    assert!(stdout.contains("- Mean kernel time: 120"));
    assert!(stdout.contains("- Mean runtime time: 150"));
    assert!(stdout.contains("- Variance kernel time: 0"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(saved_report(dir.path())).unwrap()).unwrap();
    assert_eq!(report["schema_version"], 1);
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["benchmark"], "bfs/kernel");
    assert_eq!(results[0]["metrics"]["mean_us"], 120.0);
    assert_eq!(results[0]["metrics"]["samples"], 4);
    assert_eq!(results[1]["metrics"]["max_us"], 150.0);
}

#[test]
fn run_bench_fails_without_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.sh");
    std::fs::write(&path, "#!/bin/sh\nexit 3\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    let output = run_bench(dir.path(), &path, "2");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no timing samples"));
}

#[test]
fn run_bench_fails_when_report_cannot_be_saved() {
    let dir = tempfile::tempdir().unwrap();
    let engine = fake_engine(dir.path(), 100, 120);
    // a plain file where the results directory should go
    std::fs::write(dir.path().join("results"), "").unwrap();

    let output = run_bench(dir.path(), &engine, "2");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error saving report"));
}

#[test]
fn run_bench_rejects_bad_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_run-bench"))
        .arg("5")
        .output()
        .expect("failed to run run-bench");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}

#[test]
fn collect_metrics_groups_by_subgroup_size() {
    let log = "\
SubGroup size  8:
- Kernel time: 100 us
- Total time: 200 us
SubGroup size 16:
- Kernel time: 50 us
- Total time: 80 us
SubGroup size  8:
- Kernel time: 300 us
- Total time: 400 us
";
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.log");
    std::fs::write(&path, log).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_collect-metrics"))
        .arg(&path)
        .output()
        .expect("failed to run collect-metrics");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[Average]"));
    assert!(stdout.contains("SubGroup size  8: kernel: 200 total: 300"));
    assert!(stdout.contains("SubGroup size 16: kernel: 50 total: 80"));
    // no size-32 sections in the log, so no size-32 lines
    assert!(!stdout.contains("SubGroup size 32"));
}

#[test]
fn collect_metrics_fails_on_truncated_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.log");
    std::fs::write(&path, "SubGroup size  8:\n- Kernel time: 100 us\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_collect-metrics"))
        .arg(&path)
        .output()
        .expect("failed to run collect-metrics");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn bench_compare_reports_deltas() {
    let dir = tempfile::tempdir().unwrap();

    let base_dir = dir.path().join("base");
    let cand_dir = dir.path().join("cand");
    std::fs::create_dir_all(&base_dir).unwrap();
    std::fs::create_dir_all(&cand_dir).unwrap();

    let base_engine = fake_engine(&base_dir, 200, 300);
    let cand_engine = fake_engine(&cand_dir, 100, 300);
    assert!(run_bench(&base_dir, &base_engine, "3").status.success());
    assert!(run_bench(&cand_dir, &cand_engine, "3").status.success());

    let output = Command::new(env!("CARGO_BIN_EXE_bench-compare"))
        .args([saved_report(&base_dir), saved_report(&cand_dir)])
        .output()
        .expect("failed to run bench-compare");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bfs/kernel"), "{}", stdout);
    assert!(stdout.contains("-50.0% (faster)"), "{}", stdout);
    assert!(stdout.contains("~same"), "{}", stdout);
    assert!(stdout.contains("Compared: 2 | Baseline only: 0 | Candidate only: 0"));
}
