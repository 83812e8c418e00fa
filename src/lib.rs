//! Support tooling for benchmarking a SYCL BFS engine.
//!
//! The engine itself is an external executable; this crate provides the
//! pieces around it:
//!
//! - [`tree`] — parse the engine's per-node `node:|parent:|dist:` output and
//!   check that each BFS produced a loop-free spanning tree covering every
//!   node (binary: `check-bfs`).
//! - [`stats`] — summary statistics over timing samples (binaries:
//!   `run-bench`, `collect-metrics`).
//! - [`gen`] — random graph inputs, plain and labeled-with-query (binaries:
//!   `graph-gen`, `query-gen`).
//! - [`schema`] / [`report`] — the JSON result-file format shared by
//!   `run-bench` and `bench-compare`.

pub mod gen;
pub mod report;
pub mod schema;
pub mod stats;
pub mod tree;
