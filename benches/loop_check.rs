//! Loop-check throughput on synthetic spanning trees.
//!
//! Run: `cargo bench --bench loop_check`

use bfs_benchmarks::tree::{Record, Tree};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn record(node: i64, parent: i64, dist: i64) -> Record {
    Record { node, parent, dist }
}

/// Root 0 with `n` direct children.
fn wide_tree(n: i64) -> Tree {
    let mut tree = Tree::new();
    tree.insert(&record(0, 0, 0));
    for node in 1..=n {
        tree.insert(&record(node, 0, 1));
    }
    tree
}

/// Single chain of depth `n`; the worst case for a recursive walk, which is
/// why the checker uses an explicit stack.
fn deep_chain(n: i64) -> Tree {
    let mut tree = Tree::new();
    tree.insert(&record(0, 0, 0));
    for node in 1..=n {
        tree.insert(&record(node, node - 1, node));
    }
    tree
}

/// Chain of depth `n` whose tail points back at the root.
fn cyclic_chain(n: i64) -> Tree {
    let mut tree = deep_chain(n);
    tree.insert(&record(0, n, n + 1));
    tree
}

fn loop_check_benchmark(c: &mut Criterion) {
    let wide = wide_tree(100_000);
    c.bench_function("check_loop/wide_100k", |b| {
        b.iter(|| black_box(wide.check_loop()))
    });

    let deep = deep_chain(100_000);
    c.bench_function("check_loop/deep_100k", |b| {
        b.iter(|| black_box(deep.check_loop()))
    });

    let cyclic = cyclic_chain(10_000);
    c.bench_function("check_loop/cyclic_10k", |b| {
        b.iter(|| black_box(cyclic.check_loop()))
    });
}

criterion_group!(benches, loop_check_benchmark);
criterion_main!(benches);
