//! Spanning-tree validity check over BFS engine output.
//!
//! Reads the engine's graph-output file, rebuilds the spanning tree of every
//! `[!!!]`-marked block and reports, per graph, whether all nodes were
//! visited and whether the parent pointers loop.
//!
//! Usage: `check-bfs <graph_output_file>`
//!
//! Exit code is 1 on usage error, on a malformed record, or as soon as one
//! graph contains a loop. Coverage failures are reported but do not fail the
//! run; later graphs are still checked.

use bfs_benchmarks::tree;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <graph_output_file>", args[0]);
        std::process::exit(1);
    }

    let contents = std::fs::read_to_string(&args[1]).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", args[1], e);
        std::process::exit(1);
    });

    let trees = tree::parse_blocks(&contents).unwrap_or_else(|e| {
        eprintln!("Error parsing {}: {}", args[1], e);
        std::process::exit(1);
    });

    for (i, tree) in trees.iter().enumerate() {
        let verdict = tree.verdict();
        if verdict.covered {
            println!("All the nodes in graph {} have been visited :)", i);
            if verdict.loops.is_empty() {
                println!("No loop detected in graph {} :)", i);
            } else {
                let mut nodes: Vec<i64> = verdict.loops.into_iter().collect();
                nodes.sort_unstable();
                println!("[!] Loop detected in graph {}: {:?}", i, nodes);
                std::process::exit(1);
            }
        } else {
            println!("[!] Not all the nodes in graph {} have been visited :(", i);
        }
        println!();
    }
}
