//! Labeled graph and query generator for pattern-matching benchmarks.
//!
//! Samples a labeled directed G(n, p) graph, then carves a small connected
//! induced subgraph out of it to serve as the query pattern. Two files are
//! written, `<out_prefix>.graph` and `<out_prefix>.query`, both in the
//! `n m L` / node-label / edge-list format.
//!
//! Usage: `query-gen <num_nodes> <edge_percent> <num_labels> <query_size> <out_prefix> [--seed <u64>]`

use bfs_benchmarks::gen;

use std::fs::File;
use std::io::{BufWriter, Write};

struct Config {
    num_nodes: usize,
    edge_percent: u32,
    num_labels: u32,
    query_size: usize,
    out_prefix: String,
    seed: Option<u64>,
}

fn parse_args() -> Result<Config, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut positional: Vec<&str> = Vec::new();
    let mut seed = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("--seed needs a value")?;
                seed = Some(value.parse().map_err(|e| format!("bad seed: {}", e))?);
            }
            arg => positional.push(arg),
        }
        i += 1;
    }

    let [num_nodes, edge_percent, num_labels, query_size, out_prefix] = positional[..] else {
        return Err(
            "expected <num_nodes> <edge_percent> <num_labels> <query_size> <out_prefix>".into(),
        );
    };
    let config = Config {
        num_nodes: num_nodes
            .parse()
            .map_err(|e| format!("bad node count: {}", e))?,
        edge_percent: edge_percent
            .parse()
            .map_err(|e| format!("bad edge percent: {}", e))?,
        num_labels: num_labels
            .parse()
            .map_err(|e| format!("bad label count: {}", e))?,
        query_size: query_size
            .parse()
            .map_err(|e| format!("bad query size: {}", e))?,
        out_prefix: out_prefix.to_string(),
        seed,
    };
    if config.num_labels == 0 {
        return Err("label count must be at least 1".into());
    }
    if config.query_size == 0 {
        return Err("query size must be at least 1".into());
    }
    Ok(config)
}

fn write_file(
    path: &str,
    graph: &petgraph::graph::DiGraph<u32, ()>,
    num_labels: u32,
) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    gen::write_labeled(&mut out, graph, num_labels)?;
    out.flush()
}

fn main() {
    let config = parse_args().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!(
            "Usage: query-gen <num_nodes> <edge_percent> <num_labels> <query_size> <out_prefix> [--seed <u64>]"
        );
        std::process::exit(1);
    });

    let mut rng = gen::rng_from_seed(config.seed);
    let p = f64::from(config.edge_percent) / 100.0;
    let graph = gen::labeled_gnp(&mut rng, config.num_nodes, p, config.num_labels);

    let query = gen::extract_query(&mut rng, &graph, config.query_size).unwrap_or_else(|| {
        eprintln!("Error: graph has no nodes, cannot extract a query");
        std::process::exit(1);
    });

    let graph_path = format!("{}.graph", config.out_prefix);
    let query_path = format!("{}.query", config.out_prefix);

    for (path, g) in [(&graph_path, &graph), (&query_path, &query)] {
        write_file(path, g, config.num_labels).unwrap_or_else(|e| {
            eprintln!("Error writing {}: {}", path, e);
            std::process::exit(1);
        });
    }

    eprintln!(
        "Wrote {} ({} nodes, {} edges) and {} ({} nodes, {} edges)",
        graph_path,
        graph.node_count(),
        graph.edge_count(),
        query_path,
        query.node_count(),
        query.edge_count(),
    );
}
