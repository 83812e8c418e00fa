//! Random undirected graph generator for BFS engine inputs.
//!
//! Samples G(n, p) with the edge probability given as an integer percentage,
//! drops isolated nodes from the count, and prints the edge list to stdout
//! in the engine's format (each edge in both directions).
//!
//! Usage: `graph-gen <num_nodes> <edge_percent> [--seed <u64>]`

use bfs_benchmarks::gen;

use std::io::Write;

struct Config {
    num_nodes: usize,
    edge_percent: u32,
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

    let [num_nodes, edge_percent] = positional[..] else {
        return Err("expected <num_nodes> and <edge_percent>".into());
    };
    Ok(Config {
        num_nodes: num_nodes
            .parse()
            .map_err(|e| format!("bad node count: {}", e))?,
        edge_percent: edge_percent
            .parse()
            .map_err(|e| format!("bad edge percent: {}", e))?,
        seed,
    })
}

fn main() {
    let config = parse_args().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Usage: graph-gen <num_nodes> <edge_percent> [--seed <u64>]");
        std::process::exit(1);
    });

    let mut rng = gen::rng_from_seed(config.seed);
    let p = f64::from(config.edge_percent) / 100.0;
    let graph = gen::gnp_undirected(&mut rng, config.num_nodes, p);

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    gen::write_edge_list(&mut out, &graph).unwrap_or_else(|e| {
        eprintln!("Error writing edge list: {}", e);
        std::process::exit(1);
    });
    out.flush().unwrap_or_else(|e| {
        eprintln!("Error writing edge list: {}", e);
        std::process::exit(1);
    });
}
