//! Random graph inputs for the BFS engine and the pattern-matching bench.
//!
//! Both samplers draw from G(n, p) with the geometric skipping method:
//! instead of a coin flip per candidate pair, the gap to the next edge is
//! drawn from the geometric distribution, so sparse graphs cost O(n + m)
//! rather than O(n²). Self-loops are never produced.

use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use std::collections::HashMap;
use std::io::{self, Write};

/// Seeded generator for reproducible inputs; entropy-seeded otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Sample an undirected G(n, p) graph.
pub fn gnp_undirected<R: Rng>(rng: &mut R, n: usize, p: f64) -> UnGraph<(), ()> {
    let mut graph = UnGraph::with_capacity(n, 0);
    for _ in 0..n {
        graph.add_node(());
    }
    if n == 0 || p <= 0.0 {
        return graph;
    }
    if p >= 1.0 {
        for v in 1..n {
            for w in 0..v {
                graph.add_edge(NodeIndex::new(w), NodeIndex::new(v), ());
            }
        }
        return graph;
    }

    // Walk the strict lower triangle of the adjacency matrix in row order,
    // jumping geometric gaps between kept entries.
    let lp = (1.0 - p).ln();
    let mut v: usize = 1;
    let mut w: i64 = -1;
    while v < n {
        let lr = (1.0 - rng.gen::<f64>()).ln();
        w += 1 + (lr / lp) as i64;
        while w >= v as i64 && v < n {
            w -= v as i64;
            v += 1;
        }
        if v < n {
            graph.add_edge(NodeIndex::new(w as usize), NodeIndex::new(v), ());
        }
    }
    graph
}

/// Sample a directed G(n, p) graph. The diagonal is skipped, so no
/// self-loops.
pub fn gnp_directed<R: Rng>(rng: &mut R, n: usize, p: f64) -> DiGraph<(), ()> {
    let mut graph = DiGraph::with_capacity(n, 0);
    for _ in 0..n {
        graph.add_node(());
    }
    if n == 0 || p <= 0.0 {
        return graph;
    }
    if p >= 1.0 {
        for v in 0..n {
            for w in 0..n {
                if v != w {
                    graph.add_edge(NodeIndex::new(v), NodeIndex::new(w), ());
                }
            }
        }
        return graph;
    }

    let lp = (1.0 - p).ln();
    let n_i = n as i64;
    let mut v: i64 = 0;
    let mut w: i64 = -1;
    while v < n_i {
        let lr = (1.0 - rng.gen::<f64>()).ln();
        w += 1 + (lr / lp) as i64;
        if v == w {
            w += 1;
        }
        while v < n_i && n_i <= w {
            w -= n_i;
            v += 1;
            if v == w {
                w += 1;
            }
        }
        if v < n_i {
            graph.add_edge(NodeIndex::new(v as usize), NodeIndex::new(w as usize), ());
        }
    }
    graph
}

/// Sample a directed G(n, p) graph with uniform node labels in
/// `0..num_labels`.
pub fn labeled_gnp<R: Rng>(rng: &mut R, n: usize, p: f64, num_labels: u32) -> DiGraph<u32, ()> {
    let labels: Vec<u32> = (0..n).map(|_| rng.gen_range(0..num_labels.max(1))).collect();
    gnp_directed(rng, n, p).map(|idx, _| labels[idx.index()], |_, _| ())
}

/// Extract a small connected induced subgraph to serve as a query pattern.
///
/// Starts at a random node and grows breadth-first over the underlying
/// undirected structure until `size` nodes were collected (fewer when the
/// start's component is smaller). Node labels carry over; ids are renumbered
/// densely in visit order. `None` when the graph has no nodes or `size` is 0.
pub fn extract_query<R: Rng>(
    rng: &mut R,
    graph: &DiGraph<u32, ()>,
    size: usize,
) -> Option<DiGraph<u32, ()>> {
    if graph.node_count() == 0 || size == 0 {
        return None;
    }
    let start = NodeIndex::new(rng.gen_range(0..graph.node_count()));

    let mut picked: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = std::collections::VecDeque::from([start]);
    let mut query = DiGraph::new();

    while let Some(node) = queue.pop_front() {
        if picked.contains_key(&node) {
            continue;
        }
        picked.insert(node, query.add_node(graph[node]));
        if picked.len() == size {
            break;
        }
        for next in graph.neighbors_undirected(node) {
            if !picked.contains_key(&next) {
                queue.push_back(next);
            }
        }
    }

    for edge in graph.edge_references() {
        if let (Some(&src), Some(&dst)) = (picked.get(&edge.source()), picked.get(&edge.target()))
        {
            query.add_edge(src, dst, ());
        }
    }
    Some(query)
}

/// Write a plain undirected graph in the engine's input format: the count of
/// non-isolated nodes, then every edge in both directions as `u v` lines.
///
/// Isolated nodes leave the count but node ids stay stable.
pub fn write_edge_list<W: Write>(out: &mut W, graph: &UnGraph<(), ()>) -> io::Result<()> {
    let connected = graph
        .node_indices()
        .filter(|&n| graph.neighbors_undirected(n).next().is_some())
        .count();
    writeln!(out, "{}", connected)?;
    for edge in graph.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        writeln!(out, "{} {}", a, b)?;
        writeln!(out, "{} {}", b, a)?;
    }
    Ok(())
}

/// Write a labeled directed graph: `n m L` header, then `n` lines of
/// `node label`, then `m` lines of `src dst`.
pub fn write_labeled<W: Write>(
    out: &mut W,
    graph: &DiGraph<u32, ()>,
    num_labels: u32,
) -> io::Result<()> {
    writeln!(
        out,
        "{} {} {}",
        graph.node_count(),
        graph.edge_count(),
        num_labels
    )?;
    for node in graph.node_indices() {
        writeln!(out, "{} {}", node.index(), graph[node])?;
    }
    for edge in graph.edge_references() {
        writeln!(out, "{} {}", edge.source().index(), edge.target().index())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gnp_extremes() {
        let mut rng = rng_from_seed(Some(7));
        let empty = gnp_undirected(&mut rng, 20, 0.0);
        assert_eq!(empty.edge_count(), 0);
        let complete = gnp_undirected(&mut rng, 20, 1.0);
        assert_eq!(complete.edge_count(), 20 * 19 / 2);
        let full = gnp_directed(&mut rng, 10, 1.0);
        assert_eq!(full.edge_count(), 10 * 9);
    }

    #[test]
    fn gnp_has_no_self_loops() {
        let mut rng = rng_from_seed(Some(3));
        let graph = gnp_directed(&mut rng, 200, 0.05);
        for edge in graph.edge_references() {
            assert_ne!(edge.source(), edge.target());
        }
    }

    #[test]
    fn same_seed_same_graph() {
        let a = gnp_undirected(&mut rng_from_seed(Some(11)), 100, 0.1);
        let b = gnp_undirected(&mut rng_from_seed(Some(11)), 100, 0.1);
        let edges = |g: &UnGraph<(), ()>| {
            g.edge_references()
                .map(|e| (e.source().index(), e.target().index()))
                .collect::<Vec<_>>()
        };
        assert_eq!(edges(&a), edges(&b));
    }

    #[test]
    fn density_is_roughly_p() {
        let mut rng = rng_from_seed(Some(42));
        let n = 400;
        let graph = gnp_undirected(&mut rng, n, 0.25);
        let possible = (n * (n - 1) / 2) as f64;
        let density = graph.edge_count() as f64 / possible;
        assert!((density - 0.25).abs() < 0.02, "density {}", density);
    }

    #[test]
    fn labels_stay_in_range() {
        let mut rng = rng_from_seed(Some(5));
        let graph = labeled_gnp(&mut rng, 50, 0.1, 4);
        for node in graph.node_indices() {
            assert!(graph[node] < 4);
        }
    }

    #[test]
    fn query_is_bounded_and_connected() {
        let mut rng = rng_from_seed(Some(9));
        let graph = labeled_gnp(&mut rng, 60, 0.2, 3);
        let query = extract_query(&mut rng, &graph, 5).unwrap();
        assert!(query.node_count() <= 5);
        assert!(query.node_count() >= 1);
        assert_eq!(petgraph::algo::connected_components(&query), 1);
    }

    #[test]
    fn query_of_empty_graph_is_none() {
        let mut rng = rng_from_seed(Some(1));
        let graph = DiGraph::new();
        assert!(extract_query(&mut rng, &graph, 4).is_none());
    }

    #[test]
    fn edge_list_counts_connected_nodes_only() {
        let mut graph = UnGraph::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_node(()); // isolate
        graph.add_edge(a, b, ());

        let mut out = Vec::new();
        write_edge_list(&mut out, &graph).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["2", "0 1", "1 0"]);
    }

    #[test]
    fn labeled_format_round_reads() {
        let mut rng = rng_from_seed(Some(2));
        let graph = labeled_gnp(&mut rng, 8, 0.3, 2);
        let mut out = Vec::new();
        write_labeled(&mut out, &graph, 2).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        let header: Vec<usize> = lines
            .next()
            .unwrap()
            .split_whitespace()
            .map(|t| t.parse().unwrap())
            .collect();
        assert_eq!(header, vec![graph.node_count(), graph.edge_count(), 2]);
        assert_eq!(lines.count(), graph.node_count() + graph.edge_count());
    }
}
