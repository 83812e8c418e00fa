//! BFS output parser and spanning-tree checks.
//!
//! For every graph it ran, the engine prints a block opened by a marker line
//! containing `[!!!]`, followed by one record per node:
//!
//! ```text
//! node:<id>|parent:<id>|dist:<depth>
//! ```
//!
//! Each block is rebuilt into a [`Tree`] (parent-keyed adjacency) and checked
//! for two things: every node was reached (no `parent:-1` sentinel), and the
//! parent pointers form no cycle reachable from the root.

use std::collections::{HashMap, HashSet};

/// Parent sentinel the engine writes for a node BFS never reached.
pub const UNREACHED: i64 = -1;

/// Marker substring that opens a new per-graph block.
pub const BLOCK_MARKER: &str = "[!!!]";

/// One parsed output line: node, its BFS parent, its BFS depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub node: i64,
    pub parent: i64,
    pub dist: i64,
}

/// Parse one record line. The line must already be stripped of blanks.
///
/// Three pipe-separated `key:<int>` fields; a wrong field count, a field
/// without `:`, or a non-integer value is an error.
pub fn parse_record(line: &str) -> Result<Record, String> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() != 3 {
        return Err(format!("expected 3 fields, got {}: '{}'", fields.len(), line));
    }

    let int_field = |field: &str| -> Result<i64, String> {
        let (_, value) = field
            .split_once(':')
            .ok_or_else(|| format!("field '{}' has no ':' separator", field))?;
        value
            .parse::<i64>()
            .map_err(|e| format!("bad integer '{}': {}", value, e))
    };

    Ok(Record {
        node: int_field(fields[0])?,
        parent: int_field(fields[1])?,
        dist: int_field(fields[2])?,
    })
}

/// The forest implied by one block of records.
///
/// Built in a single pass and never mutated afterwards; one instance per
/// graph block, queried once and discarded.
#[derive(Debug)]
pub struct Tree {
    /// The self-parented node, if one was seen. A later self-parented record
    /// overwrites an earlier one; zero or multiple roots is upstream
    /// breakage and the loop check is not meaningful for such blocks.
    pub root: Option<i64>,
    /// Every node id observed (children, parents, and the root).
    pub nodes: HashSet<i64>,
    /// False as soon as any record carries the `parent:-1` sentinel.
    pub valid: bool,
    children: HashMap<i64, Vec<i64>>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            root: None,
            nodes: HashSet::new(),
            valid: true,
            children: HashMap::new(),
        }
    }

    /// Fold one record into the tree.
    pub fn insert(&mut self, rec: &Record) {
        if rec.node == rec.parent {
            self.root = Some(rec.node);
            self.nodes.insert(rec.node);
        } else if rec.parent == UNREACHED {
            // The node was never visited upstream. It is not attached as a
            // child of anything; it may still enter `nodes` via other records.
            self.valid = false;
        } else {
            self.children.entry(rec.parent).or_default().push(rec.node);
            self.nodes.insert(rec.node);
            self.nodes.insert(rec.parent);
        }
    }

    /// Children recorded for `node`, in insertion order.
    ///
    /// Absent keys yield an empty slice without growing the adjacency map.
    pub fn children(&self, node: i64) -> &[i64] {
        self.children.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Detect nodes reachable from the root more than once.
    ///
    /// Iterative depth-first walk with an explicit stack (no recursion, so
    /// deep trees cannot blow the call stack). A node popped twice proves a
    /// cycle; it lands in the returned set. This is a diagnostic, not an
    /// exact cycle enumerator: with a cycle present, a node is pushed once
    /// per incoming traversal edge before being caught, so the walk can do
    /// more than O(nodes + edges) work. On a valid tree it is one visit per
    /// reachable node.
    ///
    /// A block with no root record yields the empty set.
    pub fn check_loop(&self) -> HashSet<i64> {
        let mut looped = HashSet::new();
        let mut visited = HashSet::new();
        let mut stack = Vec::new();

        if let Some(root) = self.root {
            stack.push(root);
        }
        while let Some(node) = stack.pop() {
            if visited.contains(&node) {
                looped.insert(node);
            } else {
                visited.insert(node);
                stack.extend_from_slice(self.children(node));
            }
        }
        looped
    }

    /// Run both checks and summarize.
    pub fn verdict(&self) -> Verdict {
        if self.valid {
            Verdict {
                covered: true,
                loops: self.check_loop(),
            }
        } else {
            // Downstream of a coverage failure the loop check is skipped:
            // the tree is already known not to span the graph.
            Verdict {
                covered: false,
                loops: HashSet::new(),
            }
        }
    }
}

/// Outcome of validating one block.
#[derive(Debug)]
pub struct Verdict {
    /// True when no record carried the unreached sentinel.
    pub covered: bool,
    /// Nodes the loop check saw twice; empty when `covered` is false
    /// (the check is skipped) or when the tree is loop-free.
    pub loops: HashSet<i64>,
}

impl Verdict {
    pub fn is_clean(&self) -> bool {
        self.covered && self.loops.is_empty()
    }
}

/// Split a whole output file into per-block trees.
///
/// Lines before the first marker are engine preamble and are discarded.
/// Each marker opens a new block running to the next marker or to the end of
/// the file. Spaces and tabs are stripped from every line before parsing;
/// lines that are empty after stripping are skipped. Any malformed record
/// aborts the whole parse.
pub fn parse_blocks(input: &str) -> Result<Vec<Tree>, String> {
    let mut trees: Vec<Tree> = Vec::new();

    for (lineno, raw) in input.lines().enumerate() {
        if raw.contains(BLOCK_MARKER) {
            trees.push(Tree::new());
            continue;
        }
        let Some(tree) = trees.last_mut() else {
            continue; // preamble
        };
        let line: String = raw.chars().filter(|c| *c != ' ' && *c != '\t').collect();
        if line.is_empty() {
            continue;
        }
        let rec = parse_record(&line).map_err(|e| format!("line {}: {}", lineno + 1, e))?;
        tree.insert(&rec);
    }

    Ok(trees)
}
