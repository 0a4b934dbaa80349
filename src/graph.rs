use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::warn;

/// A dual-cost edge: `(c1, c2)`.
pub type EdgeCost = (f64, f64);

/// Directed multigraph keyed by `u32` vertex ids, with each `(u, v)` pair carrying a list of
/// parallel costs. Matches the teacher's `BTreeMap<u32, BTreeMap<u32, f64>>` adjacency shape,
/// widened to `Vec<EdgeCost>` buckets to admit parallel edges and the second objective.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    adjacency: BTreeMap<u32, BTreeMap<u32, Vec<EdgeCost>>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `(c1, c2)` to the bucket for `(u, v)`. Preserves existing parallel edges.
    pub fn add_edge(&mut self, u: u32, v: u32, c1: f64, c2: f64) {
        self.adjacency
            .entry(u)
            .or_default()
            .entry(v)
            .or_default()
            .push((c1, c2));
    }

    /// Neighbors of `u` with their parallel costs. Empty when `u` has no outgoing edges.
    pub fn get_neighbors(&self, u: u32) -> Vec<(u32, &[EdgeCost])> {
        match self.adjacency.get(&u) {
            Some(neighbors) => neighbors
                .iter()
                .map(|(v, costs)| (*v, costs.as_slice()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// All vertices that appear as an edge source. Isolated destinations are only discovered
    /// through edges, so a vertex with in-edges but no out-edges is absent here.
    pub fn vertices(&self) -> impl Iterator<Item = u32> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn reset(&mut self) {
        self.adjacency.clear();
    }

    /// Builds the reverse graph: every `(u, v, c1, c2)` becomes `(v, u, c1, c2)`. When
    /// `costs_matter` is false every reversed edge is given unit cost, for reachability-only
    /// use (Stage 2, §4.6).
    pub fn reversed(&self, costs_matter: bool) -> Graph {
        let mut out = Graph::new();
        for (u, neighbors) in &self.adjacency {
            for (v, costs) in neighbors {
                if costs_matter {
                    for (c1, c2) in costs {
                        out.add_edge(*v, *u, *c1, *c2);
                    }
                } else {
                    out.add_edge(*v, *u, 1.0, 1.0);
                }
            }
        }
        out
    }

    /// Loads a graph from a whitespace-separated edge-list file: `<u> <v> <c1> <c2>` per line.
    /// Lines that do not split into exactly four tokens, or whose tokens fail to parse, are
    /// skipped with a `tracing::warn!`. A missing file logs a warning and returns an empty graph
    /// (§6/§7: file-not-found is "logged and swallowed", never propagated).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Graph {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "graph file not found or unreadable");
                return Graph::new();
            }
        };

        let mut graph = Graph::new();
        for (idx, line) in contents.lines().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != 4 {
                if !tokens.is_empty() {
                    warn!(line = idx + 1, content = line, "skipping malformed edge line");
                }
                continue;
            }
            let parsed = (
                tokens[0].parse::<u32>(),
                tokens[1].parse::<u32>(),
                tokens[2].parse::<f64>(),
                tokens[3].parse::<f64>(),
            );
            match parsed {
                (Ok(u), Ok(v), Ok(c1), Ok(c2)) => graph.add_edge(u, v, c1, c2),
                _ => warn!(line = idx + 1, content = line, "skipping unparseable edge line"),
            }
        }
        graph
    }
}
