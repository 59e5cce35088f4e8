//! Arena graph model
//!
//! Nodes are addressed by [`NodeId`] (an index into a name table) and edges
//! are stored once as `(from, to, weight)` records. Directedness and
//! weightedness are properties of the whole graph; neighbor iteration and
//! edge lookup honor both directions when the graph is undirected.

use rustc_hash::FxHashMap;

/// Index of a node in the graph's name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A single edge record. For undirected graphs the record is stored once
/// and traversed in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct Graph {
    names: Vec<String>,
    index: FxHashMap<String, NodeId>,
    edges: Vec<Edge>,
    directed: bool,
    weighted: bool,
}

impl Graph {
    /// Create a graph from a list of unique node names. Uniqueness is
    /// validated by the input layer before construction.
    pub fn new(names: Vec<String>, directed: bool, weighted: bool) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), NodeId(i)))
            .collect();
        Graph {
            names,
            index,
            edges: Vec::new(),
            directed,
            weighted,
        }
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) {
        self.edges.push(Edge { from, to, weight });
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Name of a node, for narration and rendering.
    pub fn name(&self, node: NodeId) -> &str {
        &self.names[node.0]
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.names.len()).map(NodeId)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbors of `node` as `(edge index, other endpoint, weight)`.
    /// Undirected edges are traversable from either endpoint.
    pub fn neighbors(&self, node: NodeId) -> Vec<(usize, NodeId, f64)> {
        let mut out = Vec::new();
        for (i, e) in self.edges.iter().enumerate() {
            if e.from == node {
                out.push((i, e.to, e.weight));
            } else if !self.directed && e.to == node {
                out.push((i, e.from, e.weight));
            }
        }
        out
    }

    /// Index of the edge connecting `from` to `to`, matching either
    /// direction when the graph is undirected.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<usize> {
        self.edges.iter().position(|e| {
            (e.from == from && e.to == to)
                || (!self.directed && e.from == to && e.to == from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc(directed: bool) -> Graph {
        let mut g = Graph::new(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            directed,
            false,
        );
        let (a, b, c) = (NodeId(0), NodeId(1), NodeId(2));
        g.add_edge(a, b, 1.0);
        g.add_edge(b, c, 1.0);
        g
    }

    #[test]
    fn undirected_neighbors_go_both_ways() {
        let g = abc(false);
        let b = g.node("B").unwrap();
        let nbrs: Vec<_> = g.neighbors(b).iter().map(|&(_, n, _)| n).collect();
        assert_eq!(nbrs, vec![NodeId(0), NodeId(2)]);
    }

    #[test]
    fn directed_neighbors_follow_edge_direction() {
        let g = abc(true);
        let b = g.node("B").unwrap();
        let nbrs: Vec<_> = g.neighbors(b).iter().map(|&(_, n, _)| n).collect();
        assert_eq!(nbrs, vec![NodeId(2)]);
    }

    #[test]
    fn find_edge_matches_reverse_direction_when_undirected() {
        let g = abc(false);
        assert_eq!(g.find_edge(NodeId(1), NodeId(0)), Some(0));
        let g = abc(true);
        assert_eq!(g.find_edge(NodeId(1), NodeId(0)), None);
    }
}
