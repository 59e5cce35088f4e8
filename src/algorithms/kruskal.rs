//! Kruskal's minimum-spanning-tree generator

use super::PreconditionError;
use crate::graph::Graph;
use crate::trace::{Algorithm, Event, GraphEvent, Outcome, Step, Trace};

pub const KRUSKAL_CODE: &[&str] = &[
    "let mut sets = UnionFind::new(n);",
    "let mut mst = vec![];",
    "let order = edges sorted by weight;",
    "for e in order {",
    "    if sets.find(e.from) != sets.find(e.to) {",
    "        sets.union(e.from, e.to);",
    "        mst.push(e);",
    "    }",
    "}",
];

/// Disjoint sets with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        UnionFind { parent: (0..n).collect(), rank: vec![0; n] }
    }

    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.find(self.parent[x]);
            self.parent[x] = root;
        }
        self.parent[x]
    }

    /// Merge the sets containing `a` and `b`. Returns false if they were
    /// already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        if self.rank[ra] < self.rank[rb] {
            self.parent[ra] = rb;
        } else if self.rank[ra] > self.rank[rb] {
            self.parent[rb] = ra;
        } else {
            self.parent[rb] = ra;
            self.rank[ra] += 1;
        }
        true
    }
}

/// Kruskal's algorithm. Requires an undirected, weighted graph; ties in
/// weight are broken by input order.
pub fn kruskal(graph: &Graph) -> Result<Trace, PreconditionError> {
    if graph.is_directed() {
        return Err(PreconditionError::RequiresUndirected);
    }
    if !graph.is_weighted() {
        return Err(PreconditionError::RequiresWeighted);
    }

    let n = graph.node_count();
    let mut sets = UnionFind::new(n);
    let mut steps = Vec::new();

    for node in graph.nodes() {
        steps.push(Step::new(
            format!("Making a set for {}", graph.name(node)),
            Event::Graph(GraphEvent::InitSet { node }),
            Some(0),
        ));
    }

    let mut order: Vec<usize> = (0..graph.edge_count()).collect();
    order.sort_by(|&a, &b| graph.edges()[a].weight.total_cmp(&graph.edges()[b].weight));
    steps.push(Step::new(
        "Sorting edges by weight",
        Event::Graph(GraphEvent::SortedEdges { order: order.clone() }),
        Some(2),
    ));

    let mut mst = Vec::new();
    let mut total_weight = 0.0;
    for index in order {
        let e = &graph.edges()[index];
        steps.push(Step::new(
            format!(
                "Checking edge ({}, {}) with weight {}",
                graph.name(e.from),
                graph.name(e.to),
                e.weight
            ),
            Event::Graph(GraphEvent::CheckEdge { index, from: e.from, to: e.to }),
            Some(4),
        ));
        if sets.union(e.from.0, e.to.0) {
            mst.push(index);
            total_weight += e.weight;
            steps.push(Step::new(
                format!(
                    "Adding ({}, {}) to the spanning tree",
                    graph.name(e.from),
                    graph.name(e.to)
                ),
                Event::Graph(GraphEvent::AddEdge { index, from: e.from, to: e.to }),
                Some(6),
            ));
        } else {
            steps.push(Step::new(
                format!(
                    "Skipping ({}, {}): would close a cycle",
                    graph.name(e.from),
                    graph.name(e.to)
                ),
                Event::Graph(GraphEvent::SkipEdge { index, from: e.from, to: e.to }),
                Some(4),
            ));
        }
    }

    steps.push(Step::new(
        format!("Spanning tree complete, total weight {}", total_weight),
        Event::Done(Outcome::MstComplete { edges: mst, total_weight }),
        None,
    ));
    Ok(Trace { algorithm: Algorithm::Kruskal, steps, code: KRUSKAL_CODE })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{build_graph, parse_edges, parse_nodes};

    fn ring() -> Graph {
        let names = parse_nodes("A,B,C,D,E").unwrap();
        let edges = parse_edges("(A,B,5) (B,C,2) (C,D,4) (D,E,3) (E,A,1)").unwrap();
        build_graph(names, edges, false, true).unwrap()
    }

    #[test]
    fn union_find_merges_and_detects() {
        let mut uf = UnionFind::new(4);
        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(uf.union(1, 2));
        assert!(!uf.union(0, 3));
        assert_eq!(uf.find(0), uf.find(3));
    }

    #[test]
    fn requires_undirected_weighted() {
        let names = parse_nodes("A,B").unwrap();
        let edges = parse_edges("(A,B,1)").unwrap();
        let g = build_graph(names.clone(), edges.clone(), true, true).unwrap();
        assert_eq!(kruskal(&g).unwrap_err(), PreconditionError::RequiresUndirected);
        let g = build_graph(names, edges, false, false).unwrap();
        assert_eq!(kruskal(&g).unwrap_err(), PreconditionError::RequiresWeighted);
    }

    #[test]
    fn drops_the_heaviest_cycle_edge() {
        let g = ring();
        let trace = kruskal(&g).unwrap();
        match trace.outcome() {
            Some(Outcome::MstComplete { edges, total_weight }) => {
                assert_eq!(edges.len(), 4);
                // edge 0 is (A,B,5), the one edge the cycle can spare
                assert!(!edges.contains(&0));
                assert_eq!(*total_weight, 10.0);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn accepted_edges_never_close_a_cycle() {
        let g = ring();
        let trace = kruskal(&g).unwrap();
        let mut uf = UnionFind::new(g.node_count());
        for step in &trace.steps {
            if let Event::Graph(GraphEvent::AddEdge { from, to, .. }) = &step.event {
                assert!(uf.union(from.0, to.0));
            }
        }
    }
}
