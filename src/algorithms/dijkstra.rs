//! Dijkstra's shortest-path generator

use super::PreconditionError;
use crate::graph::{Graph, NodeId};
use crate::trace::{Algorithm, Event, GraphEvent, Outcome, Step, Trace};
use rustc_hash::{FxHashMap, FxHashSet};

pub const DIJKSTRA_CODE: &[&str] = &[
    "let mut dist = vec![INFINITY; n];",
    "let mut visited = set! {};",
    "dist[start] = 0.0;",
    "while let Some(u) = nearest_unvisited(&dist, &visited) {",
    "    visited.insert(u);",
    "    for (v, w) in neighbors(u) {",
    "        if dist[u] + w < dist[v] {",
    "            dist[v] = dist[u] + w;",
    "        }",
    "    }",
    "}",
];

/// Single-source shortest paths from `start`. Refuses graphs with a
/// negative edge weight. Unweighted graphs are treated as all-ones.
pub fn dijkstra(graph: &Graph, start: NodeId) -> Result<Trace, PreconditionError> {
    for e in graph.edges() {
        if e.weight < 0.0 {
            return Err(PreconditionError::NegativeWeight {
                from: graph.name(e.from).to_string(),
                to: graph.name(e.to).to_string(),
                weight: e.weight,
            });
        }
    }

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut steps = Vec::new();

    steps.push(Step::new(
        "Setting all distances to infinity",
        Event::Graph(GraphEvent::InitDistances),
        Some(0),
    ));
    dist[start.0] = 0.0;
    steps.push(Step::new(
        format!("Distance to start {} is 0", graph.name(start)),
        Event::Graph(GraphEvent::SetSource { node: start }),
        Some(2),
    ));

    loop {
        // linear scan; fine at visualization scale
        let u = graph
            .nodes()
            .filter(|node| !visited.contains(node) && dist[node.0].is_finite())
            .min_by(|a, b| dist[a.0].total_cmp(&dist[b.0]));
        let u = match u {
            Some(u) => u,
            None => break,
        };
        visited.insert(u);
        steps.push(Step::new(
            format!("Selecting {} (distance {})", graph.name(u), dist[u.0]),
            Event::Graph(GraphEvent::Select { node: u, parent: parent.get(&u).copied() }),
            Some(3),
        ));
        // Settled neighbors still get a check step; the relaxation test
        // below fails for them, since their distance is already final.
        for (_, v, w) in graph.neighbors(u) {
            let weight = if graph.is_weighted() { w } else { 1.0 };
            steps.push(Step::new(
                format!("Checking {} via {}", graph.name(v), graph.name(u)),
                Event::Graph(GraphEvent::Check { from: u, to: v }),
                Some(6),
            ));
            let candidate = dist[u.0] + weight;
            if candidate < dist[v.0] {
                dist[v.0] = candidate;
                parent.insert(v, u);
                steps.push(Step::new(
                    format!("Updating distance to {}: {}", graph.name(v), candidate),
                    Event::Graph(GraphEvent::Relax { from: u, to: v, dist: candidate }),
                    Some(7),
                ));
            }
        }
    }

    steps.push(Step::new(
        "All reachable nodes settled",
        Event::Done(Outcome::Distances { dist: dist.clone() }),
        None,
    ));
    Ok(Trace { algorithm: Algorithm::Dijkstra, steps, code: DIJKSTRA_CODE })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{build_graph, parse_edges, parse_nodes};

    fn weighted(edges: &str) -> Graph {
        let names = parse_nodes("A,B,C,D").unwrap();
        let specs = parse_edges(edges).unwrap();
        build_graph(names, specs, false, true).unwrap()
    }

    #[test]
    fn rejects_negative_weights() {
        let g = weighted("(A,B,2) (B,C,-1) (C,D,1)");
        let err = dijkstra(&g, g.node("A").unwrap()).unwrap_err();
        assert!(matches!(err, PreconditionError::NegativeWeight { .. }));
    }

    #[test]
    fn finds_shortest_distances() {
        // A-B=4, A-C=1, C-B=2, B-D=1: best A->B is 3, A->D is 4
        let g = weighted("(A,B,4) (A,C,1) (C,B,2) (B,D,1)");
        let trace = dijkstra(&g, g.node("A").unwrap()).unwrap();
        match trace.outcome() {
            Some(Outcome::Distances { dist }) => {
                assert_eq!(dist, &vec![0.0, 3.0, 1.0, 4.0]);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn relaxations_only_improve() {
        let g = weighted("(A,B,4) (A,C,1) (C,B,2) (B,D,1)");
        let trace = dijkstra(&g, g.node("A").unwrap()).unwrap();
        let mut best: Vec<f64> = vec![f64::INFINITY; 4];
        best[0] = 0.0;
        for step in &trace.steps {
            if let Event::Graph(GraphEvent::Relax { to, dist, .. }) = &step.event {
                assert!(*dist < best[to.0]);
                best[to.0] = *dist;
            }
        }
    }

    #[test]
    fn every_neighbor_edge_is_checked() {
        // Triangle on A, B, C; D stays unreachable. Each selection scans
        // both neighbors, settled or not: 3 selections x 2 checks.
        let g = weighted("(A,B,1) (B,C,1) (A,C,1)");
        let trace = dijkstra(&g, g.node("A").unwrap()).unwrap();
        let mut settled: Vec<usize> = Vec::new();
        let mut checks = 0;
        let mut checks_into_settled = 0;
        for step in &trace.steps {
            match &step.event {
                Event::Graph(GraphEvent::Select { node, .. }) => settled.push(node.0),
                Event::Graph(GraphEvent::Check { to, .. }) => {
                    checks += 1;
                    if settled.contains(&to.0) {
                        checks_into_settled += 1;
                    }
                }
                _ => {}
            }
        }
        assert_eq!(checks, 6);
        assert!(checks_into_settled > 0);
    }

    #[test]
    fn selected_nodes_never_relax_again() {
        let g = weighted("(A,B,1) (B,C,1) (A,C,5) (C,D,1)");
        let trace = dijkstra(&g, g.node("A").unwrap()).unwrap();
        let mut settled: Vec<usize> = Vec::new();
        for step in &trace.steps {
            match &step.event {
                Event::Graph(GraphEvent::Select { node, .. }) => settled.push(node.0),
                Event::Graph(GraphEvent::Relax { to, .. }) => {
                    assert!(!settled.contains(&to.0));
                }
                _ => {}
            }
        }
    }
}
