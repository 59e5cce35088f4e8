//! Breadth-first and depth-first traversal generators
//!
//! Both traversals share one discipline: a discovered set guards
//! scheduling, so a node enters the agenda at most once, and a visited
//! set records processing order. Undirected edges are traversable from
//! either endpoint.

use crate::graph::{Graph, NodeId};
use crate::trace::{Algorithm, Event, GraphEvent, Outcome, Step, Trace};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

pub const BFS_CODE: &[&str] = &[
    "let mut queue = VecDeque::from([start]);",
    "let mut discovered = set! { start };",
    "let mut visited = set! {};",
    "while let Some(node) = queue.pop_front() {",
    "    visited.insert(node);",
    "    for next in neighbors(node) {",
    "        if !visited.contains(&next) && !discovered.contains(&next) {",
    "            discovered.insert(next);",
    "            queue.push_back(next);",
    "        }",
    "    }",
    "}",
];

pub const DFS_CODE: &[&str] = &[
    "let mut stack = vec![start];",
    "let mut discovered = set! { start };",
    "let mut visited = set! {};",
    "while let Some(node) = stack.pop() {",
    "    visited.insert(node);",
    "    for next in neighbors(node) {",
    "        if !visited.contains(&next) && !discovered.contains(&next) {",
    "            discovered.insert(next);",
    "            stack.push(next);",
    "        }",
    "    }",
    "}",
];

/// Breadth-first search from `start`.
pub fn bfs(graph: &Graph, start: NodeId) -> Trace {
    let mut steps = Vec::new();
    let mut queue: VecDeque<NodeId> = VecDeque::from([start]);
    let mut discovered: FxHashSet<NodeId> = FxHashSet::from_iter([start]);
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();

    steps.push(Step::new(
        format!("Starting BFS from {}", graph.name(start)),
        Event::Graph(GraphEvent::InitAgenda { items: vec![start] }),
        Some(0),
    ));
    while let Some(node) = queue.pop_front() {
        let from = parent.get(&node).copied();
        steps.push(Step::new(
            format!("Dequeued {}", graph.name(node)),
            Event::Graph(GraphEvent::Visit { node, parent: from }),
            Some(3),
        ));
        visited.insert(node);
        steps.push(Step::new(
            format!("Visiting {}", graph.name(node)),
            Event::Graph(GraphEvent::Mark { node, parent: from }),
            Some(4),
        ));
        for (_, next, _) in graph.neighbors(node) {
            steps.push(Step::new(
                format!("Checking edge {} -> {}", graph.name(node), graph.name(next)),
                Event::Graph(GraphEvent::Check { from: node, to: next }),
                Some(6),
            ));
            if !visited.contains(&next) && !discovered.contains(&next) {
                discovered.insert(next);
                parent.insert(next, node);
                queue.push_back(next);
                steps.push(Step::new(
                    format!("Enqueueing {}", graph.name(next)),
                    Event::Graph(GraphEvent::Schedule {
                        node: next,
                        from: node,
                        agenda: queue.iter().copied().collect(),
                    }),
                    Some(8),
                ));
            }
        }
        let items: Vec<NodeId> = queue.iter().copied().collect();
        let names: Vec<&str> = items.iter().map(|&n| graph.name(n)).collect();
        steps.push(Step::new(
            format!("Queue: [{}]", names.join(", ")),
            Event::Graph(GraphEvent::Agenda { items }),
            Some(10),
        ));
    }
    steps.push(Step::new(
        "BFS completed!",
        Event::Done(Outcome::Finished),
        None,
    ));
    Trace { algorithm: Algorithm::Bfs, steps, code: BFS_CODE }
}

/// Depth-first search from `start`, using an explicit stack.
pub fn dfs(graph: &Graph, start: NodeId) -> Trace {
    let mut steps = Vec::new();
    let mut stack: Vec<NodeId> = vec![start];
    let mut discovered: FxHashSet<NodeId> = FxHashSet::from_iter([start]);
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();

    steps.push(Step::new(
        format!("Starting DFS from {}", graph.name(start)),
        Event::Graph(GraphEvent::InitAgenda { items: vec![start] }),
        Some(0),
    ));
    while let Some(node) = stack.pop() {
        let from = parent.get(&node).copied();
        steps.push(Step::new(
            format!("Popped {}", graph.name(node)),
            Event::Graph(GraphEvent::Visit { node, parent: from }),
            Some(3),
        ));
        visited.insert(node);
        steps.push(Step::new(
            format!("Visiting {}", graph.name(node)),
            Event::Graph(GraphEvent::Mark { node, parent: from }),
            Some(4),
        ));
        for (_, next, _) in graph.neighbors(node) {
            steps.push(Step::new(
                format!("Checking edge {} -> {}", graph.name(node), graph.name(next)),
                Event::Graph(GraphEvent::Check { from: node, to: next }),
                Some(6),
            ));
            if !visited.contains(&next) && !discovered.contains(&next) {
                discovered.insert(next);
                parent.insert(next, node);
                stack.push(next);
                steps.push(Step::new(
                    format!("Pushing {}", graph.name(next)),
                    Event::Graph(GraphEvent::Schedule {
                        node: next,
                        from: node,
                        agenda: stack.clone(),
                    }),
                    Some(8),
                ));
            }
        }
        let items = stack.clone();
        let names: Vec<&str> = items.iter().map(|&n| graph.name(n)).collect();
        steps.push(Step::new(
            format!("Stack: [{}]", names.join(", ")),
            Event::Graph(GraphEvent::Agenda { items }),
            Some(10),
        ));
    }
    steps.push(Step::new(
        "DFS completed!",
        Event::Done(Outcome::Finished),
        None,
    ));
    Trace { algorithm: Algorithm::Dfs, steps, code: DFS_CODE }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{build_graph, parse_edges, parse_nodes};

    fn diamond(directed: bool) -> Graph {
        let names = parse_nodes("A,B,C,D").unwrap();
        let edges = parse_edges("(A,B) (A,C) (B,D) (C,D)").unwrap();
        build_graph(names, edges, directed, false).unwrap()
    }

    fn marks(trace: &Trace) -> Vec<NodeId> {
        trace
            .steps
            .iter()
            .filter_map(|s| match s.event {
                Event::Graph(GraphEvent::Mark { node, .. }) => Some(node),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bfs_marks_every_node_exactly_once() {
        let g = diamond(false);
        let trace = bfs(&g, g.node("A").unwrap());
        let mut order = marks(&trace);
        assert_eq!(order.len(), 4);
        order.sort();
        order.dedup();
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn bfs_visits_in_level_order() {
        let g = diamond(true);
        let trace = bfs(&g, g.node("A").unwrap());
        let order = marks(&trace);
        assert_eq!(order[0], g.node("A").unwrap());
        // B and C come before D in some order
        assert_eq!(order[3], g.node("D").unwrap());
    }

    #[test]
    fn dfs_never_schedules_a_node_twice() {
        let g = diamond(false);
        let trace = dfs(&g, g.node("A").unwrap());
        let mut scheduled: Vec<NodeId> = trace
            .steps
            .iter()
            .filter_map(|s| match s.event {
                Event::Graph(GraphEvent::Schedule { node, .. }) => Some(node),
                _ => None,
            })
            .collect();
        let before = scheduled.len();
        scheduled.sort();
        scheduled.dedup();
        assert_eq!(before, scheduled.len());
    }

    #[test]
    fn agenda_snapshot_after_each_neighbor_scan() {
        let g = diamond(false);
        let count = |trace: &Trace, event: fn(&GraphEvent) -> bool| {
            trace
                .steps
                .iter()
                .filter(|s| matches!(&s.event, Event::Graph(e) if event(e)))
                .count()
        };
        for trace in [bfs(&g, g.node("A").unwrap()), dfs(&g, g.node("A").unwrap())] {
            let visited = count(&trace, |e| matches!(e, GraphEvent::Mark { .. }));
            let snapshots = count(&trace, |e| matches!(e, GraphEvent::Agenda { .. }));
            assert_eq!(visited, 4);
            assert_eq!(snapshots, visited);
        }
    }

    #[test]
    fn unreachable_nodes_stay_unvisited() {
        let names = parse_nodes("A,B,C").unwrap();
        let edges = parse_edges("(B,C)").unwrap();
        let g = build_graph(names, edges, true, false).unwrap();
        let trace = bfs(&g, g.node("A").unwrap());
        assert_eq!(marks(&trace), vec![g.node("A").unwrap()]);
    }
}
