//! Kahn's topological-sort generator
//!
//! A cycle is a normal outcome here, not an error: the trace runs until
//! the queue empties and reports `CycleDetected` when some nodes never
//! reached indegree zero.

use super::PreconditionError;
use crate::graph::{Graph, NodeId};
use crate::trace::{Algorithm, Event, GraphEvent, Outcome, Step, Trace};
use std::collections::VecDeque;

pub const TOPO_CODE: &[&str] = &[
    "let mut indegree = vec![0; n];",
    "for e in edges { indegree[e.to] += 1; }",
    "let mut queue = nodes with indegree 0;",
    "let mut order = vec![];",
    "while let Some(u) = queue.pop_front() {",
    "    order.push(u);",
    "    for v in successors(u) {",
    "        indegree[v] -= 1;",
    "        if indegree[v] == 0 { queue.push_back(v); }",
    "    }",
    "}",
    "// order.len() < n means a cycle",
];

/// Kahn's algorithm. Requires a directed graph.
pub fn topo_sort(graph: &Graph) -> Result<Trace, PreconditionError> {
    if !graph.is_directed() {
        return Err(PreconditionError::RequiresDirected);
    }

    let n = graph.node_count();
    let mut indegree = vec![0usize; n];
    let mut steps = Vec::new();

    steps.push(Step::new(
        "Setting all indegrees to 0",
        Event::Graph(GraphEvent::InitIndegree),
        Some(0),
    ));
    for e in graph.edges() {
        indegree[e.to.0] += 1;
        steps.push(Step::new(
            format!("Indegree of {} is now {}", graph.name(e.to), indegree[e.to.0]),
            Event::Graph(GraphEvent::IncIndegree { node: e.to, value: indegree[e.to.0] }),
            Some(1),
        ));
    }

    let mut queue: VecDeque<NodeId> =
        graph.nodes().filter(|node| indegree[node.0] == 0).collect();
    steps.push(Step::new(
        "Queueing all nodes with indegree 0",
        Event::Graph(GraphEvent::InitAgenda { items: queue.iter().copied().collect() }),
        Some(2),
    ));

    let mut order: Vec<NodeId> = Vec::new();
    while let Some(u) = queue.pop_front() {
        steps.push(Step::new(
            format!("Dequeued {}", graph.name(u)),
            Event::Graph(GraphEvent::Dequeue { node: u }),
            Some(4),
        ));
        order.push(u);
        steps.push(Step::new(
            format!("Appending {} to the order", graph.name(u)),
            Event::Graph(GraphEvent::Append { node: u }),
            Some(5),
        ));
        for (_, v, _) in graph.neighbors(u) {
            indegree[v.0] -= 1;
            steps.push(Step::new(
                format!("Indegree of {} is now {}", graph.name(v), indegree[v.0]),
                Event::Graph(GraphEvent::DecIndegree { node: v, value: indegree[v.0] }),
                Some(7),
            ));
            if indegree[v.0] == 0 {
                queue.push_back(v);
                steps.push(Step::new(
                    format!("Enqueueing {}", graph.name(v)),
                    Event::Graph(GraphEvent::Schedule {
                        node: v,
                        from: u,
                        agenda: queue.iter().copied().collect(),
                    }),
                    Some(8),
                ));
            }
        }
    }

    if order.len() < n {
        steps.push(Step::new(
            "Cycle detected: no valid topological order",
            Event::Done(Outcome::CycleDetected),
            Some(11),
        ));
    } else {
        let names: Vec<&str> = order.iter().map(|&u| graph.name(u)).collect();
        steps.push(Step::new(
            format!("Topological order: {}", names.join(" -> ")),
            Event::Done(Outcome::TopoOrder { order: order.clone() }),
            None,
        ));
    }
    Ok(Trace { algorithm: Algorithm::TopoSort, steps, code: TOPO_CODE })
}
