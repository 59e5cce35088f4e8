//! Derived algorithm state
//!
//! A snapshot is the algorithmic state implied by a prefix of a trace:
//! the array after every swap so far, the agenda and visit order of a
//! traversal, the distance table of a shortest-path run, or the tree
//! after structural edits. Replaying the same prefix always yields the
//! same snapshot, so reset-and-replay is exact.

use super::{ArrayEvent, Event, GraphEvent, ListEvent, Outcome, Step, TreeEvent};
use crate::bst::Bst;
use crate::graph::{Graph, NodeId};
use crate::list::LinkedList;

#[derive(Debug, Clone, PartialEq)]
pub struct ArraySnapshot {
    pub values: Vec<i64>,
    /// Active binary-search window as `(low, high, mid)`.
    pub window: Option<(usize, usize, usize)>,
}

impl ArraySnapshot {
    pub fn new(values: Vec<i64>) -> Self {
        ArraySnapshot { values, window: None }
    }

    pub fn apply(&mut self, event: &ArrayEvent) {
        match event {
            ArrayEvent::Swap { i, j } => self.values.swap(*i, *j),
            ArrayEvent::Window { low, high, mid } => {
                self.window = Some((*low, *high, *mid));
            }
            ArrayEvent::MoveLow { to } => {
                if let Some((_, high, mid)) = self.window {
                    self.window = Some((*to, high, mid));
                }
            }
            ArrayEvent::MoveHigh { to } => {
                if let Some((low, _, mid)) = self.window {
                    self.window = Some((low, *to, mid));
                }
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphSnapshot {
    /// Queue or stack contents, as last reported by the trace.
    pub agenda: Vec<NodeId>,
    /// Visit order of traversals.
    pub visited: Vec<NodeId>,
    /// Distance table; `f64::INFINITY` means unreached.
    pub dist: Vec<f64>,
    /// Per-node indegree counts.
    pub indegree: Vec<usize>,
    /// Topological order built so far.
    pub result: Vec<NodeId>,
    /// Edge indices accepted into the spanning tree.
    pub mst: Vec<usize>,
    pub mst_weight: f64,
    /// Edge indices in ascending weight order.
    pub edge_order: Vec<usize>,
}

impl GraphSnapshot {
    pub fn new(graph: &Graph) -> Self {
        GraphSnapshot {
            agenda: Vec::new(),
            visited: Vec::new(),
            dist: vec![f64::INFINITY; graph.node_count()],
            indegree: vec![0; graph.node_count()],
            result: Vec::new(),
            mst: Vec::new(),
            mst_weight: 0.0,
            edge_order: Vec::new(),
        }
    }

    pub fn apply(&mut self, event: &GraphEvent, graph: &Graph) {
        match event {
            GraphEvent::InitAgenda { items } | GraphEvent::Agenda { items } => {
                self.agenda = items.clone();
            }
            GraphEvent::Schedule { agenda, .. } => self.agenda = agenda.clone(),
            GraphEvent::Mark { node, .. } => {
                if !self.visited.contains(node) {
                    self.visited.push(*node);
                }
            }
            // Visit takes the node off the agenda; only Mark commits it
            // to the visit order.
            GraphEvent::Visit { node, .. } => {
                if let Some(pos) = self.agenda.iter().position(|n| n == node) {
                    self.agenda.remove(pos);
                }
            }
            GraphEvent::InitDistances => {
                self.dist = vec![f64::INFINITY; graph.node_count()];
            }
            GraphEvent::SetSource { node } => self.dist[node.0] = 0.0,
            GraphEvent::Select { node, .. } => {
                if !self.visited.contains(node) {
                    self.visited.push(*node);
                }
            }
            GraphEvent::Relax { to, dist, .. } => self.dist[to.0] = *dist,
            GraphEvent::SortedEdges { order } => self.edge_order = order.clone(),
            GraphEvent::AddEdge { index, .. } => {
                self.mst.push(*index);
                self.mst_weight += graph.edges()[*index].weight;
            }
            GraphEvent::InitIndegree => {
                self.indegree = vec![0; graph.node_count()];
            }
            GraphEvent::IncIndegree { node, value }
            | GraphEvent::DecIndegree { node, value } => {
                self.indegree[node.0] = *value;
            }
            GraphEvent::Dequeue { node } => {
                if let Some(pos) = self.agenda.iter().position(|n| n == node) {
                    self.agenda.remove(pos);
                }
            }
            GraphEvent::Append { node } => self.result.push(*node),
            GraphEvent::InitSet { .. }
            | GraphEvent::Check { .. }
            | GraphEvent::CheckEdge { .. }
            | GraphEvent::SkipEdge { .. } => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeSnapshot {
    pub tree: Bst,
    /// Keys emitted by a traversal so far.
    pub output: Vec<i64>,
}

impl TreeSnapshot {
    pub fn new(tree: Bst) -> Self {
        TreeSnapshot { tree, output: Vec::new() }
    }

    pub fn apply(&mut self, event: &TreeEvent) {
        match event {
            TreeEvent::Output { key } => self.output.push(*key),
            TreeEvent::Insert { key } => {
                self.tree.insert(*key);
            }
            TreeEvent::Delete { key } => {
                self.tree.remove(*key);
            }
            TreeEvent::Found { key } => self.output.push(*key),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    pub list: LinkedList,
    /// Position of the traversal pointer, if a walk is in progress.
    pub cursor: Option<usize>,
}

impl ListSnapshot {
    pub fn new(list: LinkedList) -> Self {
        ListSnapshot { list, cursor: None }
    }

    pub fn apply(&mut self, event: &ListEvent) {
        match event {
            ListEvent::Traverse { index } => self.cursor = Some(*index),
            ListEvent::Append { value, .. } => self.list.push_back(*value),
            ListEvent::Insert { after, value } => {
                self.list.insert_after(*after, *value);
            }
            ListEvent::SwapValues { i, j } => {
                self.list.swap_values(*i, *j);
            }
            ListEvent::Compare { .. } | ListEvent::Sorted { .. } => {}
        }
    }
}

/// State derived from the steps applied so far, one variant per
/// structure family.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Array(ArraySnapshot),
    Graph(GraphSnapshot),
    Tree(TreeSnapshot),
    List(ListSnapshot),
}

impl Snapshot {
    /// Fold one step into the snapshot. Steps must be applied in trace
    /// order starting from the initial structure.
    pub fn apply(&mut self, step: &Step, graph: Option<&Graph>) {
        match (&mut *self, &step.event) {
            (Snapshot::Array(snap), Event::Array(event)) => snap.apply(event),
            (Snapshot::Graph(snap), Event::Graph(event)) => {
                if let Some(graph) = graph {
                    snap.apply(event, graph);
                }
            }
            (Snapshot::Tree(snap), Event::Tree(event)) => snap.apply(event),
            (Snapshot::List(snap), Event::List(event)) => snap.apply(event),
            (Snapshot::Graph(snap), Event::Done(Outcome::Distances { dist })) => {
                snap.dist = dist.clone();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::sorting::bubble_sort;

    #[test]
    fn replaying_a_sort_trace_sorts_the_array() {
        let values = vec![1, 5, 7, 2, 2, 3];
        let trace = bubble_sort(&values);
        let mut snap = ArraySnapshot::new(values);
        for step in &trace.steps {
            if let Event::Array(event) = &step.event {
                snap.apply(event);
            }
        }
        assert_eq!(snap.values, vec![1, 2, 2, 3, 5, 7]);
    }

    #[test]
    fn replay_is_deterministic() {
        let values = vec![4, 2, 9, 1];
        let trace = bubble_sort(&values);
        let run = |prefix: usize| {
            let mut snap = Snapshot::Array(ArraySnapshot::new(values.clone()));
            for step in &trace.steps[..prefix] {
                snap.apply(step, None);
            }
            snap
        };
        assert_eq!(run(trace.len()), run(trace.len()));
        assert_eq!(run(3), run(3));
    }
}
