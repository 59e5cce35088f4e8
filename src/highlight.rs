//! Step-to-visual bridge
//!
//! Each step maps to one [`Effect`]: a transient flash shown while the
//! step is current, and an optional persistent mark that stays for the
//! rest of the run. The mapping is total over the step vocabulary, so a
//! new event variant fails to compile until it is given a visual.

use crate::graph::{Graph, NodeId};
use crate::trace::{ArrayEvent, Event, GraphEvent, ListEvent, Outcome, Step, TreeEvent};
use rustc_hash::FxHashSet;

/// Transient emphasis for the current step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flash {
    None,
    Index(usize),
    Pair(usize, usize),
    Node(NodeId),
    Edge(usize),
    NodeAndEdge(NodeId, usize),
    Key(i64),
}

/// Emphasis that survives until reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Persist {
    None,
    Index(usize),
    AllIndices,
    Node(NodeId),
    Edge(usize),
    NodeAndEdge(NodeId, usize),
    Key(i64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub flash: Flash,
    pub persist: Persist,
}

impl Effect {
    const NONE: Effect = Effect { flash: Flash::None, persist: Persist::None };

    fn flash(flash: Flash) -> Effect {
        Effect { flash, persist: Persist::None }
    }
}

/// The visual effect of one step. `graph` is needed to resolve parent
/// edges for traversal marks; array and tree steps ignore it.
pub fn effect_of(step: &Step, graph: Option<&Graph>) -> Effect {
    match &step.event {
        Event::Array(event) => array_effect(event),
        Event::Graph(event) => graph_effect(event, graph),
        Event::Tree(event) => tree_effect(event),
        Event::List(event) => list_effect(event),
        Event::Done(outcome) => done_effect(outcome),
    }
}

fn array_effect(event: &ArrayEvent) -> Effect {
    match *event {
        ArrayEvent::Compare { i, j } | ArrayEvent::Swap { i, j } => {
            Effect::flash(Flash::Pair(i, j))
        }
        ArrayEvent::Sorted { index } | ArrayEvent::PivotPlaced { index } => {
            Effect { flash: Flash::Index(index), persist: Persist::Index(index) }
        }
        ArrayEvent::Pivot { index } | ArrayEvent::Probe { index } => {
            Effect::flash(Flash::Index(index))
        }
        ArrayEvent::Heapify { root } => Effect::flash(Flash::Index(root)),
        ArrayEvent::Window { mid, .. } => Effect::flash(Flash::Index(mid)),
        ArrayEvent::Partition { .. }
        | ArrayEvent::MoveLow { .. }
        | ArrayEvent::MoveHigh { .. } => Effect::NONE,
    }
}

fn parent_edge(graph: Option<&Graph>, node: NodeId, parent: Option<NodeId>) -> Option<usize> {
    let graph = graph?;
    graph.find_edge(parent?, node)
}

fn graph_effect(event: &GraphEvent, graph: Option<&Graph>) -> Effect {
    match *event {
        GraphEvent::Visit { node, .. } | GraphEvent::Dequeue { node } => {
            Effect::flash(Flash::Node(node))
        }
        GraphEvent::Mark { node, parent } => match parent_edge(graph, node, parent) {
            Some(edge) => Effect {
                flash: Flash::NodeAndEdge(node, edge),
                persist: Persist::NodeAndEdge(node, edge),
            },
            None => Effect { flash: Flash::Node(node), persist: Persist::Node(node) },
        },
        GraphEvent::Check { to, .. } => Effect::flash(Flash::Node(to)),
        GraphEvent::Schedule { node, .. } => Effect::flash(Flash::Node(node)),
        GraphEvent::SetSource { node } | GraphEvent::InitSet { node } => {
            Effect::flash(Flash::Node(node))
        }
        GraphEvent::Select { node, parent } => match parent_edge(graph, node, parent) {
            Some(edge) => Effect {
                flash: Flash::NodeAndEdge(node, edge),
                persist: Persist::NodeAndEdge(node, edge),
            },
            None => Effect { flash: Flash::Node(node), persist: Persist::Node(node) },
        },
        GraphEvent::Relax { from, to, .. } => {
            match graph.and_then(|g| g.find_edge(from, to)) {
                Some(edge) => Effect {
                    flash: Flash::NodeAndEdge(to, edge),
                    persist: Persist::Edge(edge),
                },
                None => Effect::flash(Flash::Node(to)),
            }
        }
        GraphEvent::CheckEdge { index, .. } | GraphEvent::SkipEdge { index, .. } => {
            Effect::flash(Flash::Edge(index))
        }
        GraphEvent::AddEdge { index, .. } => {
            Effect { flash: Flash::Edge(index), persist: Persist::Edge(index) }
        }
        GraphEvent::IncIndegree { node, .. } | GraphEvent::DecIndegree { node, .. } => {
            Effect::flash(Flash::Node(node))
        }
        GraphEvent::Append { node } => {
            Effect { flash: Flash::Node(node), persist: Persist::Node(node) }
        }
        GraphEvent::InitAgenda { .. }
        | GraphEvent::Agenda { .. }
        | GraphEvent::InitDistances
        | GraphEvent::SortedEdges { .. }
        | GraphEvent::InitIndegree => Effect::NONE,
    }
}

fn tree_effect(event: &TreeEvent) -> Effect {
    match *event {
        TreeEvent::Start { key } | TreeEvent::Backtrack { key, .. } => {
            Effect::flash(Flash::Key(key))
        }
        TreeEvent::Descend { to, .. } => Effect::flash(Flash::Key(to)),
        TreeEvent::Output { key }
        | TreeEvent::Insert { key }
        | TreeEvent::Found { key } => {
            Effect { flash: Flash::Key(key), persist: Persist::Key(key) }
        }
        TreeEvent::Delete { key } | TreeEvent::Promote { key } => {
            Effect::flash(Flash::Key(key))
        }
    }
}

fn list_effect(event: &ListEvent) -> Effect {
    match *event {
        ListEvent::Traverse { index } => Effect::flash(Flash::Index(index)),
        ListEvent::Append { index, .. } | ListEvent::Sorted { index } => {
            Effect { flash: Flash::Index(index), persist: Persist::Index(index) }
        }
        ListEvent::Insert { after, .. } => {
            let index = after + 1;
            Effect { flash: Flash::Index(index), persist: Persist::Index(index) }
        }
        ListEvent::Compare { i, j } | ListEvent::SwapValues { i, j } => {
            Effect::flash(Flash::Pair(i, j))
        }
    }
}

fn done_effect(outcome: &Outcome) -> Effect {
    match outcome {
        Outcome::Finished => Effect { flash: Flash::None, persist: Persist::AllIndices },
        Outcome::FoundAt { index } => {
            Effect { flash: Flash::Index(*index), persist: Persist::Index(*index) }
        }
        _ => Effect::NONE,
    }
}

/// Accumulated visual state: the current flash plus every persistent
/// mark applied so far. Cleared on reset.
#[derive(Debug, Clone, Default)]
pub struct HighlightState {
    pub flash: Option<Flash>,
    pub nodes: FxHashSet<NodeId>,
    pub edges: FxHashSet<usize>,
    pub indices: FxHashSet<usize>,
    pub keys: FxHashSet<i64>,
    pub all_indices: bool,
}

impl HighlightState {
    pub fn apply(&mut self, effect: &Effect) {
        self.flash = match effect.flash {
            Flash::None => None,
            other => Some(other),
        };
        match effect.persist {
            Persist::None => {}
            Persist::Index(i) => {
                self.indices.insert(i);
            }
            Persist::AllIndices => self.all_indices = true,
            Persist::Node(n) => {
                self.nodes.insert(n);
            }
            Persist::Edge(e) => {
                self.edges.insert(e);
            }
            Persist::NodeAndEdge(n, e) => {
                self.nodes.insert(n);
                self.edges.insert(e);
            }
            Persist::Key(k) => {
                self.keys.insert(k);
            }
        }
    }

    pub fn clear(&mut self) {
        *self = HighlightState::default();
    }

    pub fn index_marked(&self, index: usize) -> bool {
        self.all_indices || self.indices.contains(&index)
    }

    pub fn index_flashed(&self, index: usize) -> bool {
        matches!(self.flash, Some(Flash::Index(i)) if i == index)
            || matches!(self.flash, Some(Flash::Pair(i, j)) if i == index || j == index)
    }

    pub fn node_flashed(&self, node: NodeId) -> bool {
        matches!(self.flash, Some(Flash::Node(n)) if n == node)
            || matches!(self.flash, Some(Flash::NodeAndEdge(n, _)) if n == node)
    }

    pub fn edge_flashed(&self, edge: usize) -> bool {
        matches!(self.flash, Some(Flash::Edge(e)) if e == edge)
            || matches!(self.flash, Some(Flash::NodeAndEdge(_, e)) if e == edge)
    }

    pub fn key_flashed(&self, key: i64) -> bool {
        matches!(self.flash, Some(Flash::Key(k)) if k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Step;

    #[test]
    fn compare_flashes_without_persisting() {
        let step = Step::new("", Event::Array(ArrayEvent::Compare { i: 0, j: 1 }), None);
        let effect = effect_of(&step, None);
        assert_eq!(effect.flash, Flash::Pair(0, 1));
        assert_eq!(effect.persist, Persist::None);
    }

    #[test]
    fn sorted_mark_outlives_the_flash() {
        let mut state = HighlightState::default();
        state.apply(&effect_of(
            &Step::new("", Event::Array(ArrayEvent::Sorted { index: 3 }), None),
            None,
        ));
        state.apply(&effect_of(
            &Step::new("", Event::Array(ArrayEvent::Compare { i: 0, j: 1 }), None),
            None,
        ));
        assert!(state.index_marked(3));
        assert!(!state.index_flashed(3));
        assert!(state.index_flashed(0));
    }

    #[test]
    fn mark_persists_node_and_parent_edge() {
        let mut g = Graph::new(vec!["A".into(), "B".into()], false, false);
        g.add_edge(NodeId(0), NodeId(1), 1.0);
        let step = Step::new(
            "",
            Event::Graph(GraphEvent::Mark { node: NodeId(1), parent: Some(NodeId(0)) }),
            None,
        );
        let mut state = HighlightState::default();
        state.apply(&effect_of(&step, Some(&g)));
        assert!(state.nodes.contains(&NodeId(1)));
        assert!(state.edges.contains(&0));
    }

    #[test]
    fn clear_wipes_everything() {
        let mut state = HighlightState::default();
        state.apply(&effect_of(
            &Step::new("", Event::Done(Outcome::Finished), None),
            None,
        ));
        assert!(state.all_indices);
        state.clear();
        assert!(!state.all_indices);
        assert!(state.flash.is_none());
    }
}
