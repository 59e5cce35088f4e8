//! Step traces
//!
//! A trace is the full, ordered history of one algorithm run: every
//! comparison, swap, relaxation, or tree move, produced up front by the
//! generators in [`crate::algorithms`] and then replayed by the
//! [`playback`] engine. Steps are immutable once generated; the visual
//! layers derive everything they show from them.

pub mod playback;
pub mod snapshot;

use crate::graph::NodeId;
use std::fmt;

/// Every algorithm the visualizer can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    BubbleSort,
    QuickSort,
    HeapSort,
    LinearSearch,
    BinarySearch,
    Bfs,
    Dfs,
    Dijkstra,
    Kruskal,
    TopoSort,
    ListAppend,
    ListInsert,
    ListSearch,
    ListSort,
    TreeMin,
    TreeMax,
    TreeInsert,
    TreeDelete,
    Inorder,
    Preorder,
    Postorder,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "Bubble Sort",
            Algorithm::QuickSort => "Quick Sort",
            Algorithm::HeapSort => "Heap Sort",
            Algorithm::LinearSearch => "Linear Search",
            Algorithm::BinarySearch => "Binary Search",
            Algorithm::Bfs => "Breadth-First Search",
            Algorithm::Dfs => "Depth-First Search",
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::Kruskal => "Kruskal's Algorithm",
            Algorithm::TopoSort => "Topological Sort",
            Algorithm::ListAppend => "Add to Tail",
            Algorithm::ListInsert => "Add in Between",
            Algorithm::ListSearch => "List Search",
            Algorithm::ListSort => "List Sort",
            Algorithm::TreeMin => "Find Minimum",
            Algorithm::TreeMax => "Find Maximum",
            Algorithm::TreeInsert => "Insert Node",
            Algorithm::TreeDelete => "Delete Node",
            Algorithm::Inorder => "In-Order Traversal",
            Algorithm::Preorder => "Pre-Order Traversal",
            Algorithm::Postorder => "Post-Order Traversal",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which side of a tree node a descent took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Events over an array being sorted or searched. Indices refer to the
/// array as it stands after all earlier swaps in the trace.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayEvent {
    Compare { i: usize, j: usize },
    Swap { i: usize, j: usize },
    /// An index has reached its final position.
    Sorted { index: usize },
    Pivot { index: usize },
    PivotPlaced { index: usize },
    Partition { low: usize, high: usize },
    Heapify { root: usize },
    Probe { index: usize },
    Window { low: usize, high: usize, mid: usize },
    MoveLow { to: usize },
    MoveHigh { to: usize },
}

/// Events over a graph. Agenda snapshots carry the full queue/stack
/// contents so replay never has to re-derive scheduling order.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    InitAgenda { items: Vec<NodeId> },
    Visit { node: NodeId, parent: Option<NodeId> },
    /// Node is marked visited; `parent` is the edge it was reached by.
    Mark { node: NodeId, parent: Option<NodeId> },
    Check { from: NodeId, to: NodeId },
    Schedule { node: NodeId, from: NodeId, agenda: Vec<NodeId> },
    Agenda { items: Vec<NodeId> },
    InitDistances,
    SetSource { node: NodeId },
    Select { node: NodeId, parent: Option<NodeId> },
    Relax { from: NodeId, to: NodeId, dist: f64 },
    InitSet { node: NodeId },
    SortedEdges { order: Vec<usize> },
    CheckEdge { index: usize, from: NodeId, to: NodeId },
    AddEdge { index: usize, from: NodeId, to: NodeId },
    SkipEdge { index: usize, from: NodeId, to: NodeId },
    InitIndegree,
    IncIndegree { node: NodeId, value: usize },
    DecIndegree { node: NodeId, value: usize },
    Dequeue { node: NodeId },
    Append { node: NodeId },
}

/// Events over a binary search tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEvent {
    Start { key: i64 },
    Descend { from: i64, to: i64, side: Side },
    /// A traversal emits this key.
    Output { key: i64 },
    Backtrack { key: i64, side: Side },
    Insert { key: i64 },
    Delete { key: i64 },
    /// In-order successor replaces a deleted two-child node.
    Promote { key: i64 },
    Found { key: i64 },
}

/// Events over a singly linked list. Indices are 0-based positions from
/// the head.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// The traversal pointer moves to this position.
    Traverse { index: usize },
    /// A new tail node; `index` is its resulting position.
    Append { index: usize, value: i64 },
    /// A new node spliced in directly after position `after`.
    Insert { after: usize, value: i64 },
    Compare { i: usize, j: usize },
    /// Two node values exchanged; the links never change.
    SwapValues { i: usize, j: usize },
    Sorted { index: usize },
}

/// How a finished run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Finished,
    FoundAt { index: usize },
    NotFound,
    CycleDetected,
    TopoOrder { order: Vec<NodeId> },
    MstComplete { edges: Vec<usize>, total_weight: f64 },
    Distances { dist: Vec<f64> },
    Traversal { order: Vec<i64> },
}

/// The machine-readable payload of a step.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Array(ArrayEvent),
    Graph(GraphEvent),
    Tree(TreeEvent),
    List(ListEvent),
    Done(Outcome),
}

/// One step of an algorithm run. `text` is the narration baked in at
/// generation time; `line` is the pseudocode line to highlight, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub text: String,
    pub event: Event,
    pub line: Option<usize>,
}

impl Step {
    pub fn new(text: impl Into<String>, event: Event, line: Option<usize>) -> Self {
        Step { text: text.into(), event, line }
    }

    /// True for the terminal step of a trace.
    pub fn is_done(&self) -> bool {
        matches!(self.event, Event::Done(_))
    }
}

/// A complete run: the algorithm, its steps, and the pseudocode listing
/// the steps' `line` indices point into.
#[derive(Debug, Clone)]
pub struct Trace {
    pub algorithm: Algorithm,
    pub steps: Vec<Step>,
    pub code: &'static [&'static str],
}

impl Trace {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The outcome recorded by the final step, if the trace ends with one.
    pub fn outcome(&self) -> Option<&Outcome> {
        match self.steps.last() {
            Some(Step { event: Event::Done(outcome), .. }) => Some(outcome),
            _ => None,
        }
    }
}
