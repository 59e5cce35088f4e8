//! Trace generators
//!
//! One function per algorithm, each taking a validated structure and
//! returning the complete [`Trace`](crate::trace::Trace) of its run.
//! Generators are pure: same input, same trace. Graph algorithms with
//! structural requirements check them first and refuse to generate a
//! trace at all rather than emit a partial one.

pub mod list;
pub mod searching;
pub mod sorting;
pub mod toposort;
pub mod traversal;
pub mod tree;

mod dijkstra;
mod kruskal;

pub use dijkstra::dijkstra;
pub use kruskal::kruskal;
pub use toposort::topo_sort;

use crate::trace::Algorithm;
use std::error::Error;
use std::fmt;

/// The pseudocode listing an algorithm's steps point into.
pub fn listing(algorithm: Algorithm) -> &'static [&'static str] {
    match algorithm {
        Algorithm::BubbleSort => sorting::BUBBLE_CODE,
        Algorithm::QuickSort => sorting::QUICK_CODE,
        Algorithm::HeapSort => sorting::HEAP_CODE,
        Algorithm::LinearSearch => searching::LINEAR_CODE,
        Algorithm::BinarySearch => searching::BINARY_CODE,
        Algorithm::Bfs => traversal::BFS_CODE,
        Algorithm::Dfs => traversal::DFS_CODE,
        Algorithm::Dijkstra => dijkstra::DIJKSTRA_CODE,
        Algorithm::Kruskal => kruskal::KRUSKAL_CODE,
        Algorithm::TopoSort => toposort::TOPO_CODE,
        Algorithm::ListAppend => list::APPEND_CODE,
        Algorithm::ListInsert => list::INSERT_CODE,
        Algorithm::ListSearch => list::SEARCH_CODE,
        Algorithm::ListSort => list::SORT_CODE,
        Algorithm::TreeMin => tree::MIN_CODE,
        Algorithm::TreeMax => tree::MAX_CODE,
        Algorithm::TreeInsert => tree::INSERT_CODE,
        Algorithm::TreeDelete => tree::DELETE_CODE,
        Algorithm::Inorder => tree::INORDER_CODE,
        Algorithm::Preorder => tree::PREORDER_CODE,
        Algorithm::Postorder => tree::POSTORDER_CODE,
    }
}

/// A structural requirement the input graph fails to meet. Raised before
/// any steps are generated.
#[derive(Debug, Clone, PartialEq)]
pub enum PreconditionError {
    /// Shortest-path runs require non-negative weights.
    NegativeWeight { from: String, to: String, weight: f64 },
    /// Spanning trees are defined over undirected graphs.
    RequiresUndirected,
    /// Topological order is defined over directed graphs.
    RequiresDirected,
    /// Spanning-tree cost needs explicit weights.
    RequiresWeighted,
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionError::NegativeWeight { from, to, weight } => write!(
                f,
                "edge ({}, {}) has negative weight {}; all weights must be non-negative",
                from, to, weight
            ),
            PreconditionError::RequiresUndirected => {
                write!(f, "this algorithm requires an undirected graph")
            }
            PreconditionError::RequiresDirected => {
                write!(f, "this algorithm requires a directed graph")
            }
            PreconditionError::RequiresWeighted => {
                write!(f, "this algorithm requires a weighted graph")
            }
        }
    }
}

impl Error for PreconditionError {}
