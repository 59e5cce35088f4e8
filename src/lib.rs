//! # Introduction
//!
//! algotty turns classic textbook algorithms into step-by-step terminal
//! animations.  Each run generates its complete trace up front — every
//! comparison, swap, relaxation, or tree move — and a timer-driven player
//! replays it through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Input text → Structures → Generator → Trace → Playback → TUI
//! ```
//!
//! 1. [`input`] — parses values, node lists, and edge tuples, and validates
//!    them into [`graph::Graph`], [`bst::Bst`], and [`list::LinkedList`]
//!    structures.
//! 2. [`algorithms`] — one generator per algorithm, each producing an
//!    ordered [`trace::Trace`] of immutable [`trace::Step`]s.
//! 3. [`trace`] — the step model, the deadline-based
//!    [`trace::playback::Player`], and [`trace::snapshot::Snapshot`]s that
//!    fold delivered steps back into algorithmic state.
//! 4. [`highlight`] — maps each step to its visual effect: a transient
//!    flash plus persistent marks.
//! 5. [`session`] — optional JSON-backed history of completed runs.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! Sorting: bubble, quick, heap.  Searching: linear, binary.
//! Graphs: BFS, DFS, Dijkstra, Kruskal, topological sort.
//! Trees: min/max, insert, delete, in-/pre-/post-order traversal.
//! Linked lists: append to tail, insert after a position, search, sort.

pub mod algorithms;
pub mod bst;
pub mod graph;
pub mod highlight;
pub mod input;
pub mod list;
pub mod session;
pub mod trace;
pub mod ui;
