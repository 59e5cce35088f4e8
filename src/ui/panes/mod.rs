//! TUI pane rendering modules
//!
//! One module per visual pane, each exporting a `render_*` free function
//! that draws into a ratatui [`Frame`](ratatui::Frame) region.
//!
//! - [`code`]: the algorithm's pseudocode listing with the current line marked
//! - [`structure`]: the array, graph, or tree the run operates on
//! - [`log`]: narration of every step delivered so far
//! - [`status`]: status bar with keybindings and playback state

pub mod code;
pub mod log;
pub mod status;
pub mod structure;

pub use code::render_code_pane;
pub use log::render_log_pane;
pub use status::render_status_bar;
pub use structure::{render_structure_pane, StructureView};
