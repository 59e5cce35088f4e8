//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, playback control
//! - **[`panes`]** — stateless render functions for each visible pane (pseudocode,
//!   structure, step log, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an [`Algorithm`]
//! and a [`RunInput`] and call [`App::run`] to start the event loop.
//!
//! [`Algorithm`]: crate::trace::Algorithm
//! [`RunInput`]: app::RunInput
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::{App, RunInput};
