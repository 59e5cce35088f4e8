//! Main TUI application state and logic

use crate::algorithms::{self, PreconditionError};
use crate::bst::Bst;
use crate::graph::{Graph, NodeId};
use crate::highlight::{effect_of, HighlightState};
use crate::list::LinkedList;
use crate::session::{SessionRecord, SessionStore};
use crate::trace::playback::{PlaybackState, Player};
use crate::trace::snapshot::{ArraySnapshot, GraphSnapshot, ListSnapshot, Snapshot, TreeSnapshot};
use crate::trace::{Algorithm, Trace};
use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::collections::BTreeMap;
use std::io;
use std::time::{Duration, Instant};

/// The structure a run operates on, plus its parameters.
pub enum RunInput {
    Array { values: Vec<i64> },
    Search { values: Vec<i64>, target: i64 },
    Graph { graph: Graph, start: Option<NodeId> },
    Tree { tree: Bst, key: Option<i64> },
    List { list: LinkedList, value: Option<i64>, after: Option<usize>, target: Option<i64> },
}

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Code,
    Structure,
    Log,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Code => FocusedPane::Structure,
            FocusedPane::Structure => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Code,
        }
    }
}

/// The main application state
pub struct App {
    /// The algorithm being visualized
    pub algorithm: Algorithm,

    /// The structure and parameters the run operates on
    pub input: RunInput,

    /// Raw input text, kept for the session record
    pub input_fields: BTreeMap<String, String>,

    /// Playback engine
    pub player: Player,

    /// Algorithmic state implied by the steps delivered so far
    pub snapshot: Snapshot,

    /// Visual marks implied by the steps delivered so far
    pub highlights: HighlightState,

    /// Pseudocode line of the most recent step
    pub current_line: Option<usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub log_scroll: usize,
    pub structure_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Where completed runs are recorded
    pub store: Box<dyn SessionStore>,

    /// When the current run was started
    run_started: Option<Instant>,

    /// Whether the current run has been recorded already
    recorded: bool,

    /// Last time space was pressed (for debouncing)
    last_space_press: Instant,
}

impl App {
    pub fn new(
        algorithm: Algorithm,
        input: RunInput,
        input_fields: BTreeMap<String, String>,
        store: Box<dyn SessionStore>,
        delay_ms: u64,
    ) -> Self {
        let snapshot = initial_snapshot(&input);
        let mut player = Player::new();
        player.set_delay_ms(delay_ms);
        App {
            algorithm,
            input,
            input_fields,
            player,
            snapshot,
            highlights: HighlightState::default(),
            current_line: None,
            focused_pane: FocusedPane::Structure,
            log_scroll: 0,
            structure_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready! Press s to start."),
            store,
            run_started: None,
            recorded: false,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.advance(Instant::now(), false);

            // Use poll with timeout so playback keeps ticking
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Generate a fresh trace for the configured algorithm and input.
    fn generate(&self) -> Result<Trace, String> {
        use crate::algorithms::{list, searching, sorting, traversal, tree};
        let precondition = |r: Result<Trace, PreconditionError>| r.map_err(|e| e.to_string());
        match (&self.algorithm, &self.input) {
            (Algorithm::BubbleSort, RunInput::Array { values }) => {
                Ok(sorting::bubble_sort(values))
            }
            (Algorithm::QuickSort, RunInput::Array { values }) => Ok(sorting::quick_sort(values)),
            (Algorithm::HeapSort, RunInput::Array { values }) => Ok(sorting::heap_sort(values)),
            (Algorithm::LinearSearch, RunInput::Search { values, target }) => {
                Ok(searching::linear_search(values, *target))
            }
            (Algorithm::BinarySearch, RunInput::Search { values, target }) => {
                Ok(searching::binary_search(values, *target))
            }
            (Algorithm::Bfs, RunInput::Graph { graph, start: Some(start) }) => {
                Ok(traversal::bfs(graph, *start))
            }
            (Algorithm::Dfs, RunInput::Graph { graph, start: Some(start) }) => {
                Ok(traversal::dfs(graph, *start))
            }
            (Algorithm::Dijkstra, RunInput::Graph { graph, start: Some(start) }) => {
                precondition(algorithms::dijkstra(graph, *start))
            }
            (Algorithm::Kruskal, RunInput::Graph { graph, .. }) => {
                precondition(algorithms::kruskal(graph))
            }
            (Algorithm::TopoSort, RunInput::Graph { graph, .. }) => {
                precondition(algorithms::topo_sort(graph))
            }
            (Algorithm::ListAppend, RunInput::List { list, value: Some(value), .. }) => {
                Ok(list::append(list, *value))
            }
            (Algorithm::ListInsert, RunInput::List { list, value: Some(value), after: Some(after), .. }) => {
                Ok(list::insert_after(list, *after, *value))
            }
            (Algorithm::ListSearch, RunInput::List { list, target: Some(target), .. }) => {
                Ok(list::search(list, *target))
            }
            (Algorithm::ListSort, RunInput::List { list, .. }) => Ok(list::sort(list)),
            (Algorithm::TreeMin, RunInput::Tree { tree, .. }) => Ok(tree::find_min(tree)),
            (Algorithm::TreeMax, RunInput::Tree { tree, .. }) => Ok(tree::find_max(tree)),
            (Algorithm::TreeInsert, RunInput::Tree { tree, key: Some(key) }) => {
                Ok(tree::insert_key(tree, *key))
            }
            (Algorithm::TreeDelete, RunInput::Tree { tree, key: Some(key) }) => {
                Ok(tree::delete_key(tree, *key))
            }
            (Algorithm::Inorder, RunInput::Tree { tree, .. }) => Ok(tree::inorder(tree)),
            (Algorithm::Preorder, RunInput::Tree { tree, .. }) => Ok(tree::preorder(tree)),
            (Algorithm::Postorder, RunInput::Tree { tree, .. }) => Ok(tree::postorder(tree)),
            // main() only pairs algorithms with matching inputs
            _ => Err(String::from("algorithm does not match the provided input")),
        }
    }

    /// Start (or restart) playback from a fresh trace.
    fn start_run(&mut self, now: Instant) {
        match self.generate() {
            Ok(trace) => {
                self.snapshot = initial_snapshot(&self.input);
                self.highlights.clear();
                self.current_line = None;
                self.log_scroll = usize::MAX;
                self.recorded = false;
                self.run_started = Some(now);
                match self.player.start(trace, now) {
                    Ok(()) => self.status_message = format!("Running {}...", self.algorithm),
                    Err(e) => self.status_message = format!("Cannot start: {}", e),
                }
            }
            Err(e) => {
                self.status_message = format!("Cannot start: {}", e);
            }
        }
    }

    /// Discard the run and restore the initial structure.
    fn reset(&mut self) {
        self.player.reset();
        self.snapshot = initial_snapshot(&self.input);
        self.highlights.clear();
        self.current_line = None;
        self.log_scroll = 0;
        self.run_started = None;
        self.recorded = false;
        self.status_message = String::from("Ready! Press s to start.");
    }

    /// Deliver the next step if due (or immediately when `manual`), then
    /// fold it into the snapshot and highlight state.
    fn advance(&mut self, now: Instant, manual: bool) {
        let step = if manual {
            self.player.step_once(now).cloned()
        } else {
            self.player.tick(now).cloned()
        };
        if let Some(step) = step {
            let graph = match &self.input {
                RunInput::Graph { graph, .. } => Some(graph),
                _ => None,
            };
            let effect = effect_of(&step, graph);
            self.snapshot.apply(&step, graph);
            self.highlights.apply(&effect);
            self.current_line = step.line;
            self.status_message = step.text;
            self.log_scroll = usize::MAX;
        }
        if self.player.state() == PlaybackState::Done && !self.recorded {
            self.record_run();
        }
    }

    /// Record the finished run. Best effort; never interrupts the UI.
    fn record_run(&mut self) {
        self.recorded = true;
        let result = self
            .player
            .trace()
            .and_then(|t| t.steps.last())
            .map(|s| s.text.clone());
        let record = SessionRecord {
            algorithm: self.algorithm.name().to_string(),
            inputs: self.input_fields.clone(),
            duration_ms: self
                .run_started
                .map(|t| t.elapsed().as_millis() as u64),
            result,
            notes: None,
            device: String::from("terminal"),
            timestamp: Utc::now(),
        };
        self.store.record_session(record);
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(pane_area);

        // Left column: pseudocode (top) | step log (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        let code = self
            .player
            .trace()
            .map(|t| t.code)
            .unwrap_or_else(|| algorithms::listing(self.algorithm));
        super::panes::render_code_pane(
            frame,
            left_rows[0],
            self.algorithm.name(),
            code,
            self.current_line,
            self.focused_pane == FocusedPane::Code,
        );

        let delivered = self
            .player
            .trace()
            .map(|t| &t.steps[..self.player.cursor()])
            .unwrap_or(&[]);
        super::panes::render_log_pane(
            frame,
            left_rows[1],
            delivered,
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        let view = match (&self.snapshot, &self.input) {
            (Snapshot::Array(snap), _) => super::panes::StructureView::Array {
                snap,
                highlights: &self.highlights,
            },
            (Snapshot::Graph(snap), RunInput::Graph { graph, .. }) => {
                super::panes::StructureView::Graph {
                    graph,
                    snap,
                    highlights: &self.highlights,
                }
            }
            (Snapshot::Tree(snap), _) => super::panes::StructureView::Tree {
                snap,
                highlights: &self.highlights,
            },
            (Snapshot::List(snap), _) => super::panes::StructureView::List {
                snap,
                highlights: &self.highlights,
            },
            _ => super::panes::StructureView::Empty,
        };
        super::panes::render_structure_pane(
            frame,
            columns[1],
            view,
            self.focused_pane == FocusedPane::Structure,
            &mut self.structure_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.player.cursor(),
            self.player.trace().map(|t| t.len()),
            self.player.state(),
            self.player.delay_ms(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('s') => {
                self.start_run(Instant::now());
            }
            KeyCode::Char('r') => {
                self.reset();
            }
            KeyCode::Char(' ') => {
                // 200ms debounce to prevent key repeat spam
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.player.toggle_pause(Instant::now());
                    match self.player.state() {
                        PlaybackState::Running => {
                            self.status_message = String::from("Playing...");
                        }
                        PlaybackState::Paused => {
                            self.status_message = String::from("Paused");
                        }
                        _ => {}
                    }
                }
            }
            KeyCode::Right => {
                self.advance(Instant::now(), true);
            }
            KeyCode::Char('[') => {
                self.player.speed_up();
                self.status_message = format!("Step delay: {}ms", self.player.delay_ms());
            }
            KeyCode::Char(']') => {
                self.player.slow_down();
                self.status_message = format!("Step delay: {}ms", self.player.delay_ms());
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_sub(1);
                }
                FocusedPane::Structure => {
                    self.structure_scroll = self.structure_scroll.saturating_sub(1);
                }
                FocusedPane::Code => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_add(1);
                }
                FocusedPane::Structure => {
                    self.structure_scroll = self.structure_scroll.saturating_add(1);
                }
                FocusedPane::Code => {}
            },
            _ => {}
        }
    }
}

fn initial_snapshot(input: &RunInput) -> Snapshot {
    match input {
        RunInput::Array { values } | RunInput::Search { values, .. } => {
            Snapshot::Array(ArraySnapshot::new(values.clone()))
        }
        RunInput::Graph { graph, .. } => Snapshot::Graph(GraphSnapshot::new(graph)),
        RunInput::Tree { tree, .. } => Snapshot::Tree(TreeSnapshot::new(tree.clone())),
        RunInput::List { list, .. } => Snapshot::List(ListSnapshot::new(list.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::NullSessionStore;
    use crossterm::event::KeyModifiers;

    fn app_with_delay(delay_ms: u64) -> App {
        App::new(
            Algorithm::BubbleSort,
            RunInput::Array { values: vec![3, 1, 2] },
            BTreeMap::new(),
            Box::new(NullSessionStore),
            delay_ms,
        )
    }

    fn press(app: &mut App, c: char) {
        app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    // `[` speeds playback up (shorter delay), `]` slows it down.
    #[test]
    fn bracket_keys_adjust_the_delay() {
        let mut app = app_with_delay(800);
        press(&mut app, '[');
        assert_eq!(app.player.delay_ms(), 700);
        press(&mut app, ']');
        press(&mut app, ']');
        assert_eq!(app.player.delay_ms(), 900);
    }
}
