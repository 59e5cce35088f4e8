// algotty: step-by-step algorithm animations in the terminal

use std::collections::BTreeMap;
use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use algotty::algorithms;
use algotty::input::{build_bst, build_graph, parse_edges, parse_keys, parse_nodes, parse_values};
use algotty::list::LinkedList;
use algotty::session::{FileSessionStore, NullSessionStore, SessionStore};
use algotty::trace::playback::DEFAULT_DELAY_MS;
use algotty::trace::Algorithm;
use algotty::ui::{App, RunInput};

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <command> [args] [flags]", program);
    eprintln!();
    eprintln!("Array commands:");
    eprintln!("  bubble-sort|quick-sort|heap-sort <values>");
    eprintln!("  linear-search|binary-search <values> <target>");
    eprintln!();
    eprintln!("Graph commands (edges are (A,B) or (A,B,weight) tuples):");
    eprintln!("  bfs|dfs|dijkstra <nodes> <edges> <start> [--directed] [--weighted]");
    eprintln!("  kruskal <nodes> <edges> --weighted");
    eprintln!("  topo-sort <nodes> <edges> --directed");
    eprintln!();
    eprintln!("Linked-list commands:");
    eprintln!("  list-append <values> <value>");
    eprintln!("  list-insert <values> <position> <value>");
    eprintln!("  list-search <values> <target>");
    eprintln!("  list-sort <values>");
    eprintln!();
    eprintln!("Tree commands (keys must be unique):");
    eprintln!("  tree-min|tree-max|inorder|preorder|postorder <keys>");
    eprintln!("  tree-insert|tree-delete <keys> <key>");
    eprintln!();
    eprintln!("History:");
    eprintln!("  history            # list recorded runs");
    eprintln!("  history on|off     # toggle recording");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --delay <ms>       # step delay, 100-3000 (default {})", DEFAULT_DELAY_MS);
    eprintln!("  --no-history       # do not record this run");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} bubble-sort \"5,3,8,1\"", program);
    eprintln!("  {} dijkstra \"A,B,C\" \"(A,B,2) (B,C,1) (A,C,5)\" A --weighted", program);
    std::process::exit(1);
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

struct Cli {
    command: String,
    positional: Vec<String>,
    directed: bool,
    weighted: bool,
    delay_ms: u64,
    no_history: bool,
}

fn parse_cli(program: &str) -> Cli {
    let mut args = std::env::args().skip(1);
    let mut positional = Vec::new();
    let mut directed = false;
    let mut weighted = false;
    let mut delay_ms = DEFAULT_DELAY_MS;
    let mut no_history = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--directed" => directed = true,
            "--weighted" => weighted = true,
            "--no-history" => no_history = true,
            "--delay" => match args.next().and_then(|v| v.parse::<u64>().ok()) {
                Some(ms) => delay_ms = ms,
                None => fail("--delay needs a millisecond value"),
            },
            "--help" | "-h" => usage(program),
            _ if arg.starts_with("--") => fail(format!("unknown flag '{}'", arg)),
            _ => positional.push(arg),
        }
    }

    if positional.is_empty() {
        usage(program);
    }
    let command = positional.remove(0);
    Cli { command, positional, directed, weighted, delay_ms, no_history }
}

fn algorithm_for(command: &str) -> Option<Algorithm> {
    Some(match command {
        "bubble-sort" => Algorithm::BubbleSort,
        "quick-sort" => Algorithm::QuickSort,
        "heap-sort" => Algorithm::HeapSort,
        "linear-search" => Algorithm::LinearSearch,
        "binary-search" => Algorithm::BinarySearch,
        "bfs" => Algorithm::Bfs,
        "dfs" => Algorithm::Dfs,
        "dijkstra" => Algorithm::Dijkstra,
        "kruskal" => Algorithm::Kruskal,
        "topo-sort" => Algorithm::TopoSort,
        "list-append" => Algorithm::ListAppend,
        "list-insert" => Algorithm::ListInsert,
        "list-search" => Algorithm::ListSearch,
        "list-sort" => Algorithm::ListSort,
        "tree-min" => Algorithm::TreeMin,
        "tree-max" => Algorithm::TreeMax,
        "tree-insert" => Algorithm::TreeInsert,
        "tree-delete" => Algorithm::TreeDelete,
        "inorder" => Algorithm::Inorder,
        "preorder" => Algorithm::Preorder,
        "postorder" => Algorithm::Postorder,
        _ => return None,
    })
}

fn positional<'a>(cli: &'a Cli, i: usize, program: &str) -> &'a str {
    match cli.positional.get(i) {
        Some(value) => value.as_str(),
        None => usage(program),
    }
}

/// Build the run input for `algorithm` from the positional arguments,
/// validating everything before the TUI starts.
fn build_input(
    algorithm: Algorithm,
    cli: &Cli,
    program: &str,
) -> (RunInput, BTreeMap<String, String>) {
    let mut fields = BTreeMap::new();
    let arg = |i: usize| positional(cli, i, program);

    let input = match algorithm {
        Algorithm::BubbleSort | Algorithm::QuickSort | Algorithm::HeapSort => {
            fields.insert("values".to_string(), arg(0).to_string());
            let values = parse_values(arg(0)).unwrap_or_else(|e| fail(e));
            RunInput::Array { values }
        }
        Algorithm::LinearSearch | Algorithm::BinarySearch => {
            fields.insert("values".to_string(), arg(0).to_string());
            fields.insert("target".to_string(), arg(1).to_string());
            let values = parse_values(arg(0)).unwrap_or_else(|e| fail(e));
            let target = arg(1)
                .trim()
                .parse::<i64>()
                .unwrap_or_else(|_| fail(format!("'{}' is not a valid target", arg(1))));
            RunInput::Search { values, target }
        }
        Algorithm::Bfs | Algorithm::Dfs | Algorithm::Dijkstra => {
            fields.insert("nodes".to_string(), arg(0).to_string());
            fields.insert("edges".to_string(), arg(1).to_string());
            fields.insert("start".to_string(), arg(2).to_string());
            let names = parse_nodes(arg(0)).unwrap_or_else(|e| fail(e));
            let edges = parse_edges(arg(1)).unwrap_or_else(|e| fail(e));
            let graph =
                build_graph(names, edges, cli.directed, cli.weighted).unwrap_or_else(|e| fail(e));
            let start = match graph.node(arg(2).trim()) {
                Some(start) => start,
                None => fail(format!("start node '{}' is not in the graph", arg(2))),
            };
            RunInput::Graph { graph, start: Some(start) }
        }
        Algorithm::Kruskal | Algorithm::TopoSort => {
            fields.insert("nodes".to_string(), arg(0).to_string());
            fields.insert("edges".to_string(), arg(1).to_string());
            let names = parse_nodes(arg(0)).unwrap_or_else(|e| fail(e));
            let edges = parse_edges(arg(1)).unwrap_or_else(|e| fail(e));
            let graph =
                build_graph(names, edges, cli.directed, cli.weighted).unwrap_or_else(|e| fail(e));
            RunInput::Graph { graph, start: None }
        }
        Algorithm::ListAppend => {
            fields.insert("values".to_string(), arg(0).to_string());
            fields.insert("value".to_string(), arg(1).to_string());
            let values = parse_values(arg(0)).unwrap_or_else(|e| fail(e));
            let value = arg(1)
                .trim()
                .parse::<i64>()
                .unwrap_or_else(|_| fail(format!("'{}' is not a valid value", arg(1))));
            let list = LinkedList::from_values(&values);
            RunInput::List { list, value: Some(value), after: None, target: None }
        }
        Algorithm::ListInsert => {
            fields.insert("values".to_string(), arg(0).to_string());
            fields.insert("position".to_string(), arg(1).to_string());
            fields.insert("value".to_string(), arg(2).to_string());
            let values = parse_values(arg(0)).unwrap_or_else(|e| fail(e));
            let after = arg(1)
                .trim()
                .parse::<usize>()
                .unwrap_or_else(|_| fail(format!("'{}' is not a valid position", arg(1))));
            if after >= values.len() {
                fail(format!(
                    "position {} is out of range for a list of {}",
                    after,
                    values.len()
                ));
            }
            let value = arg(2)
                .trim()
                .parse::<i64>()
                .unwrap_or_else(|_| fail(format!("'{}' is not a valid value", arg(2))));
            let list = LinkedList::from_values(&values);
            RunInput::List { list, value: Some(value), after: Some(after), target: None }
        }
        Algorithm::ListSearch => {
            fields.insert("values".to_string(), arg(0).to_string());
            fields.insert("target".to_string(), arg(1).to_string());
            let values = parse_values(arg(0)).unwrap_or_else(|e| fail(e));
            let target = arg(1)
                .trim()
                .parse::<i64>()
                .unwrap_or_else(|_| fail(format!("'{}' is not a valid target", arg(1))));
            let list = LinkedList::from_values(&values);
            RunInput::List { list, value: None, after: None, target: Some(target) }
        }
        Algorithm::ListSort => {
            fields.insert("values".to_string(), arg(0).to_string());
            let values = parse_values(arg(0)).unwrap_or_else(|e| fail(e));
            let list = LinkedList::from_values(&values);
            RunInput::List { list, value: None, after: None, target: None }
        }
        Algorithm::TreeMin
        | Algorithm::TreeMax
        | Algorithm::Inorder
        | Algorithm::Preorder
        | Algorithm::Postorder => {
            fields.insert("keys".to_string(), arg(0).to_string());
            let keys = parse_keys(arg(0)).unwrap_or_else(|e| fail(e));
            let tree = build_bst(&keys).unwrap_or_else(|e| fail(e));
            RunInput::Tree { tree, key: None }
        }
        Algorithm::TreeInsert | Algorithm::TreeDelete => {
            fields.insert("keys".to_string(), arg(0).to_string());
            fields.insert("key".to_string(), arg(1).to_string());
            let keys = parse_keys(arg(0)).unwrap_or_else(|e| fail(e));
            let tree = build_bst(&keys).unwrap_or_else(|e| fail(e));
            let key = arg(1)
                .trim()
                .parse::<i64>()
                .unwrap_or_else(|_| fail(format!("'{}' is not a valid key", arg(1))));
            RunInput::Tree { tree, key: Some(key) }
        }
    };
    (input, fields)
}

/// Check structural preconditions before the TUI starts, so a graph the
/// algorithm refuses is reported on stderr instead of inside the UI.
fn check_preconditions(algorithm: Algorithm, input: &RunInput) {
    if let RunInput::Graph { graph, start } = input {
        let result = match algorithm {
            Algorithm::Dijkstra => match start {
                Some(start) => algorithms::dijkstra(graph, *start).map(|_| ()),
                None => Ok(()),
            },
            Algorithm::Kruskal => algorithms::kruskal(graph).map(|_| ()),
            Algorithm::TopoSort => algorithms::topo_sort(graph).map(|_| ()),
            _ => Ok(()),
        };
        if let Err(e) = result {
            fail(e);
        }
    }
}

fn run_history_command(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FileSessionStore::open_default()?;
    match cli.positional.first().map(String::as_str) {
        Some("on") => {
            store.set_enabled(true)?;
            println!("History recording enabled.");
        }
        Some("off") => {
            store.set_enabled(false)?;
            println!("History recording disabled.");
        }
        Some(other) => fail(format!("unknown history subcommand '{}'", other)),
        None => {
            let sessions = store.list_sessions();
            if sessions.is_empty() {
                println!("No recorded runs.");
            }
            for s in sessions {
                let inputs: Vec<String> =
                    s.inputs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                println!(
                    "{}  {}  [{}]  {}",
                    s.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    s.algorithm,
                    inputs.join(", "),
                    s.result.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| String::from("algotty"));
    let cli = parse_cli(&program);

    if cli.command == "history" {
        return run_history_command(&cli);
    }

    let algorithm = match algorithm_for(&cli.command) {
        Some(algorithm) => algorithm,
        None => {
            eprintln!("Error: unknown command '{}'", cli.command);
            eprintln!();
            usage(&program);
        }
    };

    let (input, fields) = build_input(algorithm, &cli, &program);
    check_preconditions(algorithm, &input);

    let store: Box<dyn SessionStore> = if cli.no_history {
        Box::new(NullSessionStore)
    } else {
        match FileSessionStore::open_default() {
            Ok(store) => Box::new(store),
            Err(e) => {
                eprintln!("Warning: history unavailable: {}", e);
                Box::new(NullSessionStore)
            }
        }
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(algorithm, input, fields, store, cli.delay_ms);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
