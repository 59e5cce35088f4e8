//! End-to-end scenarios: parse input, generate a trace, replay it

use algotty::algorithms::{self, list, searching, sorting, traversal, tree};
use algotty::graph::Graph;
use algotty::highlight::{effect_of, HighlightState};
use algotty::input::{build_bst, build_graph, parse_edges, parse_keys, parse_nodes, parse_values};
use algotty::list::LinkedList;
use algotty::trace::snapshot::{ArraySnapshot, GraphSnapshot, ListSnapshot, TreeSnapshot};
use algotty::trace::{Event, Outcome, Trace};

fn graph_from(nodes: &str, edges: &str, directed: bool, weighted: bool) -> Graph {
    let names = parse_nodes(nodes).unwrap();
    let specs = parse_edges(edges).unwrap();
    build_graph(names, specs, directed, weighted).unwrap()
}

fn replay_graph(trace: &Trace, graph: &Graph) -> (GraphSnapshot, HighlightState) {
    let mut snap = GraphSnapshot::new(graph);
    let mut highlights = HighlightState::default();
    for step in &trace.steps {
        highlights.apply(&effect_of(step, Some(graph)));
        if let Event::Graph(event) = &step.event {
            snap.apply(event, graph);
        }
    }
    (snap, highlights)
}

#[test]
fn bubble_sort_from_raw_text() {
    let values = parse_values("1, 5, 7, 2, 2, 3").unwrap();
    let trace = sorting::bubble_sort(&values);
    let mut snap = ArraySnapshot::new(values);
    for step in &trace.steps {
        if let Event::Array(event) = &step.event {
            snap.apply(event);
        }
    }
    assert_eq!(snap.values, vec![1, 2, 2, 3, 5, 7]);
    // 6 values: 15 comparisons exactly
    let compares = trace
        .steps
        .iter()
        .filter(|s| {
            matches!(s.event, Event::Array(algotty::trace::ArrayEvent::Compare { .. }))
        })
        .count();
    assert_eq!(compares, 15);
}

#[test]
fn binary_search_finds_five_at_index_four() {
    let values = parse_values("1,5,7,2,2,3").unwrap();
    let trace = searching::binary_search(&values, 5);
    assert_eq!(trace.outcome(), Some(&Outcome::FoundAt { index: 4 }));
}

#[test]
fn bfs_marks_reach_the_whole_component() {
    let g = graph_from("A,B,C,D", "(A,B) (A,C) (B,D)", false, false);
    let trace = traversal::bfs(&g, g.node("A").unwrap());
    let (snap, highlights) = replay_graph(&trace, &g);
    assert_eq!(snap.visited.len(), 4);
    // every visited node ends up persistently marked
    for node in &snap.visited {
        assert!(highlights.nodes.contains(node));
    }
    // three tree edges for four nodes
    assert_eq!(highlights.edges.len(), 3);
}

#[test]
fn dijkstra_distances_via_parsed_graph() {
    let g = graph_from("A,B,C", "(A,B,4) (A,C,1) (C,B,2)", false, true);
    let trace = algorithms::dijkstra(&g, g.node("A").unwrap()).unwrap();
    let (snap, _) = replay_graph(&trace, &g);
    assert_eq!(snap.dist, vec![0.0, 3.0, 1.0]);
}

#[test]
fn kruskal_ring_drops_the_weight_five_edge() {
    let g = graph_from("A,B,C,D,E", "(A,B,5) (B,C,2) (C,D,4) (D,E,3) (E,A,1)", false, true);
    let trace = algorithms::kruskal(&g).unwrap();
    let (snap, highlights) = replay_graph(&trace, &g);
    assert_eq!(snap.mst.len(), 4);
    assert!(!snap.mst.contains(&0));
    assert_eq!(snap.mst_weight, 10.0);
    for index in &snap.mst {
        assert!(highlights.edges.contains(index));
    }
}

#[test]
fn topo_cycle_is_a_trace_outcome() {
    let g = graph_from("A,B,C,D,E", "(A,B) (B,C) (C,D) (D,E) (E,A)", true, false);
    let trace = algorithms::topo_sort(&g).unwrap();
    assert_eq!(trace.outcome(), Some(&Outcome::CycleDetected));
    let (snap, _) = replay_graph(&trace, &g);
    assert!(snap.result.is_empty());
}

#[test]
fn topo_order_of_a_dag() {
    let g = graph_from("A,B,C", "(A,B) (B,C)", true, false);
    let trace = algorithms::topo_sort(&g).unwrap();
    let (snap, _) = replay_graph(&trace, &g);
    let names: Vec<&str> = snap.result.iter().map(|&n| g.name(n)).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn tree_insert_replays_onto_the_snapshot() {
    let keys = parse_keys("8,3,10,1,6").unwrap();
    let bst = build_bst(&keys).unwrap();
    let trace = tree::insert_key(&bst, 5);
    let mut snap = TreeSnapshot::new(bst);
    for step in &trace.steps {
        if let Event::Tree(event) = &step.event {
            snap.apply(event);
        }
    }
    assert!(snap.tree.contains(5));
    assert_eq!(snap.tree.keys_inorder(), vec![1, 3, 5, 6, 8, 10]);
}

#[test]
fn tree_delete_replays_onto_the_snapshot() {
    let keys = parse_keys("8,3,10,1,6,4,7").unwrap();
    let bst = build_bst(&keys).unwrap();
    let trace = tree::delete_key(&bst, 3);
    let mut snap = TreeSnapshot::new(bst.clone());
    for step in &trace.steps {
        if let Event::Tree(event) = &step.event {
            snap.apply(event);
        }
    }
    assert!(!snap.tree.contains(3));
    assert_eq!(snap.tree.keys_inorder(), vec![1, 4, 6, 7, 8, 10]);
    // the generator never touched the original tree
    assert!(bst.contains(3));
}

#[test]
fn list_insert_replays_onto_the_snapshot() {
    let values = parse_values("1,2,4").unwrap();
    let list = LinkedList::from_values(&values);
    let trace = list::insert_after(&list, 1, 3);
    let mut snap = ListSnapshot::new(list.clone());
    let mut highlights = HighlightState::default();
    for step in &trace.steps {
        highlights.apply(&effect_of(step, None));
        if let Event::List(event) = &step.event {
            snap.apply(event);
        }
    }
    assert_eq!(snap.list.values(), vec![1, 2, 3, 4]);
    // the new node at position 2 stays marked
    assert!(highlights.indices.contains(&2));
    // the generator never touched the original list
    assert_eq!(list.values(), vec![1, 2, 4]);
}

#[test]
fn list_search_finds_target_position() {
    let values = parse_values("7,3,9").unwrap();
    let list = LinkedList::from_values(&values);
    let trace = list::search(&list, 9);
    assert_eq!(trace.outcome(), Some(&Outcome::FoundAt { index: 2 }));
}

#[test]
fn inorder_traversal_outputs_sorted_keys() {
    let keys = parse_keys("8,3,10,1,6").unwrap();
    let bst = build_bst(&keys).unwrap();
    let trace = tree::inorder(&bst);
    let mut snap = TreeSnapshot::new(bst);
    let mut highlights = HighlightState::default();
    for step in &trace.steps {
        highlights.apply(&effect_of(step, None));
        if let Event::Tree(event) = &step.event {
            snap.apply(event);
        }
    }
    assert_eq!(snap.output, vec![1, 3, 6, 8, 10]);
    for key in &snap.output {
        assert!(highlights.keys.contains(key));
    }
}
