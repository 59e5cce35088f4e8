//! Data-structure pane rendering
//!
//! Shows the structure the algorithm is working on, rebuilt from the
//! current snapshot: the array with its marks, the graph's nodes, edges
//! and agenda, or the tree drawn sideways (root at the left, right
//! subtree above).

use crate::bst::Bst;
use crate::graph::Graph;
use crate::highlight::HighlightState;
use crate::trace::snapshot::{ArraySnapshot, GraphSnapshot, ListSnapshot, TreeSnapshot};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// What the structure pane should draw this frame.
pub enum StructureView<'a> {
    Empty,
    Array { snap: &'a ArraySnapshot, highlights: &'a HighlightState },
    Graph { graph: &'a Graph, snap: &'a GraphSnapshot, highlights: &'a HighlightState },
    Tree { snap: &'a TreeSnapshot, highlights: &'a HighlightState },
    List { snap: &'a ListSnapshot, highlights: &'a HighlightState },
}

pub fn render_structure_pane(
    frame: &mut Frame,
    area: Rect,
    view: StructureView<'_>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Structure ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = match view {
        StructureView::Empty => {
            let paragraph = Paragraph::new("(press s to start)")
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.comment));
            frame.render_widget(paragraph, area);
            return;
        }
        StructureView::Array { snap, highlights } => array_lines(snap, highlights),
        StructureView::Graph { graph, snap, highlights } => graph_lines(graph, snap, highlights),
        StructureView::Tree { snap, highlights } => tree_lines(snap, highlights),
        StructureView::List { snap, highlights } => list_lines(snap, highlights),
    };

    // same scroll clamping as the log pane
    let total = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total > visible_height {
        *scroll_offset = (*scroll_offset).min(total - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(ListItem::new)
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn cell_style(flashed: bool, marked: bool) -> Style {
    if flashed {
        Style::default()
            .bg(DEFAULT_THEME.secondary)
            .fg(ratatui::style::Color::Black)
            .add_modifier(Modifier::BOLD)
    } else if marked {
        Style::default()
            .fg(DEFAULT_THEME.success)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    }
}

fn array_lines<'a>(snap: &ArraySnapshot, highlights: &HighlightState) -> Vec<Line<'a>> {
    let width = snap
        .values
        .iter()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);

    let mut cells = vec![Span::raw(" ")];
    for (i, value) in snap.values.iter().enumerate() {
        let style = cell_style(highlights.index_flashed(i), highlights.index_marked(i));
        cells.push(Span::styled(format!(" {:>width$} ", value, width = width), style));
        cells.push(Span::raw(" "));
    }

    let mut lines = vec![Line::from(cells)];

    if let Some((low, high, mid)) = snap.window {
        let mut markers = vec![Span::raw(" ")];
        for i in 0..snap.values.len() {
            let mark = match i {
                _ if i == mid => "M",
                _ if i == low => "L",
                _ if i == high => "H",
                _ => " ",
            };
            markers.push(Span::styled(
                format!(" {:>width$} ", mark, width = width),
                Style::default().fg(DEFAULT_THEME.primary),
            ));
            markers.push(Span::raw(" "));
        }
        lines.push(Line::from(markers));
    }

    lines
}

fn graph_lines<'a>(
    graph: &Graph,
    snap: &GraphSnapshot,
    highlights: &HighlightState,
) -> Vec<Line<'a>> {
    let heading = Style::default()
        .fg(DEFAULT_THEME.primary)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(DEFAULT_THEME.comment);

    let mut lines = vec![Line::from(Span::styled("Nodes", heading))];
    for node in graph.nodes() {
        let style = cell_style(
            highlights.node_flashed(node),
            highlights.nodes.contains(&node),
        );
        let mut spans = vec![
            Span::raw("  "),
            Span::styled(graph.name(node).to_string(), style),
        ];
        let dist = snap.dist[node.0];
        if dist.is_finite() {
            spans.push(Span::styled(format!("  dist={}", dist), muted));
        }
        if !snap.indegree.is_empty() && graph.is_directed() {
            spans.push(Span::styled(format!("  in={}", snap.indegree[node.0]), muted));
        }
        if snap.visited.contains(&node) {
            spans.push(Span::styled(
                "  visited",
                Style::default().fg(DEFAULT_THEME.success),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled("Edges", heading)));
    let arrow = if graph.is_directed() { "->" } else { "--" };
    for (i, e) in graph.edges().iter().enumerate() {
        let style = cell_style(highlights.edge_flashed(i), highlights.edges.contains(&i));
        let label = if graph.is_weighted() {
            format!(
                "  {} {} {} ({})",
                graph.name(e.from),
                arrow,
                graph.name(e.to),
                e.weight
            )
        } else {
            format!("  {} {} {}", graph.name(e.from), arrow, graph.name(e.to))
        };
        lines.push(Line::from(Span::styled(label, style)));
    }

    if !snap.agenda.is_empty() {
        let names: Vec<&str> = snap.agenda.iter().map(|&n| graph.name(n)).collect();
        lines.push(Line::from(vec![
            Span::styled("Agenda ", heading),
            Span::styled(format!("[{}]", names.join(", ")), Style::default().fg(DEFAULT_THEME.fg)),
        ]));
    }
    if !snap.result.is_empty() {
        let names: Vec<&str> = snap.result.iter().map(|&n| graph.name(n)).collect();
        lines.push(Line::from(vec![
            Span::styled("Order ", heading),
            Span::styled(
                names.join(" -> "),
                Style::default().fg(DEFAULT_THEME.success),
            ),
        ]));
    }
    if !snap.mst.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Tree weight ", heading),
            Span::styled(
                format!("{}", snap.mst_weight),
                Style::default().fg(DEFAULT_THEME.success),
            ),
        ]));
    }

    lines
}

fn list_lines<'a>(snap: &ListSnapshot, highlights: &HighlightState) -> Vec<Line<'a>> {
    let values = snap.list.values();
    if values.is_empty() {
        return vec![Line::from(Span::styled(
            "(empty list)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))];
    }
    let muted = Style::default().fg(DEFAULT_THEME.comment);
    let mut cells = vec![Span::raw(" ")];
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            cells.push(Span::styled(" -> ", muted));
        }
        let style = cell_style(highlights.index_flashed(i), highlights.index_marked(i));
        cells.push(Span::styled(format!("[{}]", value), style));
    }
    let mut lines = vec![Line::from(cells)];
    if let Some(cursor) = snap.cursor {
        lines.push(Line::from(Span::styled(
            format!(" cursor at position {}", cursor),
            muted,
        )));
    }
    lines
}

fn tree_lines<'a>(snap: &TreeSnapshot, highlights: &HighlightState) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    if let Some(root) = snap.tree.root() {
        sideways(&snap.tree, root, 0, highlights, &mut lines);
    } else {
        lines.push(Line::from(Span::styled(
            "(empty tree)",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    }
    if !snap.output.is_empty() {
        let keys: Vec<String> = snap.output.iter().map(|k| k.to_string()).collect();
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                "Output ",
                Style::default()
                    .fg(DEFAULT_THEME.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(keys.join(", "), Style::default().fg(DEFAULT_THEME.success)),
        ]));
    }
    lines
}

/// Right subtree above, left below, so the tree reads left-to-right.
fn sideways<'a>(
    tree: &Bst,
    idx: usize,
    depth: usize,
    highlights: &HighlightState,
    lines: &mut Vec<Line<'a>>,
) {
    let node = tree.node(idx);
    if let Some(right) = node.right {
        sideways(tree, right, depth + 1, highlights, lines);
    }
    let style = cell_style(
        highlights.key_flashed(node.key),
        highlights.keys.contains(&node.key),
    );
    lines.push(Line::from(vec![
        Span::raw("    ".repeat(depth)),
        Span::styled(node.key.to_string(), style),
    ]));
    if let Some(left) = node.left {
        sideways(tree, left, depth + 1, highlights, lines);
    }
}
