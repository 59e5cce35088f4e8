//! Pseudocode pane rendering
//!
//! Displays the algorithm's pseudocode listing with basic syntax
//! highlighting and an arrow on the line the current step maps to.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for the Rust-flavored listings
fn highlight_line(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '/' && i + 1 < chars.len() && chars[i + 1] == '/' {
            if !current_word.is_empty() {
                spans.push(styled_word(&current_word, false));
                current_word.clear();
            }
            spans.push(Span::styled(
                line[i..].to_string(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                spans.push(styled_word(&current_word, c == '('));
                current_word.clear();
            }
            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        spans.push(styled_word(&current_word, false));
    }

    Line::from(spans)
}

fn styled_word(word: &str, is_function: bool) -> Span<'static> {
    let style = match word {
        "fn" | "let" | "mut" | "loop" | "while" | "for" | "in" | "if" | "else" | "match"
        | "return" | "break" | "continue" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "Some" | "None" | "Zero" | "One" | "Two" | "INFINITY" => {
            Style::default().fg(DEFAULT_THEME.type_name)
        }
        _ if word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ if is_function => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    };
    Span::styled(word.to_string(), style)
}

/// Render the pseudocode pane. `current_line` is the 0-based line of the
/// current step, if it maps to one.
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    code: &[&str],
    current_line: Option<usize>,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<Line> = code
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let is_current = current_line == Some(idx);
            let marker = if is_current { "→ " } else { "  " };
            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = highlight_line(text);
            if is_current {
                for span in &mut content.spans {
                    span.style = span
                        .style
                        .patch(Style::default().bg(DEFAULT_THEME.current_line_bg));
                }
            }

            let mut spans = vec![Span::styled(format!("{}{:3} ", marker, idx + 1), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
