//! Contextual help bar component.
//!
//! Displays the active view's keyboard hints at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// A key and what it does, for footer display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub description: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, description: &'static str) -> Self {
        Self { key, description }
    }
}

/// Hints shown in every Normal-mode footer after the view's own.
pub const GLOBAL_HINTS: [KeyHint; 3] = [
    KeyHint::new(":", "command"),
    KeyHint::new("/", "filter"),
    KeyHint::new("?", "help"),
];

/// Render hints as a single line.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[KeyHint]) {
    let line = Line::from(hint_spans(hints));
    frame.render_widget(Paragraph::new(line), area);
}

/// Styled spans: keys highlighted, descriptions dimmed.
fn hint_spans(hints: &[KeyHint]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, hint) in hints.iter().enumerate() {
        let sep = if i == 0 { "" } else { "  " };
        spans.push(Span::styled(
            format!("{}[{}]", sep, hint.key),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}", hint.description),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans
}
