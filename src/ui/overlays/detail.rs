//! Read-only detail pane for the selected row.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{centered, Overlay, OverlayOutcome};
use crate::ui::theme::theme;

/// Label/value pairs in a scrollable box.
pub struct DetailOverlay {
    title: String,
    fields: Vec<(String, String)>,
    scroll: u16,
}

impl DetailOverlay {
    pub fn new(title: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self {
            title: title.into(),
            fields,
            scroll: 0,
        }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

impl Overlay for DetailOverlay {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyEvent) -> OverlayOutcome {
        match key.code {
            KeyCode::Char('q') | KeyCode::Enter => OverlayOutcome::Close,
            KeyCode::Char('j') | KeyCode::Down => {
                let max = self.fields.len().saturating_sub(1) as u16;
                self.scroll = (self.scroll + 1).min(max);
                OverlayOutcome::Handled
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                OverlayOutcome::Handled
            }
            _ => OverlayOutcome::Handled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let height = (self.fields.len() as u16).saturating_add(2).max(5);
        let rect = centered(area, 70, height);
        frame.render_widget(Clear, rect);

        let width = self.fields.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        let lines: Vec<Line> = self
            .fields
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{:>width$}: ", label, width = width), t.header()),
                    Span::raw(value.as_str()),
                ])
            })
            .collect();

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(t.border());
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut overlay = DetailOverlay::new(
            "Contact",
            vec![("Name".into(), "Alice".into()), ("Email".into(), "a@x".into())],
        );
        overlay.handle_key(key(KeyCode::Char('k')));
        assert_eq!(overlay.scroll, 0);
        overlay.handle_key(key(KeyCode::Char('j')));
        overlay.handle_key(key(KeyCode::Char('j')));
        assert_eq!(overlay.scroll, 1);
    }

    #[test]
    fn test_close_keys() {
        let mut overlay = DetailOverlay::new("Event", Vec::new());
        assert_eq!(overlay.title(), "Event");
        assert_eq!(overlay.handle_key(key(KeyCode::Enter)), OverlayOutcome::Close);
        assert_eq!(overlay.handle_key(key(KeyCode::Char('q'))), OverlayOutcome::Close);
    }
}
