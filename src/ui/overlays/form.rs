//! Free-text form for compose, create and edit.
//!
//! Every printable key goes into the focused field, which is why the
//! dispatcher forwards keys to overlays unmodified.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{centered, Overlay, OverlayOutcome};
use crate::source::ActionRequest;
use crate::ui::components::TextInput;
use crate::ui::theme::theme;

/// A labelled list of text fields that submits as an [`ActionRequest`].
pub struct FormOverlay {
    title: String,
    fields: Vec<(String, TextInput)>,
    focus: usize,
    /// Sent with the field values filled in.
    request: ActionRequest,
}

impl FormOverlay {
    pub fn new(title: impl Into<String>, request: ActionRequest) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            focus: 0,
            request,
        }
    }

    /// Add a field with an initial value.
    pub fn field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((label.into(), TextInput::with_value(value)));
        self
    }

    /// Current `(label, value)` pairs.
    pub fn values(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(label, input)| (label.clone(), input.value().trim().to_string()))
            .collect()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    fn submit(&self) -> OverlayOutcome {
        OverlayOutcome::Remote(self.request.clone().with_fields(self.values()))
    }

    fn next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    fn prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = self.focus.checked_sub(1).unwrap_or(self.fields.len() - 1);
        }
    }
}

impl Overlay for FormOverlay {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyEvent) -> OverlayOutcome {
        match (key.code, key.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => self.submit(),
            (KeyCode::Enter, _) if self.focus + 1 >= self.fields.len() => self.submit(),
            (KeyCode::Enter, _) | (KeyCode::Tab, _) | (KeyCode::Down, _) => {
                self.next();
                OverlayOutcome::Handled
            }
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => {
                self.prev();
                OverlayOutcome::Handled
            }
            _ => {
                if let Some((_, input)) = self.fields.get_mut(self.focus) {
                    input.handle_input(key);
                }
                OverlayOutcome::Handled
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let height = self.fields.len() as u16 * 3 + 3;
        let rect = centered(area, 64, height);
        frame.render_widget(Clear, rect);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(t.border());
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let mut constraints = vec![Constraint::Length(3); self.fields.len()];
        constraints.push(Constraint::Length(1));
        let chunks = Layout::vertical(constraints).split(inner);

        for (i, (label, input)) in self.fields.iter().enumerate() {
            input.render_with_label(frame, chunks[i], label, i == self.focus);
        }
        if let Some(footer) = chunks.last() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "[Tab] next  [Enter] next/submit  [Ctrl+S] submit  [Esc] cancel",
                    t.dim(),
                )),
                *footer,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ResourceKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn form() -> FormOverlay {
        FormOverlay::new("New event", ActionRequest::new(ResourceKind::Events, "new"))
            .field("Title", "")
            .field("When", "")
    }

    fn type_str(form: &mut FormOverlay, text: &str) {
        for c in text.chars() {
            assert_eq!(form.handle_key(key(KeyCode::Char(c))), OverlayOutcome::Handled);
        }
    }

    #[test]
    fn test_free_text_entry_including_command_keys() {
        let mut form = form();
        type_str(&mut form, "q: /?gg dd");
        assert_eq!(form.values()[0].1, "q: /?gg dd");
    }

    #[test]
    fn test_tab_moves_focus_and_wraps() {
        let mut form = form();
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), 1);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), 0);
        form.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(form.focus(), 1);
    }

    #[test]
    fn test_enter_on_last_field_submits() {
        let mut form = form();
        type_str(&mut form, "Retro");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), OverlayOutcome::Handled);
        type_str(&mut form, "Fri");

        match form.handle_key(key(KeyCode::Enter)) {
            OverlayOutcome::Remote(request) => {
                assert_eq!(request.action, "new");
                assert_eq!(request.field("Title"), Some("Retro"));
                assert_eq!(request.field("When"), Some("Fri"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_ctrl_s_submits_from_any_field() {
        let mut form = form();
        let outcome = form.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(matches!(outcome, OverlayOutcome::Remote(_)));
    }
}
