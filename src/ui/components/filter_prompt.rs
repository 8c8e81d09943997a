//! The `/` filter prompt.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, widgets::Clear, Frame};

use super::TextInput;

/// Outcome of a key press in the filter prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// Apply this filter text (may be empty to clear the filter).
    Submit(String),
    /// Close without changing the filter.
    Cancel,
}

/// Single-line prompt for filtering the active view.
#[derive(Debug, Default)]
pub struct FilterPrompt {
    input: TextInput,
    visible: bool,
}

impl FilterPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the prompt, prefilled with the view's current filter.
    pub fn show(&mut self, current: &str) {
        self.input.set_value(current);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.input.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<FilterAction> {
        if !self.visible {
            return None;
        }
        match key.code {
            KeyCode::Enter => {
                let text = self.input.value().trim().to_string();
                self.hide();
                Some(FilterAction::Submit(text))
            }
            KeyCode::Esc => {
                self.hide();
                Some(FilterAction::Cancel)
            }
            _ => {
                self.input.handle_input(key);
                None
            }
        }
    }

    /// Render on the given single-line area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }
        frame.render_widget(Clear, area);
        self.input.render_inline(frame, area, "/");
    }
}
