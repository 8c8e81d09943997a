//! Dashboard: the landing view, a menu of every resource view.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::{KeyResult, ResourceView};
use crate::events::{is_plain_char, Scroll};
use crate::source::{LoadRequest, ResourceKind, Row};
use crate::ui::components::KeyHint;
use crate::ui::theme::theme;

const HINTS: [KeyHint; 2] = [KeyHint::new("j/k", "move"), KeyHint::new("Enter", "open")];

pub struct DashboardView {
    entries: Vec<ResourceKind>,
    selected: usize,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            entries: ResourceKind::ALL.to_vec(),
            selected: 0,
        }
    }

    pub fn selected(&self) -> Option<ResourceKind> {
        self.entries.get(self.selected).copied()
    }

    fn last(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceView for DashboardView {
    fn name(&self) -> &str {
        "dashboard"
    }

    fn title(&self) -> String {
        "Dashboard".to_string()
    }

    fn hints(&self) -> Vec<KeyHint> {
        HINTS.to_vec()
    }

    fn load(&mut self) -> Option<LoadRequest> {
        None
    }

    fn refresh(&mut self) -> Option<LoadRequest> {
        None
    }

    fn apply_rows(&mut self, _rows: Result<Vec<Row>, String>) {}

    fn filter(&mut self, _query: &str) {}

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Down => self.selected = (self.selected + 1).min(self.last()),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Char('j') if is_plain_char(&key, 'j') => {
                self.selected = (self.selected + 1).min(self.last())
            }
            KeyCode::Char('k') if is_plain_char(&key, 'k') => {
                self.selected = self.selected.saturating_sub(1)
            }
            KeyCode::Char('q') if is_plain_char(&key, 'q') => {
                return KeyResult::Execute("quit".to_string())
            }
            KeyCode::Enter => {
                return match self.selected() {
                    Some(kind) => KeyResult::Execute(kind.name().to_string()),
                    None => KeyResult::Handled,
                }
            }
            _ => return KeyResult::Ignored,
        }
        KeyResult::Handled
    }

    fn scroll(&mut self, scroll: Scroll) {
        match scroll {
            Scroll::HalfPageDown | Scroll::PageDown => self.go_to_bottom(),
            Scroll::HalfPageUp | Scroll::PageUp => self.go_to_top(),
        }
    }

    fn go_to_row(&mut self, row: usize) {
        self.selected = row.max(1).min(self.entries.len()).saturating_sub(1);
    }

    fn go_to_top(&mut self) {
        self.selected = 0;
    }

    fn go_to_bottom(&mut self) {
        self.selected = self.last();
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|kind| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("  {:<12}", kind.title()), Style::default().fg(t.accent)),
                    Span::styled(format!(":{}", kind.name()), t.dim()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Dashboard ")
                    .borders(Borders::ALL)
                    .border_style(t.border()),
            )
            .highlight_style(t.selected());
        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
