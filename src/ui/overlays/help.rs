//! Help overlay.
//!
//! Lists every command grouped by category, sub-commands under their
//! parent. `/` narrows the list with the same ranking the palette uses and
//! Enter runs the highlighted command.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{centered, Overlay, OverlayOutcome};
use crate::commands::{best_score, CommandCategory, CommandRegistry};
use crate::ui::components::TextInput;
use crate::ui::theme::theme;

/// One listed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub category: CommandCategory,
    /// Full name, e.g. "folder list".
    pub full_name: String,
    /// Name shown in the list; children are indented.
    pub label: String,
    pub aliases: String,
    pub shortcut: Option<String>,
    pub description: String,
    /// Every name the entry answers to, for search.
    names: Vec<String>,
}

pub struct HelpOverlay {
    entries: Vec<HelpEntry>,
    /// Indices into `entries` passing the search.
    visible: Vec<usize>,
    selected: usize,
    search: TextInput,
    searching: bool,
}

impl HelpOverlay {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        let mut entries = Vec::new();
        for group in registry.by_category() {
            for cmd in group.commands {
                entries.push(HelpEntry {
                    category: group.category,
                    full_name: cmd.name.clone(),
                    label: cmd.name.clone(),
                    aliases: cmd.display_aliases(),
                    shortcut: cmd.shortcut.clone(),
                    description: cmd.description.clone(),
                    names: cmd.all_names().map(str::to_string).collect(),
                });
                for child in &cmd.sub_commands {
                    let full_name = format!("{} {}", cmd.name, child.name);
                    let mut names: Vec<String> = child.all_names().map(str::to_string).collect();
                    names.push(full_name.clone());
                    entries.push(HelpEntry {
                        category: group.category,
                        label: format!("  {}", child.name),
                        full_name,
                        aliases: child.display_aliases(),
                        shortcut: child.shortcut.clone(),
                        description: child.description.clone(),
                        names,
                    });
                }
            }
        }
        let visible = (0..entries.len()).collect();
        Self {
            entries,
            visible,
            selected: 0,
            search: TextInput::new(),
            searching: false,
        }
    }

    /// Entries passing the current search, in display order.
    pub fn visible(&self) -> impl Iterator<Item = &HelpEntry> {
        self.visible.iter().map(move |&i| &self.entries[i])
    }

    pub fn selected_entry(&self) -> Option<&HelpEntry> {
        self.visible.get(self.selected).map(|&i| &self.entries[i])
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    fn apply_search(&mut self) {
        let query = self.search.value().trim().to_lowercase();
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                query.is_empty() || best_score(e.names.iter().map(String::as_str), &query).is_some()
            })
            .map(|(i, _)| i)
            .collect();
        self.selected = 0;
    }

    fn move_by(&mut self, down: bool) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        self.selected = if down {
            (self.selected + 1).min(last)
        } else {
            self.selected.saturating_sub(1)
        };
    }
}

impl Overlay for HelpOverlay {
    fn title(&self) -> &str {
        "Help"
    }

    fn handle_key(&mut self, key: KeyEvent) -> OverlayOutcome {
        if self.searching {
            match key.code {
                KeyCode::Enter => self.searching = false,
                KeyCode::Down => self.move_by(true),
                KeyCode::Up => self.move_by(false),
                _ => {
                    if self.search.handle_input(key) {
                        self.apply_search();
                    }
                }
            }
            return OverlayOutcome::Handled;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('?') => OverlayOutcome::Close,
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_by(true);
                OverlayOutcome::Handled
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_by(false);
                OverlayOutcome::Handled
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.visible.len().saturating_sub(1);
                OverlayOutcome::Handled
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected = 0;
                OverlayOutcome::Handled
            }
            KeyCode::Char('/') => {
                self.searching = true;
                OverlayOutcome::Handled
            }
            KeyCode::Enter => match self.selected_entry() {
                Some(entry) => OverlayOutcome::Execute(entry.full_name.clone()),
                None => OverlayOutcome::Handled,
            },
            _ => OverlayOutcome::Handled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let rect = centered(area, 84, area.height.saturating_sub(4));
        frame.render_widget(Clear, rect);

        let block = Block::default()
            .title(" Commands ")
            .borders(Borders::ALL)
            .border_style(t.border());
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [list_area, search_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let mut lines = Vec::new();
        let mut selected_line = 0usize;
        let mut current: Option<CommandCategory> = None;
        for (pos, entry) in self.visible().enumerate() {
            if current != Some(entry.category) {
                if current.is_some() {
                    lines.push(Line::from(""));
                }
                lines.push(Line::from(Span::styled(entry.category.display(), t.header())));
                current = Some(entry.category);
            }
            if pos == self.selected {
                selected_line = lines.len();
            }
            let style = if pos == self.selected {
                t.selected()
            } else {
                Style::default()
            };
            let mut spans = vec![
                Span::styled(format!("  {:<16}", entry.label), style.fg(t.accent)),
                Span::styled(format!("{:<14}", entry.aliases), t.dim()),
                Span::styled(entry.description.clone(), style),
            ];
            if let Some(shortcut) = &entry.shortcut {
                spans.push(Span::styled(format!("  [{}]", shortcut), t.dim()));
            }
            lines.push(Line::from(spans));
        }

        let height = list_area.height as usize;
        let offset = selected_line.saturating_sub(height.saturating_sub(1));
        frame.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), list_area);

        if self.searching || !self.search.is_empty() {
            self.search.render_inline(frame, search_area, "/");
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "[j/k] move  [Enter] run  [/] search  [q] close",
                    t.dim(),
                )),
                search_area,
            );
        }
    }
}
