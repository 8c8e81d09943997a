//! Command palette component.
//!
//! The `:` prompt. It supports:
//! - Ranked fuzzy suggestions over top-level commands
//! - Sub-command mode once a parent command and a space are typed
//! - Tab completion, descending into sub-commands
//! - Keyboard navigation with wraparound

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};
use tracing::trace;

use crate::commands::{Command, CommandRegistry};
use crate::ui::components::TextInput;

/// Default cap on visible suggestions.
pub const MAX_SUGGESTIONS: usize = 10;

/// Actions returned from command palette input handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandPaletteAction {
    /// Execute this trimmed, lowercased command string.
    Execute(String),
    /// Close without executing.
    Cancel,
}

/// One entry in the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Full command name, e.g. "folder list".
    pub full_name: String,
    /// Name shown in the list (relative to the parent in sub-command mode).
    pub label: String,
    pub aliases: String,
    pub description: String,
    /// Whether completing this suggestion descends into sub-commands.
    pub has_sub_commands: bool,
}

impl Suggestion {
    fn new(cmd: &Command, parent: Option<&str>) -> Self {
        Self {
            full_name: match parent {
                Some(parent) => format!("{} {}", parent, cmd.name),
                None => cmd.name.clone(),
            },
            label: cmd.name.clone(),
            aliases: cmd.display_aliases(),
            description: cmd.description.clone(),
            has_sub_commands: cmd.has_sub_commands(),
        }
    }
}

/// Command palette component for quick command access.
pub struct CommandPalette {
    /// Command registry with all available commands.
    registry: Arc<CommandRegistry>,
    /// Text input for the command line.
    input: TextInput,
    /// Suggestions for the current input, best first.
    suggestions: Vec<Suggestion>,
    /// Currently selected suggestion index.
    selected: usize,
    /// Canonical parent name while in sub-command mode.
    parent: Option<String>,
    /// Suggestion list cap.
    max_suggestions: usize,
    /// Whether the palette is visible.
    visible: bool,
}

impl CommandPalette {
    /// Create a new command palette.
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self {
            registry,
            input: TextInput::new(),
            suggestions: Vec::new(),
            selected: 0,
            parent: None,
            max_suggestions: MAX_SUGGESTIONS,
            visible: false,
        }
    }

    /// Set the suggestion cap.
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max.max(1);
        self
    }

    /// Show the palette with an empty input.
    pub fn show(&mut self) {
        self.visible = true;
        self.input.clear();
        self.recompute();
    }

    /// Hide the palette and drop its suggestions.
    pub fn hide(&mut self) {
        self.visible = false;
        self.input.clear();
        self.suggestions.clear();
        self.parent = None;
        self.selected = 0;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The typed text.
    pub fn query(&self) -> &str {
        self.input.value()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Index of the highlighted suggestion.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Parent command while in sub-command mode.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Rebuild suggestions from the current input.
    fn recompute(&mut self) {
        let text = self.input.value().trim_start();

        let sub_mode = text
            .split_once(char::is_whitespace)
            .filter(|(head, _)| self.registry.has_sub_commands(head))
            .and_then(|(head, rest)| {
                let parent = self.registry.get(head)?.command.name.clone();
                Some((parent, rest.trim_start().to_string()))
            });

        self.suggestions = match sub_mode {
            Some((parent, query)) => {
                let suggestions = self
                    .registry
                    .search_sub_commands(&parent, &query)
                    .into_iter()
                    .map(|cmd| Suggestion::new(cmd, Some(&parent)))
                    .collect();
                self.parent = Some(parent);
                suggestions
            }
            None => {
                self.parent = None;
                self.registry
                    .search(text)
                    .into_iter()
                    .map(|cmd| Suggestion::new(cmd, None))
                    .collect()
            }
        };
        self.suggestions.truncate(self.max_suggestions);
        self.selected = 0;
        trace!(
            query = %self.input.value(),
            parent = ?self.parent,
            count = self.suggestions.len(),
            "Palette suggestions"
        );
    }

    fn select_next(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected = (self.selected + 1) % self.suggestions.len();
        }
    }

    fn select_prev(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.suggestions.len() - 1);
        }
    }

    /// Complete the input to the highlighted suggestion.
    fn complete(&mut self) {
        let Some(suggestion) = self.suggestions.get(self.selected) else {
            return;
        };
        let mut text = suggestion.full_name.clone();
        if suggestion.has_sub_commands {
            text.push(' ');
        }
        self.input.set_value(text);
        self.recompute();
    }

    /// Handle keyboard input.
    ///
    /// Returns an action when the palette should close.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<CommandPaletteAction> {
        if !self.visible {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.hide();
                Some(CommandPaletteAction::Cancel)
            }
            (KeyCode::Backspace, _) if self.input.is_empty() => {
                self.hide();
                Some(CommandPaletteAction::Cancel)
            }
            (KeyCode::Enter, _) => {
                let typed = self.input.value().trim().to_lowercase();
                let command = if !typed.is_empty() {
                    typed
                } else {
                    self.suggestions.get(self.selected)?.full_name.clone()
                };
                self.hide();
                Some(CommandPaletteAction::Execute(command))
            }
            (KeyCode::Tab, _) => {
                self.complete();
                None
            }
            (KeyCode::Down, _)
            | (KeyCode::Char('n'), KeyModifiers::CONTROL)
            | (KeyCode::Char('j'), KeyModifiers::CONTROL) => {
                self.select_next();
                None
            }
            (KeyCode::Up, _)
            | (KeyCode::BackTab, _)
            | (KeyCode::Char('p'), KeyModifiers::CONTROL)
            | (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                self.select_prev();
                None
            }
            _ => {
                if self.input.handle_input(key) {
                    self.recompute();
                }
                None
            }
        }
    }

    /// Render the suggestion box above the bottom line and the prompt on it.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible || area.height < 2 {
            return;
        }

        let prompt_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        frame.render_widget(Clear, prompt_area);
        self.input.render_inline(frame, prompt_area, ":");

        if self.suggestions.is_empty() {
            return;
        }

        let height = (self.suggestions.len() as u16 + 2).min(area.height - 1);
        let width = 64.min(area.width);
        let list_area = Rect::new(area.x, prompt_area.y - height, width, height);
        frame.render_widget(Clear, list_area);

        let title = match &self.parent {
            Some(parent) => format!(" {} ", parent),
            None => " Commands ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title);

        let items: Vec<ListItem> = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(idx, s)| self.render_suggestion(s, idx == self.selected))
            .collect();
        frame.render_widget(List::new(items).block(block), list_area);
    }

    fn render_suggestion<'a>(&self, s: &'a Suggestion, selected: bool) -> ListItem<'a> {
        let base = if selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::styled(if selected { "> " } else { "  " }, Style::default().fg(Color::Cyan)),
            Span::styled(format!("{:<12}", s.label), base.add_modifier(Modifier::BOLD)),
        ];
        if s.has_sub_commands {
            spans.push(Span::styled("… ", Style::default().fg(Color::Yellow)));
        }
        spans.push(Span::styled(s.description.as_str(), base.fg(Color::Gray)));
        if !s.aliases.is_empty() {
            spans.push(Span::styled(
                format!("  ({})", s.aliases),
                Style::default().fg(Color::DarkGray),
            ));
        }
        ListItem::new(Line::from(spans))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> CommandPalette {
        let registry = Arc::new(CommandRegistry::with_defaults().unwrap());
        let mut palette = CommandPalette::new(registry);
        palette.show();
        palette
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(palette: &mut CommandPalette, text: &str) {
        for c in text.chars() {
            assert_eq!(palette.handle_input(key(KeyCode::Char(c))), None);
        }
    }

    fn labels(palette: &CommandPalette) -> Vec<&str> {
        palette.suggestions().iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn test_show_lists_top_level_capped() {
        let palette = palette();
        assert!(palette.is_visible());
        assert_eq!(palette.suggestions().len(), MAX_SUGGESTIONS);
        assert_eq!(palette.suggestions()[0].full_name, "archive");
        assert!(palette.parent().is_none());
    }

    #[test]
    fn test_custom_cap() {
        let registry = Arc::new(CommandRegistry::with_defaults().unwrap());
        let mut palette = CommandPalette::new(registry).with_max_suggestions(3);
        palette.show();
        assert_eq!(palette.suggestions().len(), 3);
    }

    #[test]
    fn test_trailing_space_enters_sub_command_mode() {
        let mut palette = palette();
        type_str(&mut palette, "folder ");

        assert_eq!(palette.parent(), Some("folder"));
        assert_eq!(labels(&palette), vec!["list", "create", "delete"]);
        assert_eq!(palette.suggestions()[0].full_name, "folder list");
    }

    #[test]
    fn test_sub_command_query() {
        let mut palette = palette();
        type_str(&mut palette, "webhook te");
        assert_eq!(palette.parent(), Some("webhook"));
        assert_eq!(labels(&palette)[0], "test");
    }

    #[test]
    fn test_parent_without_space_is_top_level() {
        let mut palette = palette();
        type_str(&mut palette, "folder");
        assert!(palette.parent().is_none());
        assert_eq!(labels(&palette)[0], "folder");
    }

    #[test]
    fn test_leaf_with_space_stays_top_level() {
        let mut palette = palette();
        type_str(&mut palette, "messages x");
        assert!(palette.parent().is_none());
    }

    #[test]
    fn test_selection_resets_on_change() {
        let mut palette = palette();
        palette.handle_input(key(KeyCode::Down));
        palette.handle_input(key(KeyCode::Down));
        assert_eq!(palette.selected(), 2);

        type_str(&mut palette, "e");
        assert_eq!(palette.selected(), 0);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut palette = palette();
        type_str(&mut palette, "folder ");

        palette.handle_input(key(KeyCode::Up));
        assert_eq!(palette.selected(), 2);
        palette.handle_input(ctrl('n'));
        assert_eq!(palette.selected(), 0);
        palette.handle_input(ctrl('k'));
        assert_eq!(palette.selected(), 2);
        palette.handle_input(ctrl('j'));
        palette.handle_input(ctrl('p'));
        assert_eq!(palette.selected(), 2);
        palette.handle_input(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(palette.selected(), 1);
    }

    #[test]
    fn test_tab_completes_into_sub_commands() {
        let mut palette = palette();
        type_str(&mut palette, "fold");
        palette.handle_input(key(KeyCode::Tab));

        assert_eq!(palette.query(), "folder ");
        assert_eq!(palette.parent(), Some("folder"));
        assert_eq!(palette.suggestions().len(), 3);
    }

    #[test]
    fn test_tab_completes_sub_command_full_name() {
        let mut palette = palette();
        type_str(&mut palette, "event ed");
        palette.handle_input(key(KeyCode::Tab));
        assert_eq!(palette.query(), "event edit");
    }

    #[test]
    fn test_tab_completes_leaf_without_space() {
        let mut palette = palette();
        type_str(&mut palette, "compo");
        palette.handle_input(key(KeyCode::Tab));
        assert_eq!(palette.query(), "compose");
    }

    #[test]
    fn test_enter_executes_typed_text() {
        let mut palette = palette();
        type_str(&mut palette, "  MSG ");
        assert_eq!(
            palette.handle_input(key(KeyCode::Enter)),
            Some(CommandPaletteAction::Execute("msg".to_string()))
        );
        assert!(!palette.is_visible());
    }

    #[test]
    fn test_enter_executes_row_number() {
        let mut palette = palette();
        type_str(&mut palette, "12");
        assert_eq!(
            palette.handle_input(key(KeyCode::Enter)),
            Some(CommandPaletteAction::Execute("12".to_string()))
        );
    }

    #[test]
    fn test_enter_on_empty_input_uses_highlight() {
        let mut palette = palette();
        palette.handle_input(key(KeyCode::Down));
        let expected = palette.suggestions()[1].full_name.clone();
        assert_eq!(
            palette.handle_input(key(KeyCode::Enter)),
            Some(CommandPaletteAction::Execute(expected))
        );
    }

    #[test]
    fn test_enter_with_nothing_is_noop() {
        let mut palette = CommandPalette::new(Arc::new(CommandRegistry::new()));
        palette.show();
        assert!(palette.suggestions().is_empty());
        assert_eq!(palette.handle_input(key(KeyCode::Enter)), None);
        assert!(palette.is_visible());
    }

    #[test]
    fn test_escape_cancels() {
        let mut palette = palette();
        type_str(&mut palette, "mess");
        assert_eq!(
            palette.handle_input(key(KeyCode::Esc)),
            Some(CommandPaletteAction::Cancel)
        );
        assert!(!palette.is_visible());
        assert!(palette.suggestions().is_empty());
    }

    #[test]
    fn test_backspace_on_empty_cancels() {
        let mut palette = palette();
        type_str(&mut palette, "m");
        assert_eq!(palette.handle_input(key(KeyCode::Backspace)), None);
        assert!(palette.is_visible());
        assert_eq!(
            palette.handle_input(key(KeyCode::Backspace)),
            Some(CommandPaletteAction::Cancel)
        );
    }

    #[test]
    fn test_ctrl_u_clears_input() {
        let mut palette = palette();
        type_str(&mut palette, "folder ");
        palette.handle_input(ctrl('u'));
        assert_eq!(palette.query(), "");
        assert!(palette.parent().is_none());
    }

    #[test]
    fn test_hidden_palette_ignores_input() {
        let registry = Arc::new(CommandRegistry::with_defaults().unwrap());
        let mut palette = CommandPalette::new(registry);
        assert_eq!(palette.handle_input(key(KeyCode::Esc)), None);
    }
}
