//! Key dispatch state machine.
//!
//! Every key is checked in priority order: command palette, filter prompt,
//! active overlay, global Normal-mode keys, chords, then the active view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};
use tracing::{debug, trace};

use super::{ChordTracker, InputMode};
use crate::commands::CommandRegistry;
use crate::events::{is_hard_quit, is_plain_char, key_label, scroll_for};
use crate::navigation::Workspace;
use crate::source::{ActionRequest, LoadRequest};
use crate::ui::components::{
    CommandPalette, CommandPaletteAction, FilterAction, FilterPrompt, MAX_SUGGESTIONS,
};
use crate::ui::overlays::OverlayOutcome;
use crate::ui::views::KeyResult;

/// What the application should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Quit,
    /// Run a command string.
    Execute(String),
    /// Load rows for the named view.
    Load(String, LoadRequest),
    /// Send a request on behalf of the named view.
    Remote(String, ActionRequest),
}

pub struct KeyDispatcher {
    mode: InputMode,
    chords: ChordTracker,
    palette: CommandPalette,
    filter: FilterPrompt,
}

impl KeyDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self::with_settings(registry, super::CHORD_WINDOW, MAX_SUGGESTIONS)
    }

    pub fn with_settings(
        registry: Arc<CommandRegistry>,
        chord_window: Duration,
        max_suggestions: usize,
    ) -> Self {
        Self {
            mode: InputMode::Normal,
            chords: ChordTracker::new(chord_window),
            palette: CommandPalette::new(registry).with_max_suggestions(max_suggestions),
            filter: FilterPrompt::new(),
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    pub fn filter_prompt(&self) -> &FilterPrompt {
        &self.filter
    }

    /// Pending chord key, for the header.
    pub fn pending_chord(&self) -> Option<char> {
        self.chords.pending()
    }

    /// Handle one key press.
    pub fn dispatch(&mut self, key: KeyEvent, now: Instant, ws: &mut Workspace) -> Option<Effect> {
        trace!(key = %key_label(&key), mode = self.mode.label(), "Key");
        match self.mode {
            InputMode::Command => self.dispatch_command(key),
            InputMode::Filter => self.dispatch_filter(key, ws),
            InputMode::Normal if ws.is_overlay_active() => Self::dispatch_overlay(key, ws),
            InputMode::Normal => self.dispatch_normal(key, now, ws),
        }
    }

    fn dispatch_command(&mut self, key: KeyEvent) -> Option<Effect> {
        match self.palette.handle_input(key)? {
            CommandPaletteAction::Execute(command) => {
                self.mode = InputMode::Normal;
                debug!(command = %command, "Palette execute");
                Some(Effect::Execute(command))
            }
            CommandPaletteAction::Cancel => {
                self.mode = InputMode::Normal;
                None
            }
        }
    }

    fn dispatch_filter(&mut self, key: KeyEvent, ws: &mut Workspace) -> Option<Effect> {
        match self.filter.handle_input(key)? {
            FilterAction::Submit(query) => {
                self.mode = InputMode::Normal;
                let name = ws.active_view_name()?.to_string();
                let view = ws.active_view_mut()?;
                debug!(view = %name, query = %query, "Filter applied");
                view.filter(&query);
                view.refresh().map(|request| Effect::Load(name, request))
            }
            FilterAction::Cancel => {
                self.mode = InputMode::Normal;
                None
            }
        }
    }

    fn dispatch_overlay(key: KeyEvent, ws: &mut Workspace) -> Option<Effect> {
        if is_hard_quit(&key) {
            return Some(Effect::Quit);
        }
        if key.code == KeyCode::Esc {
            ws.pop();
            return None;
        }

        let outcome = ws.top_overlay_mut()?.handle_key(key);
        match outcome {
            OverlayOutcome::Handled => None,
            OverlayOutcome::Close => {
                ws.pop();
                None
            }
            OverlayOutcome::Execute(command) => {
                ws.pop();
                Some(Effect::Execute(command))
            }
            OverlayOutcome::Remote(request) => {
                ws.pop();
                let name = ws.active_view_name()?.to_string();
                Some(Effect::Remote(name, request))
            }
        }
    }

    fn dispatch_normal(&mut self, key: KeyEvent, now: Instant, ws: &mut Workspace) -> Option<Effect> {
        if is_hard_quit(&key) {
            return Some(Effect::Quit);
        }

        for chord in ['g', 'd'] {
            if is_plain_char(&key, chord) {
                if !self.chords.press(chord, now) {
                    return None;
                }
                debug!(chord = %format!("{0}{0}", chord), "Chord");
                return match chord {
                    'g' => {
                        ws.active_view_mut()?.go_to_top();
                        None
                    }
                    _ => Some(Effect::Execute("delete".to_string())),
                };
            }
        }
        self.chords.clear();

        if let Some(scroll) = scroll_for(&key) {
            ws.active_view_mut()?.scroll(scroll);
            return None;
        }

        if key.code == KeyCode::Esc {
            let handled = ws
                .active_view_mut()
                .map(|view| view.handle_key(key).is_handled())
                .unwrap_or(false);
            if !handled && ws.depth() > 1 {
                ws.pop();
            }
            return None;
        }

        if is_plain_char(&key, ':') {
            self.mode = InputMode::Command;
            self.palette.show();
            return None;
        }
        if is_plain_char(&key, '/') {
            let current = ws
                .active_view_mut()
                .map(|view| view.filter_query().to_string())
                .unwrap_or_default();
            self.mode = InputMode::Filter;
            self.filter.show(&current);
            return None;
        }
        if is_plain_char(&key, '?') {
            return Some(Effect::Execute("help".to_string()));
        }

        match ws.active_view_mut()?.handle_key(key) {
            KeyResult::Handled | KeyResult::Ignored => None,
            KeyResult::Open(name, overlay) => {
                ws.push_overlay(name, overlay);
                None
            }
            KeyResult::Execute(command) => Some(Effect::Execute(command)),
        }
    }

    /// Draw the palette or filter prompt. `area` is the full frame; the
    /// prompt goes on its last line.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self.mode {
            InputMode::Command => self.palette.render(frame, area),
            InputMode::Filter if area.height > 0 => {
                let line = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
                self.filter.render(frame, line);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ResourceKind, Row};
    use crossterm::event::KeyModifiers;

    fn dispatcher() -> KeyDispatcher {
        let registry = CommandRegistry::with_defaults().expect("default commands register");
        KeyDispatcher::new(Arc::new(registry))
    }

    /// Dashboard with the contacts view on top, loaded with three rows.
    fn workspace() -> Workspace {
        let mut ws = Workspace::new();
        ws.navigate_to("dashboard").unwrap();
        ws.navigate_to("contacts").unwrap();
        ws.view_mut("contacts").unwrap().apply_rows(Ok(vec![
            Row::new("ct-1", &["Alice Martin", "alice@example.com", "Acme"]),
            Row::new("ct-2", &["Bob Chen", "bob@example.com", "Globex"]),
            Row::new("ct-3", &["Carol Diaz", "carol@example.com", "Acme"]),
        ]));
        ws
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn send(d: &mut KeyDispatcher, ws: &mut Workspace, text: &str, now: Instant) {
        for c in text.chars() {
            d.dispatch(key(KeyCode::Char(c)), now, ws);
        }
    }

    fn open_title(d: &mut KeyDispatcher, ws: &mut Workspace) -> Option<String> {
        d.dispatch(key(KeyCode::Enter), Instant::now(), ws);
        ws.top_overlay_mut().map(|o| o.title().to_string())
    }

    #[test]
    fn test_colon_opens_palette_and_enter_executes() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        d.dispatch(key(KeyCode::Char(':')), now, &mut ws);
        assert_eq!(d.mode(), InputMode::Command);
        assert!(d.palette().is_visible());

        send(&mut d, &mut ws, "ev", now);
        let effect = d.dispatch(key(KeyCode::Enter), now, &mut ws);
        assert_eq!(effect, Some(Effect::Execute("ev".to_string())));
        assert_eq!(d.mode(), InputMode::Normal);
    }

    #[test]
    fn test_palette_escape_returns_to_normal() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        d.dispatch(key(KeyCode::Char(':')), now, &mut ws);
        assert_eq!(d.dispatch(key(KeyCode::Esc), now, &mut ws), None);
        assert_eq!(d.mode(), InputMode::Normal);
        assert_eq!(ws.depth(), 2);
    }

    #[test]
    fn test_command_mode_captures_quit_keys() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        d.dispatch(key(KeyCode::Char(':')), now, &mut ws);
        assert_eq!(d.dispatch(key(KeyCode::Char('q')), now, &mut ws), None);
        assert_eq!(d.palette().query(), "q");
    }

    #[test]
    fn test_filter_applies_and_refreshes() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        d.dispatch(key(KeyCode::Char('/')), now, &mut ws);
        assert_eq!(d.mode(), InputMode::Filter);
        send(&mut d, &mut ws, "acme", now);

        let effect = d.dispatch(key(KeyCode::Enter), now, &mut ws);
        assert_eq!(
            effect,
            Some(Effect::Load(
                "contacts".to_string(),
                LoadRequest::new(ResourceKind::Contacts)
            ))
        );
        assert_eq!(d.mode(), InputMode::Normal);
        assert_eq!(ws.active_view_mut().unwrap().filter_query(), "acme");
    }

    #[test]
    fn test_filter_escape_cancels() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        d.dispatch(key(KeyCode::Char('/')), now, &mut ws);
        send(&mut d, &mut ws, "bob", now);
        assert_eq!(d.dispatch(key(KeyCode::Esc), now, &mut ws), None);
        assert_eq!(d.mode(), InputMode::Normal);
        assert_eq!(ws.active_view_mut().unwrap().filter_query(), "");
    }

    #[test]
    fn test_ctrl_c_quits_in_normal_and_overlay() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        assert_eq!(d.dispatch(ctrl('c'), now, &mut ws), Some(Effect::Quit));

        d.dispatch(key(KeyCode::Enter), now, &mut ws);
        assert!(ws.is_overlay_active());
        assert_eq!(d.dispatch(ctrl('c'), now, &mut ws), Some(Effect::Quit));
    }

    #[test]
    fn test_escape_pops_exactly_one_overlay() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        d.dispatch(key(KeyCode::Enter), now, &mut ws);
        assert_eq!(ws.depth(), 3);

        d.dispatch(key(KeyCode::Esc), now, &mut ws);
        assert_eq!(ws.depth(), 2);
        assert!(!ws.is_overlay_active());
        assert_eq!(ws.active_view_name(), Some("contacts"));
    }

    #[test]
    fn test_overlay_receives_other_keys() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        d.dispatch(key(KeyCode::Enter), now, &mut ws);
        assert_eq!(d.dispatch(key(KeyCode::Char(':')), now, &mut ws), None);
        assert_eq!(d.mode(), InputMode::Normal);
        assert!(ws.is_overlay_active());

        d.dispatch(key(KeyCode::Char('q')), now, &mut ws);
        assert!(!ws.is_overlay_active());
    }

    #[test]
    fn test_escape_in_view_pops_only_above_root() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        d.dispatch(key(KeyCode::Esc), now, &mut ws);
        assert_eq!(ws.active_view_name(), Some("dashboard"));
        d.dispatch(key(KeyCode::Esc), now, &mut ws);
        assert_eq!(ws.depth(), 1);
    }

    #[test]
    fn test_escape_clears_view_filter_before_popping() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        ws.active_view_mut().unwrap().filter("acme");
        d.dispatch(key(KeyCode::Esc), now, &mut ws);
        assert_eq!(ws.active_view_name(), Some("contacts"));
        assert_eq!(ws.active_view_mut().unwrap().filter_query(), "");
    }

    #[test]
    fn test_gg_jumps_to_top() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        ws.active_view_mut().unwrap().go_to_bottom();

        assert_eq!(d.dispatch(key(KeyCode::Char('g')), now, &mut ws), None);
        assert_eq!(d.pending_chord(), Some('g'));
        d.dispatch(key(KeyCode::Char('g')), now + Duration::from_millis(100), &mut ws);
        assert_eq!(d.pending_chord(), None);

        assert_eq!(open_title(&mut d, &mut ws).as_deref(), Some("contact ct-1"));
    }

    #[test]
    fn test_dd_fires_delete() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        assert_eq!(d.dispatch(key(KeyCode::Char('d')), now, &mut ws), None);
        let effect = d.dispatch(key(KeyCode::Char('d')), now + Duration::from_millis(300), &mut ws);
        assert_eq!(effect, Some(Effect::Execute("delete".to_string())));
    }

    #[test]
    fn test_slow_chord_does_not_fire() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        d.dispatch(key(KeyCode::Char('d')), now, &mut ws);
        let effect = d.dispatch(key(KeyCode::Char('d')), now + Duration::from_millis(700), &mut ws);
        assert_eq!(effect, None);
        assert_eq!(d.pending_chord(), Some('d'));
    }

    #[test]
    fn test_other_key_breaks_chord() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        d.dispatch(key(KeyCode::Char('g')), now, &mut ws);
        d.dispatch(key(KeyCode::Char('j')), now, &mut ws);
        assert_eq!(d.pending_chord(), None);
        assert_eq!(open_title(&mut d, &mut ws).as_deref(), Some("contact ct-2"));
    }

    #[test]
    fn test_question_mark_requests_help() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let effect = d.dispatch(key(KeyCode::Char('?')), Instant::now(), &mut ws);
        assert_eq!(effect, Some(Effect::Execute("help".to_string())));
    }

    #[test]
    fn test_view_keys_are_forwarded() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let effect = d.dispatch(key(KeyCode::Char('n')), Instant::now(), &mut ws);
        assert_eq!(effect, Some(Effect::Execute("contact new".to_string())));
    }

    #[test]
    fn test_confirm_overlay_sends_remote_for_view() {
        let mut d = dispatcher();
        let mut ws = workspace();
        let now = Instant::now();
        match ws.active_view_mut().unwrap().perform("delete") {
            crate::ui::views::ActionOutcome::Open(name, overlay) => ws.push_overlay(name, overlay),
            _ => panic!("expected confirm overlay"),
        }
        let effect = d.dispatch(key(KeyCode::Char('y')), now, &mut ws);
        match effect {
            Some(Effect::Remote(view, request)) => {
                assert_eq!(view, "contacts");
                assert_eq!(request.item_id.as_deref(), Some("ct-1"));
            }
            other => panic!("unexpected effect: {:?}", other),
        }
        assert!(!ws.is_overlay_active());
    }
}
