//! Key classification helpers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Page-wise scroll requests handled globally in Normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
}

/// Ctrl+C quits from every mode except text entry.
pub fn is_hard_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Whether `key` types `c` with no modifier other than Shift.
///
/// Terminals disagree on whether characters like `?` and `:` carry the Shift
/// modifier, so Shift is ignored.
pub fn is_plain_char(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && (key.modifiers - KeyModifiers::SHIFT).is_empty()
}

/// Map a key to a page scroll.
pub fn scroll_for(key: &KeyEvent) -> Option<Scroll> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Some(Scroll::HalfPageDown),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Some(Scroll::HalfPageUp),
        (KeyCode::Char('f'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
            Some(Scroll::PageDown)
        }
        (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => Some(Scroll::PageUp),
        _ => None,
    }
}

/// Short human-readable label for logging.
pub fn key_label(key: &KeyEvent) -> String {
    let base = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        other => format!("{:?}", other),
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{}", base)
    } else if key.modifiers.contains(KeyModifiers::ALT) {
        format!("Alt+{}", base)
    } else {
        base
    }
}
