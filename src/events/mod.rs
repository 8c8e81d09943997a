//! Event handling for the application.
//!
//! This module turns terminal input into application events and holds the
//! key classification helpers used by the dispatcher.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{is_hard_quit, is_plain_char, key_label, scroll_for, Scroll};

/// Application events fed into [`crate::app::App::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// Periodic tick with no input.
    Tick,
    /// Request to exit.
    Quit,
}
