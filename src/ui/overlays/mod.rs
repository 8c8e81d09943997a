//! Transient overlays pushed on the navigation stack.
//!
//! Overlays are anonymous: they are not in the view registry and are
//! dropped when popped. While one is on top, every key except Ctrl+C and
//! Escape goes to it.

mod confirm;
mod detail;
mod form;
mod help;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    Frame,
};

use crate::source::ActionRequest;

pub use confirm::ConfirmOverlay;
pub use detail::DetailOverlay;
pub use form::FormOverlay;
pub use help::HelpOverlay;

/// What an overlay did with a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// Consumed; stay open.
    Handled,
    /// Close this overlay.
    Close,
    /// Close and run a command.
    Execute(String),
    /// Close and send a request on behalf of the view underneath.
    Remote(ActionRequest),
}

/// A modal layer drawn above the active view.
pub trait Overlay {
    fn title(&self) -> &str;

    fn handle_key(&mut self, key: KeyEvent) -> OverlayOutcome;

    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A rectangle of at most `width` x `height` centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
