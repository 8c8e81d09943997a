//! Modal keyboard dispatch.
//!
//! [`KeyDispatcher`] turns key events into [`Effect`]s; the application
//! applies them through [`CommandExecutor`] and the workspace.

mod chord;
mod dispatcher;
mod mode;

pub use chord::{ChordTracker, CHORD_WINDOW};
pub use dispatcher::{Effect, KeyDispatcher};
pub use mode::InputMode;

/// Runs a command string from the palette, a view or the help overlay.
///
/// `command` is already trimmed and lowercased.
pub trait CommandExecutor {
    fn execute(&mut self, command: &str);
}
