//! Reusable UI components.

mod command_palette;
mod filter_prompt;
mod help_bar;
mod input;
mod notification;

pub use command_palette::{CommandPalette, CommandPaletteAction, Suggestion, MAX_SUGGESTIONS};
pub use filter_prompt::{FilterAction, FilterPrompt};
pub use help_bar::{render_hints, KeyHint, GLOBAL_HINTS};
pub use input::TextInput;
pub use notification::{Notification, NotificationManager, NotificationType};
