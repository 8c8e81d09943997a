//! Resolution of executed command strings into application commands.
//!
//! Names and aliases go through the registry, so an alias never needs a
//! second lookup table here.

use super::registry::CommandRegistry;

/// What the application should do for an executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Switch to a registered view.
    Navigate(String),
    /// Exit the application.
    Quit,
    /// Show the help overlay.
    Help,
    /// Reload the active view.
    Refresh,
    /// Select the first row.
    Top,
    /// Select the last row.
    Bottom,
    /// Select row N (1-based).
    GoToRow(usize),
    /// Show a mail folder in the messages view.
    Folder(String),
    /// An item action handled by the active view, by full command name.
    Action(String),
}

/// Resolve a trimmed, lowercased command string.
///
/// Returns `None` for anything the registry does not know.
pub fn resolve(registry: &CommandRegistry, input: &str) -> Option<AppCommand> {
    let input = input.trim();
    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        return input.parse().ok().map(AppCommand::GoToRow);
    }

    let found = registry.get(input)?;
    let full_name = found.full_name();
    let command = match full_name.as_str() {
        "dashboard" | "messages" | "events" | "contacts" | "webhooks" | "grants" | "inbound"
        | "drafts" => AppCommand::Navigate(full_name),
        "quit" | "quit!" | "wq" => AppCommand::Quit,
        "help" => AppCommand::Help,
        "refresh" => AppCommand::Refresh,
        "top" => AppCommand::Top,
        "bottom" => AppCommand::Bottom,
        "inbox" | "sent" | "trash" => AppCommand::Folder(full_name),
        _ => AppCommand::Action(full_name),
    };
    Some(command)
}
