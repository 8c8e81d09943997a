//! Built-in command table.
//!
//! Aliases must be unique across every top-level command, and across the
//! children of each parent; the registry rejects collisions at startup.

use super::registry::{Command, CommandCategory};

use CommandCategory::*;

/// All built-in commands in registration order.
pub fn default_commands() -> Vec<Command> {
    let mut commands = Vec::new();
    commands.extend(navigation_commands());
    commands.extend(message_commands());
    commands.extend(calendar_commands());
    commands.push(
        Command::new("contact", "Contact management", Contacts)
            .with_context_view("contacts")
            .with_sub_command(Command::sub("new", "Create new contact").with_aliases(&["create"]))
            .with_sub_command(Command::sub("edit", "Edit current contact").with_aliases(&["update"]))
            .with_sub_command(Command::sub("delete", "Delete current contact").with_aliases(&["del"])),
    );
    commands.push(
        Command::new("webhook", "Webhook management", Webhooks)
            .with_context_view("webhooks")
            .with_sub_command(Command::sub("new", "Create new webhook").with_aliases(&["create"]))
            .with_sub_command(Command::sub("edit", "Edit current webhook").with_aliases(&["update"]))
            .with_sub_command(Command::sub("delete", "Delete current webhook").with_aliases(&["del"]))
            .with_sub_command(Command::sub("test", "Send a test event to current webhook")),
    );
    commands.extend(folder_commands());
    commands.extend(vim_commands());
    commands.push(
        Command::new("refresh", "Refresh current view", System)
            .with_aliases(&["reload"])
            .with_shortcut("r"),
    );
    commands
}

fn navigation_commands() -> Vec<Command> {
    vec![
        Command::new("dashboard", "Go to dashboard", Navigation)
            .with_aliases(&["d", "dash", "home"]),
        Command::new("messages", "Go to messages view", Navigation).with_aliases(&["m", "msg"]),
        Command::new("events", "Go to calendar events view", Navigation)
            .with_aliases(&["e", "ev", "cal", "calendar"]),
        Command::new("contacts", "Go to contacts view", Navigation).with_aliases(&["c", "ct"]),
        Command::new("webhooks", "Go to webhooks view", Navigation).with_aliases(&["w", "wh"]),
        Command::new("grants", "Go to grants/accounts view", Navigation)
            .with_aliases(&["g", "gr"]),
        // "inbox" is the folder command
        Command::new("inbound", "Go to inbound inboxes view", Navigation)
            .with_aliases(&["i", "in"]),
    ]
}

fn message_commands() -> Vec<Command> {
    vec![
        Command::new("compose", "Compose new email", Messages)
            .with_aliases(&["n", "new"])
            .with_shortcut("n"),
        Command::new("reply", "Reply to current message", Messages)
            .with_aliases(&["r"])
            .with_shortcut("R")
            .with_context_view("messages"),
        Command::new("replyall", "Reply all to message", Messages)
            .with_aliases(&["ra", "reply-all"])
            .with_shortcut("A")
            .with_context_view("messages"),
        Command::new("forward", "Forward message", Messages)
            .with_aliases(&["f", "fwd"])
            .with_context_view("messages"),
        Command::new("star", "Toggle star on message", Messages)
            .with_aliases(&["s"])
            .with_shortcut("s")
            .with_context_view("messages"),
        Command::new("unstar", "Remove star from message", Messages).with_context_view("messages"),
        Command::new("read", "Mark as read", Messages)
            .with_aliases(&["mr"])
            .with_context_view("messages"),
        Command::new("unread", "Mark as unread", Messages)
            .with_aliases(&["mu"])
            .with_shortcut("u")
            .with_context_view("messages"),
        Command::new("delete", "Delete current item", Messages)
            .with_aliases(&["del", "rm"])
            .with_shortcut("dd"),
        Command::new("archive", "Archive message", Messages).with_context_view("messages"),
    ]
}

fn calendar_commands() -> Vec<Command> {
    vec![
        Command::new("event", "Event management", Calendar)
            .with_context_view("events")
            .with_sub_command(Command::sub("new", "Create new event").with_aliases(&["create"]))
            .with_sub_command(Command::sub("edit", "Edit current event").with_aliases(&["update"]))
            .with_sub_command(Command::sub("delete", "Delete current event").with_aliases(&["del"])),
        Command::new("rsvp", "RSVP to event", Calendar)
            .with_context_view("events")
            .with_sub_command(Command::sub("yes", "RSVP yes to event"))
            .with_sub_command(Command::sub("no", "RSVP no to event"))
            .with_sub_command(Command::sub("maybe", "RSVP maybe to event")),
    ]
}

fn folder_commands() -> Vec<Command> {
    vec![
        Command::new("folder", "Folder management", Folders)
            .with_context_view("messages")
            .with_sub_command(Command::sub("list", "List all folders").with_aliases(&["ls"]))
            .with_sub_command(Command::sub("create", "Create new folder").with_aliases(&["new"]))
            .with_sub_command(Command::sub("delete", "Delete folder").with_aliases(&["del"])),
        Command::new("inbox", "Go to inbox folder", Folders),
        Command::new("sent", "Go to sent folder", Folders),
        Command::new("trash", "Go to trash folder", Folders),
        Command::new("drafts", "Go to drafts", Folders).with_aliases(&["dr"]),
    ]
}

fn vim_commands() -> Vec<Command> {
    vec![
        Command::new("quit", "Quit application", Vim).with_aliases(&["q", "exit"]),
        Command::new("quit!", "Force quit", Vim).with_aliases(&["q!"]),
        Command::new("wq", "Save and quit", Vim).with_aliases(&["x"]),
        Command::new("help", "Show help", Vim)
            .with_aliases(&["h"])
            .with_shortcut("?"),
        Command::new("top", "Go to first row", Vim)
            .with_aliases(&["first", "gg"])
            .with_shortcut("gg"),
        // "G" would collide with the "g" alias of grants
        Command::new("bottom", "Go to last row", Vim)
            .with_aliases(&["last"])
            .with_shortcut("G"),
    ]
}
