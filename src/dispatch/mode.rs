/// Keyboard mode of the dispatcher.
///
/// Overlays are not a mode: whether one is active is read from the
/// navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation keys and chords.
    #[default]
    Normal,
    /// Typing into the `/` filter prompt.
    Filter,
    /// Typing into the `:` command palette.
    Command,
}

impl InputMode {
    /// Header indicator.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Filter => "FILTER",
            Self::Command => "COMMAND",
        }
    }
}
