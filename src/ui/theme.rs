//! Color palette shared by views and overlays.

use ratatui::style::{Color, Modifier, Style};

/// Colors used across the UI.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Borders and highlights of the focused element.
    pub accent: Color,
    /// Background of the selected row.
    pub selection_bg: Color,
    /// Secondary text.
    pub muted: Color,
    /// Section headers and pending state.
    pub warning: Color,
    pub error: Color,
    /// Header bar background.
    pub header_bg: Color,
}

const DEFAULT_THEME: Theme = Theme {
    accent: Color::Cyan,
    selection_bg: Color::DarkGray,
    muted: Color::Gray,
    warning: Color::Yellow,
    error: Color::Red,
    header_bg: Color::Blue,
};

/// The active theme.
pub fn theme() -> &'static Theme {
    &DEFAULT_THEME
}

impl Theme {
    /// Style for the selected row of a list or table.
    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for section headers.
    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }
}
