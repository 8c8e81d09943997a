//! Yes/no confirmation before a destructive request.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{centered, Overlay, OverlayOutcome};
use crate::source::ActionRequest;
use crate::ui::theme::theme;

/// Asks before sending `request`.
pub struct ConfirmOverlay {
    prompt: String,
    request: ActionRequest,
}

impl ConfirmOverlay {
    pub fn new(prompt: impl Into<String>, request: ActionRequest) -> Self {
        Self {
            prompt: prompt.into(),
            request,
        }
    }
}

impl Overlay for ConfirmOverlay {
    fn title(&self) -> &str {
        "Confirm"
    }

    fn handle_key(&mut self, key: KeyEvent) -> OverlayOutcome {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                OverlayOutcome::Remote(self.request.clone())
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') => OverlayOutcome::Close,
            _ => OverlayOutcome::Handled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let rect = centered(area, 50, 6);
        frame.render_widget(Clear, rect);

        let block = Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.warning));
        let lines = vec![
            Line::from(self.prompt.as_str()),
            Line::from(""),
            Line::from(Span::styled("[y] yes   [n] no", t.dim())),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            rect,
        );
    }
}
