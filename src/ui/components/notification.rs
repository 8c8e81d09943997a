//! Toast notifications for action results and failures.
//!
//! Toasts stack in the bottom-right corner and expire on their own; the
//! main loop calls [`NotificationManager::tick`] on every tick.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// The type of notification, which determines its appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationType {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }

    /// How long a toast of this type stays up.
    pub fn lifetime(&self) -> Duration {
        match self {
            Self::Info | Self::Success => Duration::from_secs(3),
            Self::Warning | Self::Error => Duration::from_secs(5),
        }
    }
}

/// A single toast.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationType,
    expires_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationType) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: Instant::now() + kind.lifetime(),
        }
    }

    /// Whether the toast has expired at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Manages the visible toasts.
#[derive(Debug)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
    max_visible: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible: 3,
        }
    }

    /// Add a toast, dropping the oldest beyond the visible limit.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > self.max_visible {
            self.notifications.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Info));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Success));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Warning));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::new(message, NotificationType::Error));
    }

    /// Drop expired toasts.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        self.notifications.retain(|n| !n.is_expired_at(now));
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Most recent toast.
    pub fn latest(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Render toasts stacked upward from the bottom-right corner of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 48.min(area.width.saturating_sub(2));
        if width < 8 {
            return;
        }
        let inner_width = (width - 4) as usize;

        let mut bottom = area.y + area.height;
        for n in self.notifications.iter().rev() {
            let text_len = n.message.chars().count() + 2;
            let lines = ((text_len + inner_width - 1) / inner_width) as u16;
            let height = lines + 2;
            if bottom < area.y + height {
                break;
            }
            bottom -= height;

            let rect = Rect::new(area.x + area.width - width - 1, bottom, width, height);
            let color = n.kind.color();
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color));
            let text = Line::from(vec![
                Span::styled(format!("{} ", n.kind.icon()), Style::default().fg(color)),
                Span::raw(n.message.as_str()),
            ]);

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
                rect,
            );
        }
    }
}
