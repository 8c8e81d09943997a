//! Main application state.
//!
//! The application follows The Elm Architecture: [`App::update`] consumes
//! events, [`App::view`] draws the current state. `App` is the single owner
//! of UI state. It never spawns work itself: requests are queued as
//! [`Job`]s that the main loop drains, and results come back through
//! [`App::handle_api_message`].

use std::sync::Arc;
use std::time::Instant;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::commands::{resolve, AppCommand, CommandRegistry};
use crate::config::{Config, Settings};
use crate::dispatch::{CommandExecutor, Effect, InputMode, KeyDispatcher};
use crate::error::AppError;
use crate::events::Event;
use crate::navigation::Workspace;
use crate::source::{ActionRequest, LoadRequest};
use crate::tasks::{ApiMessage, Job};
use crate::ui::components::{render_hints, KeyHint, NotificationManager, GLOBAL_HINTS};
use crate::ui::overlays::HelpOverlay;
use crate::ui::theme::theme;
use crate::ui::views::ActionOutcome;

const OVERLAY_HINTS: [KeyHint; 1] = [KeyHint::new("Esc", "close")];

pub struct App {
    should_quit: bool,
    registry: Arc<CommandRegistry>,
    dispatcher: KeyDispatcher,
    workspace: Workspace,
    notifications: NotificationManager,
    /// Work queued for the main loop.
    jobs: Vec<Job>,
    settings: Settings,
    last_refresh: Instant,
}

impl App {
    /// Build the application and open the dashboard plus the configured
    /// start view.
    ///
    /// # Errors
    ///
    /// Fails when the command table does not register or the start view is
    /// unknown.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let registry = Arc::new(CommandRegistry::with_defaults()?);
        let settings = config.settings;
        let dispatcher = KeyDispatcher::with_settings(
            Arc::clone(&registry),
            settings.chord_window(),
            settings.max_suggestions,
        );

        let mut app = Self {
            should_quit: false,
            registry,
            dispatcher,
            workspace: Workspace::new(),
            notifications: NotificationManager::new(),
            jobs: Vec::new(),
            settings,
            last_refresh: Instant::now(),
        };

        let start = app.settings.default_view.clone();
        for name in ["dashboard", start.as_str()] {
            if let Some(request) = app.workspace.navigate_to(name)? {
                app.queue_fetch(name, request);
            }
        }
        info!(view = %start, commands = app.registry.len(), "Application ready");
        Ok(app)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn mode(&self) -> InputMode {
        self.dispatcher.mode()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Drain queued background work.
    pub fn take_jobs(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.jobs)
    }

    /// Apply an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key) => {
                if let Some(effect) = self.dispatcher.dispatch(key, Instant::now(), &mut self.workspace)
                {
                    self.apply(effect);
                }
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.notifications.tick();
                self.auto_refresh(Instant::now());
            }
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
            Effect::Execute(command) => self.execute(&command),
            Effect::Load(view, request) => self.queue_fetch(&view, request),
            Effect::Remote(view, request) => self.queue_action(&view, request),
        }
    }

    /// Handle a completion posted by a worker.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::RowsFetched {
                view,
                request,
                result,
            } => {
                let Some(target) = self.workspace.view_mut(&view) else {
                    warn!(view = %view, "Rows for unknown view");
                    return;
                };
                if !target.is_current(&request) {
                    debug!(view = %view, request = ?request, "Dropping stale rows");
                    return;
                }
                let failure = result.as_ref().err().cloned();
                target.apply_rows(result);
                if let Some(e) = failure {
                    self.notifications
                        .error(format!("Failed to load {}: {}", view, e));
                }
            }
            ApiMessage::ActionCompleted {
                view,
                action,
                result,
            } => match result {
                Ok(message) => {
                    info!(view = %view, action = %action, "Action completed");
                    self.notifications.success(message);
                    let request = self.workspace.view_mut(&view).and_then(|v| v.refresh());
                    if let Some(request) = request {
                        self.queue_fetch(&view, request);
                    }
                }
                Err(e) => self.notifications.error(e),
            },
        }
    }

    /// Refresh the active view when the refresh interval has passed.
    ///
    /// Skipped while the user is typing or an overlay is open.
    pub fn auto_refresh(&mut self, now: Instant) {
        let Some(interval) = self.settings.refresh_interval() else {
            return;
        };
        if now.saturating_duration_since(self.last_refresh) < interval {
            return;
        }
        if self.dispatcher.mode() != InputMode::Normal || self.workspace.is_overlay_active() {
            return;
        }
        debug!("Auto refresh");
        self.refresh_active();
        self.last_refresh = now;
    }

    fn refresh_active(&mut self) {
        let Some(name) = self.workspace.active_view_name().map(str::to_string) else {
            return;
        };
        let request = self.workspace.active_view_mut().and_then(|v| v.refresh());
        if let Some(request) = request {
            self.queue_fetch(&name, request);
        }
        self.last_refresh = Instant::now();
    }

    fn queue_fetch(&mut self, view: &str, request: LoadRequest) {
        self.jobs.push(Job::Fetch {
            view: view.to_string(),
            request,
        });
    }

    fn queue_action(&mut self, view: &str, request: ActionRequest) {
        self.jobs.push(Job::Action {
            view: view.to_string(),
            request,
        });
    }

    fn navigate(&mut self, name: &str) {
        match self.workspace.navigate_to(name) {
            Ok(Some(request)) => self.queue_fetch(name, request),
            Ok(None) => {}
            Err(e) => self.notifications.error(AppError::from(e).user_message()),
        }
    }

    fn show_folder(&mut self, folder: &str) {
        // A newly created view would load the default folder first; the
        // folder load below replaces it.
        if let Err(e) = self.workspace.navigate_to("messages") {
            self.notifications.error(AppError::from(e).user_message());
            return;
        }
        let request = self
            .workspace
            .view_mut("messages")
            .and_then(|v| v.show_folder(folder));
        if let Some(request) = request {
            self.queue_fetch("messages", request);
        }
    }

    fn perform(&mut self, action: &str) {
        let Some(name) = self.workspace.active_view_name().map(str::to_string) else {
            return;
        };
        let Some(view) = self.workspace.active_view_mut() else {
            return;
        };
        let title = view.title();
        match view.perform(action) {
            ActionOutcome::Done => {}
            ActionOutcome::Load(request) => self.queue_fetch(&name, request),
            ActionOutcome::Remote(request) => self.queue_action(&name, request),
            ActionOutcome::Open(overlay_name, overlay) => {
                self.workspace.push_overlay(overlay_name, overlay)
            }
            ActionOutcome::Rejected(reason) => self.notifications.warning(reason),
            ActionOutcome::Unsupported => {
                debug!(action, view = %name, "Action not available");
                self.notifications
                    .warning(format!("'{}' is not available in {}", action, title));
            }
        }
    }

    /// Render the UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header, content, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header);
        self.workspace.render(frame, content);
        self.render_footer(frame, footer);

        let prompt_area = Rect::new(area.x, content.y, area.width, content.height + footer.height);
        self.dispatcher.render(frame, prompt_area);
        self.notifications.render(frame, content);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let bar = Style::default().bg(t.header_bg).fg(Color::White);
        let mut spans = vec![Span::styled(
            " mailboard ",
            bar.add_modifier(Modifier::BOLD),
        )];
        spans.push(Span::raw(" "));
        spans.push(Span::styled(self.workspace.crumbs().join(" > "), t.dim()));
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(" {} ", self.dispatcher.mode().label()),
            Style::default().fg(Color::Black).bg(t.accent),
        ));
        if let Some(c) = self.dispatcher.pending_chord() {
            spans.push(Span::styled(format!(" {}", c), t.header()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_footer(&mut self, frame: &mut Frame, area: Rect) {
        if self.dispatcher.mode() != InputMode::Normal {
            return;
        }
        let hints = if self.workspace.is_overlay_active() {
            OVERLAY_HINTS.to_vec()
        } else {
            let mut hints = self
                .workspace
                .active_view_mut()
                .map(|v| v.hints())
                .unwrap_or_default();
            hints.extend_from_slice(&GLOBAL_HINTS);
            hints
        };
        render_hints(frame, area, &hints);
    }
}

impl CommandExecutor for App {
    fn execute(&mut self, command: &str) {
        let Some(resolved) = resolve(&self.registry, command) else {
            debug!(command, "Unknown command ignored");
            return;
        };
        debug!(command, resolved = ?resolved, "Execute");
        match resolved {
            AppCommand::Navigate(view) => self.navigate(&view),
            AppCommand::Quit => self.should_quit = true,
            AppCommand::Help => {
                let overlay = HelpOverlay::new(Arc::clone(&self.registry));
                self.workspace.push_overlay("help", Box::new(overlay));
            }
            AppCommand::Refresh => self.refresh_active(),
            AppCommand::Top => {
                if let Some(view) = self.workspace.active_view_mut() {
                    view.go_to_top();
                }
            }
            AppCommand::Bottom => {
                if let Some(view) = self.workspace.active_view_mut() {
                    view.go_to_bottom();
                }
            }
            AppCommand::GoToRow(row) => {
                if let Some(view) = self.workspace.active_view_mut() {
                    view.go_to_row(row);
                }
            }
            AppCommand::Folder(folder) => self.show_folder(&folder),
            AppCommand::Action(action) => self.perform(&action),
        }
    }
}
