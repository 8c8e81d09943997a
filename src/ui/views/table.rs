//! Generic table view shared by every resource kind.
//!
//! The view keeps the full row set from the last load and a list of visible
//! indices after the filter. Selection is an index into the visible list.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState},
    Frame,
};
use tracing::debug;

use super::{ActionOutcome, KeyResult, ResourceView};
use crate::events::{is_plain_char, Scroll};
use crate::source::{ActionRequest, LoadRequest, ResourceKind, Row};
use crate::ui::components::KeyHint;
use crate::ui::overlays::{ConfirmOverlay, DetailOverlay, FormOverlay};
use crate::ui::theme::theme;

/// Rows per page before the first render sets the real height.
const DEFAULT_PAGE_HEIGHT: usize = 10;

const MESSAGE_HINTS: [KeyHint; 6] = [
    KeyHint::new("j/k", "move"),
    KeyHint::new("Enter", "open"),
    KeyHint::new("c", "compose"),
    KeyHint::new("R", "reply"),
    KeyHint::new("s", "star"),
    KeyHint::new("dd", "delete"),
];

const EDITABLE_HINTS: [KeyHint; 5] = [
    KeyHint::new("j/k", "move"),
    KeyHint::new("Enter", "open"),
    KeyHint::new("n", "new"),
    KeyHint::new("e", "edit"),
    KeyHint::new("dd", "delete"),
];

const READ_ONLY_HINTS: [KeyHint; 3] = [
    KeyHint::new("j/k", "move"),
    KeyHint::new("Enter", "open"),
    KeyHint::new("r", "refresh"),
];

/// Table of rows for one [`ResourceKind`].
pub struct TableView {
    kind: ResourceKind,
    rows: Vec<Row>,
    query: String,
    /// Indices into `rows` passing the filter.
    visible: Vec<usize>,
    selected: usize,
    page_height: usize,
    loading: bool,
    error: Option<String>,
    /// Mail folder; only used by the messages view.
    folder: String,
}

impl TableView {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
            query: String::new(),
            visible: Vec::new(),
            selected: 0,
            page_height: DEFAULT_PAGE_HEIGHT,
            loading: false,
            error: None,
            folder: "inbox".to_string(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Index of the selection within the visible rows.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The selected row, if any.
    pub fn selected_row(&self) -> Option<&Row> {
        self.visible.get(self.selected).map(|&i| &self.rows[i])
    }

    /// Rows passing the filter, in order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.visible.iter().map(move |&i| &self.rows[i])
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn request(&self) -> LoadRequest {
        match self.kind {
            ResourceKind::Messages => LoadRequest::in_folder(self.kind, self.folder.clone()),
            kind => LoadRequest::new(kind),
        }
    }

    fn apply_filter(&mut self) {
        let needle = self.query.to_lowercase();
        self.visible = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| needle.is_empty() || row.matches(&needle))
            .map(|(i, _)| i)
            .collect();
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.visible.len().saturating_sub(1));
    }

    fn move_down(&mut self, by: usize) {
        if !self.visible.is_empty() {
            self.selected = (self.selected + by).min(self.visible.len() - 1);
        }
    }

    fn move_up(&mut self, by: usize) {
        self.selected = self.selected.saturating_sub(by);
    }

    fn open_detail(&self) -> KeyResult {
        let Some(row) = self.selected_row() else {
            return KeyResult::Handled;
        };
        let mut fields: Vec<(String, String)> = self
            .kind
            .columns()
            .iter()
            .zip(&row.cells)
            .filter(|(label, _)| !label.is_empty())
            .map(|(label, value)| (label.to_string(), value.clone()))
            .collect();
        fields.extend(row.detail.iter().cloned());
        let title = format!("{} {}", self.kind.singular(), row.id);
        KeyResult::Open("detail".to_string(), Box::new(DetailOverlay::new(title, fields)))
    }

    /// Command prefix for the create/edit/delete family of this kind.
    fn item_prefix(&self) -> Option<&'static str> {
        match self.kind {
            ResourceKind::Events => Some("event"),
            ResourceKind::Contacts => Some("contact"),
            ResourceKind::Webhooks => Some("webhook"),
            _ => None,
        }
    }

    /// Map a full command name to the verb sent to the source, or `None`
    /// when the command does not apply to this kind.
    fn verb_for(&self, action: &str) -> Option<String> {
        if action == "delete" {
            return Some("delete".to_string());
        }
        if let Some(prefix) = self.item_prefix() {
            if let Some(verb) = action
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix(' '))
            {
                return Some(verb.to_string());
            }
        }
        match (self.kind, action) {
            (ResourceKind::Events, a) if a.starts_with("rsvp ") => Some(a.to_string()),
            (ResourceKind::Messages, a) if a.starts_with("folder ") => Some(a.to_string()),
            (
                ResourceKind::Messages,
                "star" | "unstar" | "read" | "unread" | "archive" | "reply" | "replyall"
                | "forward" | "compose",
            ) => Some(action.to_string()),
            (ResourceKind::Drafts, "compose" | "reply" | "replyall" | "forward") => {
                Some(action.to_string())
            }
            _ => None,
        }
    }

    fn selected_request(&self, verb: &str) -> Result<ActionRequest, ActionOutcome> {
        match self.selected_row() {
            Some(row) => Ok(ActionRequest::new(self.kind, verb).for_item(row.id.clone())),
            None => Err(ActionOutcome::Rejected("No item selected".to_string())),
        }
    }

    fn message_form(&self, verb: &str) -> Result<FormOverlay, ActionOutcome> {
        if verb == "compose" {
            let request = ActionRequest::new(self.kind, verb);
            return Ok(FormOverlay::new("Compose", request)
                .field("To", "")
                .field("Subject", "")
                .field("Body", ""));
        }

        let request = self.selected_request(verb)?;
        let row = self.selected_row().ok_or(ActionOutcome::Unsupported)?;
        let (to_col, subject_col) = match self.kind {
            ResourceKind::Drafts => (0, 1),
            _ => (1, 2),
        };
        let cell = |i: usize| row.cells.get(i).cloned().unwrap_or_default();
        let (title, to, subject) = match verb {
            "forward" => ("Forward", String::new(), format!("Fwd: {}", cell(subject_col))),
            "replyall" => ("Reply all", cell(to_col), format!("Re: {}", cell(subject_col))),
            _ => ("Reply", cell(to_col), format!("Re: {}", cell(subject_col))),
        };
        Ok(FormOverlay::new(title, request)
            .field("To", to)
            .field("Subject", subject)
            .field("Body", ""))
    }

    fn item_form(&self, verb: &str) -> Result<FormOverlay, ActionOutcome> {
        let singular = self.kind.singular();
        let (title, request, row) = if verb == "edit" {
            let request = self.selected_request(verb)?;
            (format!("Edit {}", singular), request, self.selected_row())
        } else {
            (format!("New {}", singular), ActionRequest::new(self.kind, verb), None)
        };

        let mut form = FormOverlay::new(title, request);
        for (label, col) in self.kind.form_fields() {
            let value = row
                .and_then(|r| r.cells.get(*col))
                .filter(|v| v.as_str() != "-")
                .cloned()
                .unwrap_or_default();
            form = form.field(*label, value);
        }
        Ok(form)
    }

    fn outcome_for(&self, verb: &str) -> Result<ActionOutcome, ActionOutcome> {
        let form = match verb {
            "delete" => {
                let request = self.selected_request(verb)?;
                let prompt = format!("Delete this {}?", self.kind.singular());
                return Ok(ActionOutcome::Open(
                    "confirm".to_string(),
                    Box::new(ConfirmOverlay::new(prompt, request)),
                ));
            }
            "compose" | "reply" | "replyall" | "forward" => self.message_form(verb)?,
            "new" | "edit" => self.item_form(verb)?,
            "folder create" | "folder delete" => {
                let title = if verb == "folder create" {
                    "New folder"
                } else {
                    "Delete folder"
                };
                FormOverlay::new(title, ActionRequest::new(self.kind, verb)).field("Name", "")
            }
            "folder list" => return Ok(ActionOutcome::Remote(ActionRequest::new(self.kind, verb))),
            _ => return Ok(ActionOutcome::Remote(self.selected_request(verb)?)),
        };
        Ok(ActionOutcome::Open("form".to_string(), Box::new(form)))
    }
}

impl ResourceView for TableView {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn title(&self) -> String {
        let mut title = self.kind.title().to_string();
        if self.kind == ResourceKind::Messages {
            title.push_str(&format!(" ({})", self.folder));
        }
        if !self.query.is_empty() {
            title.push_str(&format!(" /{}", self.query));
        }
        title
    }

    fn hints(&self) -> Vec<KeyHint> {
        match self.kind {
            ResourceKind::Messages | ResourceKind::Drafts => MESSAGE_HINTS.to_vec(),
            ResourceKind::Events | ResourceKind::Contacts | ResourceKind::Webhooks => {
                EDITABLE_HINTS.to_vec()
            }
            ResourceKind::Grants | ResourceKind::Inbound => READ_ONLY_HINTS.to_vec(),
        }
    }

    fn load(&mut self) -> Option<LoadRequest> {
        self.loading = true;
        self.error = None;
        Some(self.request())
    }

    fn refresh(&mut self) -> Option<LoadRequest> {
        self.load()
    }

    fn is_current(&self, request: &LoadRequest) -> bool {
        *request == self.request()
    }

    fn apply_rows(&mut self, rows: Result<Vec<Row>, String>) {
        self.loading = false;
        match rows {
            Ok(rows) => {
                debug!(view = self.kind.name(), count = rows.len(), "Rows loaded");
                self.rows = rows;
                self.error = None;
                self.apply_filter();
            }
            Err(e) => self.error = Some(e),
        }
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn filter(&mut self, query: &str) {
        self.query = query.trim().to_string();
        self.selected = 0;
        self.apply_filter();
    }

    fn filter_query(&self) -> &str {
        &self.query
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        match key.code {
            KeyCode::Down => self.move_down(1),
            KeyCode::Up => self.move_up(1),
            KeyCode::Home => self.go_to_top(),
            KeyCode::End => self.go_to_bottom(),
            KeyCode::Enter => return self.open_detail(),
            KeyCode::Esc if !self.query.is_empty() => self.filter(""),
            KeyCode::Esc => return KeyResult::Ignored,
            KeyCode::Char(c) if is_plain_char(&key, c) => {
                return self.handle_char(c);
            }
            _ => return KeyResult::Ignored,
        }
        KeyResult::Handled
    }

    fn scroll(&mut self, scroll: Scroll) {
        let half = (self.page_height / 2).max(1);
        let page = self.page_height.max(1);
        match scroll {
            Scroll::HalfPageDown => self.move_down(half),
            Scroll::HalfPageUp => self.move_up(half),
            Scroll::PageDown => self.move_down(page),
            Scroll::PageUp => self.move_up(page),
        }
    }

    fn go_to_row(&mut self, row: usize) {
        if self.visible.is_empty() {
            return;
        }
        self.selected = row.max(1).min(self.visible.len()) - 1;
    }

    fn go_to_top(&mut self) {
        self.selected = 0;
    }

    fn go_to_bottom(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    fn perform(&mut self, action: &str) -> ActionOutcome {
        let Some(verb) = self.verb_for(action) else {
            return ActionOutcome::Unsupported;
        };
        self.outcome_for(&verb).unwrap_or_else(|outcome| outcome)
    }

    fn show_folder(&mut self, folder: &str) -> Option<LoadRequest> {
        if self.kind != ResourceKind::Messages {
            return None;
        }
        self.folder = folder.to_string();
        self.selected = 0;
        self.load()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let block = Block::default()
            .title(format!(" {} ", self.title()))
            .borders(Borders::ALL)
            .border_style(t.border());
        // Border plus header row.
        self.page_height = area.height.saturating_sub(3).max(1) as usize;

        let message = if let Some(error) = &self.error {
            Some(Line::from(Span::styled(
                format!("Error: {}", error),
                Style::default().fg(t.error),
            )))
        } else if self.loading && self.rows.is_empty() {
            Some(Line::from(Span::styled("Loading...", t.dim())))
        } else if self.visible.is_empty() {
            Some(Line::from(Span::styled("No items", t.dim())))
        } else {
            None
        };
        if let Some(message) = message {
            frame.render_widget(Paragraph::new(message).block(block), area);
            return;
        }

        let columns = self.kind.columns();
        let header = TableRow::new(columns.iter().map(|c| Cell::from(*c))).style(t.header());
        let rows = self
            .visible_rows()
            .map(|row| TableRow::new(row.cells.iter().map(|c| Cell::from(c.as_str()))));
        let widths: Vec<Constraint> = columns
            .iter()
            .map(|c| {
                if c.is_empty() {
                    Constraint::Length(2)
                } else {
                    Constraint::Fill(1)
                }
            })
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(t.selected());
        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }
}

impl TableView {
    fn handle_char(&mut self, c: char) -> KeyResult {
        match c {
            'j' => self.move_down(1),
            'k' => self.move_up(1),
            'G' => self.go_to_bottom(),
            'r' => return KeyResult::Execute("refresh".to_string()),
            'q' => return KeyResult::Execute("quit".to_string()),
            _ => {
                let command = match (self.kind, c) {
                    (ResourceKind::Messages, 's') => "star".to_string(),
                    (ResourceKind::Messages, 'u') => "unread".to_string(),
                    (ResourceKind::Messages, 'a') => "archive".to_string(),
                    (ResourceKind::Messages | ResourceKind::Drafts, 'c') => "compose".to_string(),
                    (ResourceKind::Messages | ResourceKind::Drafts, 'R') => "reply".to_string(),
                    (ResourceKind::Messages | ResourceKind::Drafts, 'A') => "replyall".to_string(),
                    (ResourceKind::Messages | ResourceKind::Drafts, 'f') => "forward".to_string(),
                    (_, 'n') | (_, 'e') => match self.item_prefix() {
                        Some(prefix) => {
                            format!("{} {}", prefix, if c == 'n' { "new" } else { "edit" })
                        }
                        None => return KeyResult::Ignored,
                    },
                    _ => return KeyResult::Ignored,
                };
                return KeyResult::Execute(command);
            }
        }
        KeyResult::Handled
    }
}
