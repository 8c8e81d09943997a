//! In-memory demo data.
//!
//! Used by the binary in place of a remote account. Mutations are kept for
//! the lifetime of the process so that refreshes show their effect.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use super::{ActionRequest, LoadRequest, ResourceKind, ResourceSource, Row, SourceError};

/// Folders that always exist and cannot be deleted.
const SYSTEM_FOLDERS: [&str; 3] = ["inbox", "sent", "trash"];

/// The folder listed when a request names none.
pub const DEFAULT_FOLDER: &str = "inbox";

#[derive(Debug)]
struct DemoData {
    rows: HashMap<ResourceKind, Vec<Row>>,
    folders: Vec<String>,
    next_id: u64,
}

/// A [`ResourceSource`] backed by sample data.
#[derive(Debug)]
pub struct DemoSource {
    data: Mutex<DemoData>,
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

fn message(id: &str, from: &str, subject: &str, date: &str, folder: &str, unread: bool) -> Row {
    let mut row = Row::new(id, &["", from, subject, date])
        .with_detail("Folder", folder)
        .with_detail("Starred", "no")
        .with_detail("Unread", if unread { "yes" } else { "no" });
    refresh_flags(&mut row);
    row
}

/// Recompute the flag column of a message from its detail values.
fn refresh_flags(row: &mut Row) {
    let starred = row.detail_value("Starred") == Some("yes");
    let unread = row.detail_value("Unread") == Some("yes");
    let flags = format!(
        "{}{}",
        if starred { '★' } else { ' ' },
        if unread { '●' } else { ' ' }
    );
    if let Some(cell) = row.cells.first_mut() {
        *cell = flags;
    }
}

fn sample_rows() -> HashMap<ResourceKind, Vec<Row>> {
    let mut rows = HashMap::new();
    rows.insert(
        ResourceKind::Messages,
        vec![
            message("msg-1", "alice@example.com", "Quarterly report", "Oct 14", "inbox", true),
            message("msg-2", "bob@example.com", "Lunch on Friday?", "Oct 13", "inbox", false),
            message("msg-3", "ci@example.com", "Build #812 passed", "Oct 13", "inbox", true),
            message("msg-4", "carol@example.com", "Design review notes", "Oct 11", "inbox", false),
            message("msg-5", "me@example.com", "Re: Contract draft", "Oct 10", "sent", false),
            message("msg-6", "promo@example.com", "Last chance!", "Oct 02", "trash", false),
        ],
    );
    rows.insert(
        ResourceKind::Drafts,
        vec![
            Row::new("draft-1", &["dave@example.com", "Offsite agenda", "Oct 12"]),
            Row::new("draft-2", &["team@example.com", "Release notes v2", "Oct 09"]),
        ],
    );
    rows.insert(
        ResourceKind::Events,
        vec![
            Row::new("ev-1", &["Standup", "Mon 09:30", "Zoom", "yes"]),
            Row::new("ev-2", &["Design review", "Tue 14:00", "Room 4", "-"]),
            Row::new("ev-3", &["1:1 with Carol", "Wed 11:00", "Cafe", "maybe"]),
        ],
    );
    rows.insert(
        ResourceKind::Contacts,
        vec![
            Row::new("ct-1", &["Alice Martin", "alice@example.com", "Acme"]),
            Row::new("ct-2", &["Bob Chen", "bob@example.com", "Globex"]),
            Row::new("ct-3", &["Carol Diaz", "carol@example.com", "Acme"]),
        ],
    );
    rows.insert(
        ResourceKind::Webhooks,
        vec![
            Row::new("wh-1", &["https://hooks.example.com/mail", "message.created", "active"]),
            Row::new("wh-2", &["https://hooks.example.com/cal", "event.updated", "failing"]),
        ],
    );
    rows.insert(
        ResourceKind::Grants,
        vec![
            Row::new("gr-1", &["me@example.com", "google", "valid"]),
            Row::new("gr-2", &["me@work.example.com", "microsoft", "valid"]),
        ],
    );
    rows.insert(
        ResourceKind::Inbound,
        vec![Row::new("in-1", &["support@in.example.com", "Support inbox", "12"])],
    );
    rows
}

impl DemoSource {
    /// Create a source with sample data.
    pub fn new() -> Self {
        Self {
            data: Mutex::new(DemoData {
                rows: sample_rows(),
                folders: SYSTEM_FOLDERS.iter().map(|f| f.to_string()).collect(),
                next_id: 100,
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, DemoData>, SourceError> {
        self.data
            .lock()
            .map_err(|_| SourceError::Invalid("demo data is poisoned".to_string()))
    }
}

impl DemoData {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn rows_mut(&mut self, kind: ResourceKind) -> &mut Vec<Row> {
        self.rows.entry(kind).or_default()
    }

    fn item_mut(&mut self, request: &ActionRequest) -> Result<&mut Row, SourceError> {
        let id = required_item(request)?;
        self.rows_mut(request.kind)
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| SourceError::NotFound(format!("{} {}", request.kind.singular(), id)))
    }

    fn delete(&mut self, request: &ActionRequest) -> Result<String, SourceError> {
        let kind = request.kind;
        if kind == ResourceKind::Messages {
            let row = self.item_mut(request)?;
            if row.detail_value("Folder") != Some("trash") {
                row.set_detail("Folder", "trash");
                return Ok("Moved message to trash".to_string());
            }
        }

        let id = required_item(request)?.to_string();
        let rows = self.rows_mut(kind);
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(SourceError::NotFound(format!("{} {}", kind.singular(), id)));
        }
        Ok(format!("Deleted {}", kind.singular()))
    }

    fn send(&mut self, request: &ActionRequest) -> Result<String, SourceError> {
        let to = request.field("To").map(str::trim).unwrap_or_default();
        if to.is_empty() {
            return Err(SourceError::Invalid("recipient is required".to_string()));
        }
        let subject = request.field("Subject").unwrap_or_default().to_string();
        let id = self.next_id("msg");
        let mut row = message(&id, to, &subject, "now", "sent", false);
        if let Some(body) = request.field("Body") {
            row.set_detail("Body", body);
        }
        self.rows_mut(ResourceKind::Messages).push(row);
        Ok(format!("Message sent to {}", to))
    }

    fn create(&mut self, request: &ActionRequest) -> Result<String, SourceError> {
        let kind = request.kind;
        let fields = kind.form_fields();
        let (first_label, _) = fields
            .first()
            .ok_or_else(|| unsupported(request))?;
        if request.field(first_label).map_or(true, |v| v.trim().is_empty()) {
            return Err(SourceError::Invalid(format!(
                "{} is required",
                first_label.to_lowercase()
            )));
        }

        let mut cells = vec![String::from("-"); kind.columns().len()];
        if kind == ResourceKind::Webhooks {
            cells[2] = "active".to_string();
        }
        for (label, col) in fields {
            cells[*col] = request.field(label).unwrap_or("-").to_string();
        }

        let prefix = match kind {
            ResourceKind::Events => "ev",
            ResourceKind::Contacts => "ct",
            _ => "wh",
        };
        let id = self.next_id(prefix);
        self.rows_mut(kind).push(Row {
            id,
            cells,
            detail: Vec::new(),
        });
        Ok(format!("Created {}", kind.singular()))
    }

    fn edit(&mut self, request: &ActionRequest) -> Result<String, SourceError> {
        let kind = request.kind;
        let fields = kind.form_fields();
        if fields.is_empty() {
            return Err(unsupported(request));
        }
        let row = self.item_mut(request)?;
        for (label, col) in fields {
            if let Some(value) = request.field(label) {
                row.cells[*col] = value.to_string();
            }
        }
        Ok(format!("Updated {}", kind.singular()))
    }

    fn folder(&mut self, request: &ActionRequest, verb: &str) -> Result<String, SourceError> {
        match verb {
            "list" => Ok(format!("Folders: {}", self.folders.join(", "))),
            "create" | "delete" => {
                let name = request
                    .field("Name")
                    .map(|n| n.trim().to_lowercase())
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| SourceError::Invalid("folder name is required".to_string()))?;
                if verb == "create" {
                    if self.folders.contains(&name) {
                        return Err(SourceError::Invalid(format!("folder '{}' exists", name)));
                    }
                    self.folders.push(name.clone());
                    Ok(format!("Created folder {}", name))
                } else {
                    if SYSTEM_FOLDERS.contains(&name.as_str()) {
                        return Err(SourceError::Invalid(format!(
                            "folder '{}' cannot be deleted",
                            name
                        )));
                    }
                    let before = self.folders.len();
                    self.folders.retain(|f| *f != name);
                    if self.folders.len() == before {
                        return Err(SourceError::NotFound(format!("folder '{}'", name)));
                    }
                    Ok(format!("Deleted folder {}", name))
                }
            }
            _ => Err(unsupported(request)),
        }
    }
}

fn required_item(request: &ActionRequest) -> Result<&str, SourceError> {
    request
        .item_id
        .as_deref()
        .ok_or_else(|| SourceError::Invalid("no item selected".to_string()))
}

fn unsupported(request: &ActionRequest) -> SourceError {
    SourceError::Unsupported {
        action: request.action.clone(),
        kind: request.kind.name(),
    }
}

#[async_trait]
impl ResourceSource for DemoSource {
    async fn list(&self, request: &LoadRequest) -> Result<Vec<Row>, SourceError> {
        let data = self.lock()?;
        let rows = data.rows.get(&request.kind).cloned().unwrap_or_default();
        if request.kind != ResourceKind::Messages {
            return Ok(rows);
        }

        let folder = request.folder.as_deref().unwrap_or(DEFAULT_FOLDER);
        if !data.folders.iter().any(|f| f == folder) && folder != "archive" {
            return Err(SourceError::NotFound(format!("folder '{}'", folder)));
        }
        Ok(rows
            .into_iter()
            .filter(|r| r.detail_value("Folder") == Some(folder))
            .collect())
    }

    async fn perform(&self, request: &ActionRequest) -> Result<String, SourceError> {
        debug!(kind = request.kind.name(), action = %request.action, "Demo action");
        let mut data = self.lock()?;
        let kind = request.kind;

        match (kind, request.action.as_str()) {
            (ResourceKind::Grants | ResourceKind::Inbound, _) => Err(unsupported(request)),
            (_, "delete") => data.delete(request),
            (ResourceKind::Messages, "star") => {
                let row = data.item_mut(request)?;
                let starred = row.detail_value("Starred") == Some("yes");
                row.set_detail("Starred", if starred { "no" } else { "yes" });
                refresh_flags(row);
                Ok(if starred { "Unstarred" } else { "Starred" }.to_string())
            }
            (ResourceKind::Messages, action @ ("unstar" | "read" | "unread")) => {
                let row = data.item_mut(request)?;
                let (label, value) = match action {
                    "unstar" => ("Starred", "no"),
                    "read" => ("Unread", "no"),
                    _ => ("Unread", "yes"),
                };
                row.set_detail(label, value);
                refresh_flags(row);
                Ok(match action {
                    "unstar" => "Unstarred",
                    "read" => "Marked as read",
                    _ => "Marked as unread",
                }
                .to_string())
            }
            (ResourceKind::Messages, "archive") => {
                data.item_mut(request)?.set_detail("Folder", "archive");
                Ok("Archived message".to_string())
            }
            (
                ResourceKind::Messages | ResourceKind::Drafts,
                "compose" | "reply" | "replyall" | "forward",
            ) => data.send(request),
            (ResourceKind::Messages, action) if action.starts_with("folder ") => {
                data.folder(request, &action["folder ".len()..])
            }
            (ResourceKind::Events | ResourceKind::Contacts | ResourceKind::Webhooks, "new") => {
                data.create(request)
            }
            (ResourceKind::Events | ResourceKind::Contacts | ResourceKind::Webhooks, "edit") => {
                data.edit(request)
            }
            (ResourceKind::Events, action) if action.starts_with("rsvp ") => {
                let answer = action["rsvp ".len()..].to_string();
                let row = data.item_mut(request)?;
                row.cells[3] = answer.clone();
                Ok(format!("RSVP: {}", answer))
            }
            (ResourceKind::Webhooks, "test") => {
                let row = data.item_mut(request)?;
                Ok(format!("Test event sent to {}", row.cells[0]))
            }
            _ => Err(unsupported(request)),
        }
    }
}
