//! Data sources behind the resource views.
//!
//! Views never talk to a backend directly. They describe what they need as a
//! [`LoadRequest`] or an [`ActionRequest`]; the task layer runs the request
//! against a [`ResourceSource`] and posts the result back to the UI.

mod demo;

use async_trait::async_trait;
use thiserror::Error;

pub use demo::DemoSource;

/// The kinds of resource shown in table views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Messages,
    Drafts,
    Events,
    Contacts,
    Webhooks,
    Grants,
    Inbound,
}

impl ResourceKind {
    /// Every kind, in navigation order.
    pub const ALL: [ResourceKind; 7] = [
        Self::Messages,
        Self::Drafts,
        Self::Events,
        Self::Contacts,
        Self::Webhooks,
        Self::Grants,
        Self::Inbound,
    ];

    /// View name, matching the navigation command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Messages => "messages",
            Self::Drafts => "drafts",
            Self::Events => "events",
            Self::Contacts => "contacts",
            Self::Webhooks => "webhooks",
            Self::Grants => "grants",
            Self::Inbound => "inbound",
        }
    }

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Messages => "Messages",
            Self::Drafts => "Drafts",
            Self::Events => "Events",
            Self::Contacts => "Contacts",
            Self::Webhooks => "Webhooks",
            Self::Grants => "Grants",
            Self::Inbound => "Inbound",
        }
    }

    /// Singular noun for messages such as "Delete this event?".
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Messages => "message",
            Self::Drafts => "draft",
            Self::Events => "event",
            Self::Contacts => "contact",
            Self::Webhooks => "webhook",
            Self::Grants => "grant",
            Self::Inbound => "inbox",
        }
    }

    /// Table column headers.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Messages => &["", "From", "Subject", "Date"],
            Self::Drafts => &["To", "Subject", "Updated"],
            Self::Events => &["Title", "When", "Location", "RSVP"],
            Self::Contacts => &["Name", "Email", "Company"],
            Self::Webhooks => &["Url", "Triggers", "Status"],
            Self::Grants => &["Email", "Provider", "Status"],
            Self::Inbound => &["Address", "Description", "Messages"],
        }
    }

    /// Editable fields for create and edit forms, mapped onto columns.
    ///
    /// Each entry is `(label, column index)`.
    pub fn form_fields(&self) -> &'static [(&'static str, usize)] {
        match self {
            Self::Messages | Self::Drafts => &[],
            Self::Events => &[("Title", 0), ("When", 1), ("Location", 2)],
            Self::Contacts => &[("Name", 0), ("Email", 1), ("Company", 2)],
            Self::Webhooks => &[("Url", 0), ("Triggers", 1)],
            Self::Grants | Self::Inbound => &[],
        }
    }

    /// Look up a kind by view name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// A single table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Stable identifier used in action requests.
    pub id: String,
    /// Cell values, one per column.
    pub cells: Vec<String>,
    /// Extra label/value pairs shown in the detail overlay.
    pub detail: Vec<(String, String)>,
}

impl Row {
    pub fn new(id: impl Into<String>, cells: &[&str]) -> Self {
        Self {
            id: id.into(),
            cells: cells.iter().map(|c| c.to_string()).collect(),
            detail: Vec::new(),
        }
    }

    pub fn with_detail(mut self, label: &str, value: impl Into<String>) -> Self {
        self.detail.push((label.to_string(), value.into()));
        self
    }

    /// Detail value for `label`.
    pub fn detail_value(&self, label: &str) -> Option<&str> {
        self.detail
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Set or insert a detail value.
    pub fn set_detail(&mut self, label: &str, value: impl Into<String>) {
        let value = value.into();
        match self.detail.iter_mut().find(|(l, _)| l == label) {
            Some(entry) => entry.1 = value,
            None => self.detail.push((label.to_string(), value)),
        }
    }

    /// Whether any cell contains `needle` (already lowercased).
    pub fn matches(&self, needle: &str) -> bool {
        self.cells.iter().any(|c| c.to_lowercase().contains(needle))
    }
}

/// A request to list the rows of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub kind: ResourceKind,
    /// Mail folder, for messages only.
    pub folder: Option<String>,
}

impl LoadRequest {
    pub fn new(kind: ResourceKind) -> Self {
        Self { kind, folder: None }
    }

    pub fn in_folder(kind: ResourceKind, folder: impl Into<String>) -> Self {
        Self {
            kind,
            folder: Some(folder.into()),
        }
    }
}

/// A request to change something at the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub kind: ResourceKind,
    /// Verb such as "delete", "star" or "rsvp yes".
    pub action: String,
    /// Target row, when the action applies to one.
    pub item_id: Option<String>,
    /// Form values, as `(label, value)`.
    pub fields: Vec<(String, String)>,
}

impl ActionRequest {
    pub fn new(kind: ResourceKind, action: impl Into<String>) -> Self {
        Self {
            kind,
            action: action.into(),
            item_id: None,
            fields: Vec::new(),
        }
    }

    pub fn for_item(mut self, id: impl Into<String>) -> Self {
        self.item_id = Some(id.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<(String, String)>) -> Self {
        self.fields = fields;
        self
    }

    /// Form value for `label`.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// Errors returned by a source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The target item does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The source cannot perform this action for this kind.
    #[error("'{action}' is not supported for {kind}")]
    Unsupported { action: String, kind: &'static str },

    /// The request is missing data or carries bad values.
    #[error("invalid request: {0}")]
    Invalid(String),
}

/// A backend for resource views.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// List the rows for a view.
    async fn list(&self, request: &LoadRequest) -> Result<Vec<Row>, SourceError>;

    /// Perform an action and return a short confirmation message.
    async fn perform(&self, request: &ActionRequest) -> Result<String, SourceError>;
}
