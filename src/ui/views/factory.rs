//! View registration table.
//!
//! Each navigable view is registered here by name with a constructor. The
//! workspace builds views lazily from this table on first navigation.

use super::{DashboardView, ResourceView, TableView};
use crate::source::ResourceKind;

/// A named view constructor.
pub struct ViewSpec {
    pub name: &'static str,
    pub build: fn() -> Box<dyn ResourceView>,
}

fn dashboard() -> Box<dyn ResourceView> {
    Box::new(DashboardView::new())
}

fn messages() -> Box<dyn ResourceView> {
    Box::new(TableView::new(ResourceKind::Messages))
}

fn drafts() -> Box<dyn ResourceView> {
    Box::new(TableView::new(ResourceKind::Drafts))
}

fn events() -> Box<dyn ResourceView> {
    Box::new(TableView::new(ResourceKind::Events))
}

fn contacts() -> Box<dyn ResourceView> {
    Box::new(TableView::new(ResourceKind::Contacts))
}

fn webhooks() -> Box<dyn ResourceView> {
    Box::new(TableView::new(ResourceKind::Webhooks))
}

fn grants() -> Box<dyn ResourceView> {
    Box::new(TableView::new(ResourceKind::Grants))
}

fn inbound() -> Box<dyn ResourceView> {
    Box::new(TableView::new(ResourceKind::Inbound))
}

/// Every registered view.
pub const VIEWS: &[ViewSpec] = &[
    ViewSpec { name: "dashboard", build: dashboard },
    ViewSpec { name: "messages", build: messages },
    ViewSpec { name: "drafts", build: drafts },
    ViewSpec { name: "events", build: events },
    ViewSpec { name: "contacts", build: contacts },
    ViewSpec { name: "webhooks", build: webhooks },
    ViewSpec { name: "grants", build: grants },
    ViewSpec { name: "inbound", build: inbound },
];

/// Build the view registered as `name`.
pub fn build_view(name: &str) -> Option<Box<dyn ResourceView>> {
    VIEWS
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| (spec.build)())
}

/// Names of every registered view.
pub fn view_names() -> impl Iterator<Item = &'static str> {
    VIEWS.iter().map(|spec| spec.name)
}
