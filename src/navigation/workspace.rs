//! Views and overlays on a single navigation stack.
//!
//! Registered views live in a name-keyed map and keep their state when they
//! leave the top of the stack. Overlays are owned by their stack entry and
//! dropped when popped.

use std::collections::HashMap;

use ratatui::{layout::Rect, Frame};
use thiserror::Error;
use tracing::{debug, info};

use super::NavigationStack;
use crate::source::LoadRequest;
use crate::ui::overlays::Overlay;
use crate::ui::views::{build_view, ResourceView};

/// Builds a view by registered name.
pub type ViewFactory = fn(&str) -> Option<Box<dyn ResourceView>>;

/// A stack entry.
pub enum Layer {
    /// A registered view; its state lives in [`Workspace`].
    View,
    Overlay(Box<dyn Overlay>),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("unknown view '{0}'")]
    UnknownView(String),
}

pub struct Workspace {
    stack: NavigationStack<Layer>,
    views: HashMap<String, Box<dyn ResourceView>>,
    factory: ViewFactory,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Empty workspace using the built-in view table.
    pub fn new() -> Self {
        Self::with_factory(build_view)
    }

    pub fn with_factory(factory: ViewFactory) -> Self {
        Self {
            stack: NavigationStack::new(),
            views: HashMap::new(),
            factory,
        }
    }

    /// Bring view `name` to the top, creating it on first use.
    ///
    /// Overlays above the current view are dismissed first. Returns the
    /// initial load for a newly created view.
    pub fn navigate_to(&mut self, name: &str) -> Result<Option<LoadRequest>, NavigationError> {
        let mut request = None;
        if !self.views.contains_key(name) {
            let mut view =
                (self.factory)(name).ok_or_else(|| NavigationError::UnknownView(name.to_string()))?;
            request = view.load();
            debug!(view = name, "View created");
            self.views.insert(name.to_string(), view);
        }

        while self.is_overlay_active() {
            self.stack.pop();
        }
        self.stack.switch_to(name, || Layer::View);
        info!(view = name, depth = self.stack.len(), "Navigated");
        Ok(request)
    }

    /// Push an overlay above the current top.
    pub fn push_overlay(&mut self, name: impl Into<String>, overlay: Box<dyn Overlay>) {
        let name = name.into();
        debug!(overlay = %name, "Overlay opened");
        self.stack.push(name, Layer::Overlay(overlay));
    }

    /// Pop the top entry and return its name. Views keep their state.
    pub fn pop(&mut self) -> Option<String> {
        let name = self.stack.pop();
        if let Some(name) = &name {
            debug!(name = %name, depth = self.stack.len(), "Popped");
        }
        name
    }

    pub fn is_overlay_active(&self) -> bool {
        matches!(self.stack.top_region(), Some(Layer::Overlay(_)))
    }

    /// The overlay on top of the stack, if any.
    pub fn top_overlay_mut(&mut self) -> Option<&mut Box<dyn Overlay>> {
        match self.stack.top_region_mut() {
            Some(Layer::Overlay(overlay)) => Some(overlay),
            _ => None,
        }
    }

    /// Name of the topmost view, ignoring overlays above it.
    pub fn active_view_name(&self) -> Option<&str> {
        self.stack
            .iter()
            .rev()
            .find(|(_, layer)| matches!(layer, Layer::View))
            .map(|(name, _)| name)
    }

    pub fn active_view_mut(&mut self) -> Option<&mut Box<dyn ResourceView>> {
        let name = self
            .stack
            .iter()
            .rev()
            .find(|(_, layer)| matches!(layer, Layer::View))
            .map(|(name, _)| name)?;
        self.views.get_mut(name)
    }

    /// A created view by name, whether or not it is on top.
    pub fn view_mut(&mut self, name: &str) -> Option<&mut Box<dyn ResourceView>> {
        self.views.get_mut(name)
    }

    /// Number of stack entries, views and overlays together.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Stack entry names, bottom first.
    pub fn crumbs(&self) -> Vec<&str> {
        self.stack.names().collect()
    }

    /// Draw the active view, then every overlay above it in stack order.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if let Some(view) = self.active_view_mut() {
            view.render(frame, area);
        }
        for (_, layer) in self.stack.iter_mut() {
            if let Layer::Overlay(overlay) = layer {
                overlay.render(frame, area);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ResourceKind;
    use crate::ui::overlays::DetailOverlay;

    fn overlay(title: &str) -> Box<dyn Overlay> {
        Box::new(DetailOverlay::new(title, Vec::new()))
    }

    #[test]
    fn test_first_navigation_creates_and_loads() {
        let mut ws = Workspace::new();
        let request = ws.navigate_to("contacts").unwrap();
        assert_eq!(request, Some(LoadRequest::new(ResourceKind::Contacts)));
        assert_eq!(ws.active_view_name(), Some("contacts"));

        ws.navigate_to("dashboard").unwrap();
        assert_eq!(ws.navigate_to("contacts").unwrap(), None);
    }

    #[test]
    fn test_unknown_view() {
        let mut ws = Workspace::new();
        assert_eq!(
            ws.navigate_to("calendar"),
            Err(NavigationError::UnknownView("calendar".to_string()))
        );
        assert_eq!(ws.depth(), 0);
    }

    #[test]
    fn test_switch_relocates_existing_view() {
        let mut ws = Workspace::new();
        ws.navigate_to("dashboard").unwrap();
        ws.navigate_to("messages").unwrap();
        ws.navigate_to("events").unwrap();
        ws.navigate_to("messages").unwrap();
        assert_eq!(ws.crumbs(), vec!["dashboard", "events", "messages"]);
    }

    #[test]
    fn test_overlays_sit_above_active_view() {
        let mut ws = Workspace::new();
        ws.navigate_to("dashboard").unwrap();
        ws.push_overlay("help", overlay("Help"));
        assert!(ws.is_overlay_active());
        assert_eq!(ws.active_view_name(), Some("dashboard"));
        assert_eq!(ws.top_overlay_mut().map(|o| o.title().to_string()), Some("Help".into()));

        assert_eq!(ws.pop(), Some("help".to_string()));
        assert!(!ws.is_overlay_active());
        assert!(ws.top_overlay_mut().is_none());
    }

    #[test]
    fn test_navigation_dismisses_overlays() {
        let mut ws = Workspace::new();
        ws.navigate_to("dashboard").unwrap();
        ws.push_overlay("help", overlay("Help"));
        ws.push_overlay("detail", overlay("Detail"));
        ws.navigate_to("grants").unwrap();
        assert_eq!(ws.crumbs(), vec!["dashboard", "grants"]);
    }

    #[test]
    fn test_popped_view_keeps_state() {
        let mut ws = Workspace::new();
        ws.navigate_to("dashboard").unwrap();
        ws.navigate_to("contacts").unwrap();
        ws.active_view_mut().unwrap().filter("acme");
        ws.pop();
        assert_eq!(ws.active_view_name(), Some("dashboard"));
        assert_eq!(ws.view_mut("contacts").unwrap().filter_query(), "acme");
    }

    #[test]
    fn test_custom_factory() {
        fn only_dashboard(name: &str) -> Option<Box<dyn ResourceView>> {
            (name == "dashboard").then(|| build_view(name)).flatten()
        }
        let mut ws = Workspace::with_factory(only_dashboard);
        assert!(ws.navigate_to("dashboard").is_ok());
        assert!(ws.navigate_to("messages").is_err());
    }
}
