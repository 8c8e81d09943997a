//! Resource views.
//!
//! A view is any type implementing [`ResourceView`]. The dispatcher and the
//! workspace only ever see the trait; concrete views are created by name
//! through the table in [`factory`].

mod dashboard;
pub mod factory;
mod table;

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::events::Scroll;
use crate::source::{ActionRequest, LoadRequest, Row};
use crate::ui::components::KeyHint;
use crate::ui::overlays::Overlay;

pub use dashboard::DashboardView;
pub use factory::{build_view, view_names, ViewSpec, VIEWS};
pub use table::TableView;

/// What a view did with a key.
pub enum KeyResult {
    /// Consumed.
    Handled,
    /// Not used by the view.
    Ignored,
    /// Open a transient overlay on top of the view.
    Open(String, Box<dyn Overlay>),
    /// Run a command as if typed in the palette.
    Execute(String),
}

impl KeyResult {
    pub fn is_handled(&self) -> bool {
        !matches!(self, KeyResult::Ignored)
    }
}

/// What a view did with an item action such as "delete" or "event new".
pub enum ActionOutcome {
    /// Done locally.
    Done,
    /// Rows must be (re)loaded.
    Load(LoadRequest),
    /// Send this request to the source.
    Remote(ActionRequest),
    /// Collect input or confirmation first.
    Open(String, Box<dyn Overlay>),
    /// The action applies here but cannot run now, e.g. nothing is selected.
    Rejected(String),
    /// The action does not apply to this view.
    Unsupported,
}

/// Capability contract for a navigable view.
pub trait ResourceView {
    /// Registered name, matching the navigation command.
    fn name(&self) -> &str;

    /// Title for the header and the view border.
    fn title(&self) -> String;

    /// Footer hints.
    fn hints(&self) -> Vec<KeyHint>;

    /// Initial population. Returns the request to run, if any.
    fn load(&mut self) -> Option<LoadRequest>;

    /// Reload current data.
    fn refresh(&mut self) -> Option<LoadRequest>;

    /// Whether rows loaded for `request` still match what the view shows.
    ///
    /// A folder switch makes results of earlier loads stale.
    fn is_current(&self, _request: &LoadRequest) -> bool {
        true
    }

    /// Receive the result of a load.
    fn apply_rows(&mut self, rows: Result<Vec<Row>, String>);

    /// Whether a load is outstanding.
    fn is_loading(&self) -> bool {
        false
    }

    /// Set the filter text; empty clears it.
    fn filter(&mut self, query: &str);

    /// Current filter text.
    fn filter_query(&self) -> &str {
        ""
    }

    /// Handle a key forwarded by the dispatcher.
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult;

    fn scroll(&mut self, scroll: Scroll);

    /// Select row `row` (1-based). Out-of-range rows clamp.
    fn go_to_row(&mut self, row: usize);

    fn go_to_top(&mut self);

    fn go_to_bottom(&mut self);

    /// Run an item action by full command name.
    fn perform(&mut self, _action: &str) -> ActionOutcome {
        ActionOutcome::Unsupported
    }

    /// Switch the mail folder shown, for views that have folders.
    fn show_folder(&mut self, _folder: &str) -> Option<LoadRequest> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect);
}
