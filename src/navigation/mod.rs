//! Navigation: the LIFO stack of UI contexts and the workspace that owns
//! the views and overlays on it.

mod stack;
mod workspace;

pub use stack::NavigationStack;
pub use workspace::{Layer, NavigationError, ViewFactory, Workspace};
