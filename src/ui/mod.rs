//! User interface: reusable components, views, overlays and the theme.

pub mod components;
pub mod overlays;
pub mod theme;
pub mod views;
