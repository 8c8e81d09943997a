//! Command system for the command palette and help overlay.
//!
//! This module provides:
//! - Command definitions with categories and sub-commands
//! - Command registry with alias lookup and tiered fuzzy search
//! - Resolution of executed strings into application commands

mod action;
mod definitions;
mod matching;
mod registry;

pub use action::{resolve, AppCommand};
pub use matching::{best_score, fuzzy_match, match_score, MatchTier};
pub use registry::{
    CategoryGroup, Command, CommandCategory, CommandRef, CommandRegistry, RegistryError,
};
