//! Interactive chat mode.
//!
//! Provides a REPL-style interface with slash commands. The conversation is
//! kept in memory for the lifetime of the session only.

/// Slash command parsing and autocomplete.
pub mod command;
mod history;
mod session;
mod ui;

pub use history::MessageLog;
pub use session::{ChatSession, SessionConfig};
