//! Interactive translation sessions.
//!
//! Provides a REPL-style interface with slash commands for changing the
//! target language, style, model and mode without restarting.

/// Slash command parsing and autocomplete.
pub mod command;
mod session;
mod ui;

pub use command::Mode;
pub use session::{InteractiveSession, SessionConfig};
