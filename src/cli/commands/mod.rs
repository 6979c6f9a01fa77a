//! Subcommand implementations.

/// Connection check command handler.
pub mod check;

/// Configure command handler.
pub mod configure;

/// Interactive mode command handler.
pub mod interactive;

/// Model listing command handler.
pub mod models;

/// Style listing command handler.
pub mod styles;

/// Translate and proofread command handlers.
pub mod translate;
