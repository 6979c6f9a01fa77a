//! Color and formatting helpers for terminal output.
//!
//! Every helper falls back to plain text when colors are disabled with
//! `--no-color` or `NO_COLOR`.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::output;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    fn paint<T: Display>(text: T, painted: impl FnOnce(&T) -> String) -> String {
        if output::is_no_color() {
            text.to_string()
        } else {
            painted(&text)
        }
    }

    /// Section headers, e.g. "Configuration".
    pub fn header<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.bold().to_string())
    }

    /// Keys in key/value listings.
    pub fn label<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.dimmed().to_string())
    }

    /// Model identifiers, style keys, language tags.
    pub fn value<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.cyan().to_string())
    }

    pub fn secondary<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.dimmed().to_string())
    }

    pub fn success<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.green().to_string())
    }

    pub fn error<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.red().bold().to_string())
    }

    pub fn warning<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.yellow().to_string())
    }

    /// Slash commands, e.g. "/swap".
    pub fn command<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.green().to_string())
    }

    /// Language codes.
    pub fn code<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.yellow().to_string())
    }

    pub fn hint<T: Display>(text: T) -> String {
        Self::paint(text, |t| t.dimmed().italic().to_string())
    }

    /// Marker for the configured default in listings.
    pub fn default_marker() -> String {
        Self::secondary("(default)")
    }

    pub fn version<T: Display>(text: T) -> String {
        Self::secondary(text)
    }
}
