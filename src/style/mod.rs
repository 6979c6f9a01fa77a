//! Translation style presets.
//!
//! A style controls the tone of the generated text. The neutral style adds
//! no tone instruction to the prompt at all.

use std::fmt;
use std::str::FromStr;

/// A tone preset applied to translations and proofreading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleDirective {
    #[default]
    Business,
    Standard,
    Friend,
}

/// Static description of a preset.
#[derive(Debug, Clone)]
pub struct PresetStyle {
    pub style: StyleDirective,
    /// The style key (e.g., "business").
    pub key: &'static str,
    /// Other accepted spellings.
    pub aliases: &'static [&'static str],
    /// Human-readable description.
    pub description: &'static str,
    /// Tone instruction inserted into the system prompt, if any.
    pub instruction: Option<&'static str>,
}

/// All available presets.
pub const PRESETS: &[PresetStyle] = &[
    PresetStyle {
        style: StyleDirective::Business,
        key: "business",
        aliases: &["formal"],
        description: "Formal, polite business language",
        instruction: Some("formal business tone with polite and professional language"),
    },
    PresetStyle {
        style: StyleDirective::Standard,
        key: "standard",
        aliases: &["colleague", "neutral"],
        description: "Neutral, no tone adjustment",
        instruction: None,
    },
    PresetStyle {
        style: StyleDirective::Friend,
        key: "friend",
        aliases: &["casual"],
        description: "Friendly, casual tone",
        instruction: Some("friendly and casual tone suitable for friends"),
    },
];

impl StyleDirective {
    pub const fn preset(self) -> &'static PresetStyle {
        match self {
            Self::Business => &PRESETS[0],
            Self::Standard => &PRESETS[1],
            Self::Friend => &PRESETS[2],
        }
    }

    pub fn key(self) -> &'static str {
        self.preset().key
    }

    /// The tone clause for the prompt, `None` for the neutral style.
    pub fn instruction(self) -> Option<&'static str> {
        self.preset().instruction
    }
}

impl fmt::Display for StyleDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StyleDirective {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PRESETS
            .iter()
            .find(|p| {
                p.key.eq_ignore_ascii_case(s) || p.aliases.iter().any(|a| a.eq_ignore_ascii_case(s))
            })
            .map(|p| p.style)
            .ok_or_else(|| StyleError::NotFound(s.to_string()))
    }
}

/// Style-related errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error("Style '{0}' not found\n\nAvailable styles: {keys}", keys = PRESETS.iter().map(|p| p.key).collect::<Vec<_>>().join(", "))]
    NotFound(String),
}
