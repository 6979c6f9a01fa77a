//! # deepyami - Translation and Proofreading CLI
//!
//! `deepyami` translates and proofreads text with OpenAI, Anthropic and
//! Google Gemini chat models. Responses stream to stdout as they arrive.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a file into the configured target language
//! deepyami ./mail.txt
//!
//! # Translate from stdin into Korean with a casual tone
//! cat note.md | deepyami --to ko --style friend
//!
//! # Proofread without changing the language
//! deepyami proofread ./draft.txt
//!
//! # Interactive session
//! deepyami interactive
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/deepyami/config.toml`:
//!
//! ```toml
//! [deepyami]
//! model = "claude-haiku"
//! style = "business"
//! source_language = "Japanese"
//! target_language = "English"
//!
//! [api_keys]
//! anthropic = "sk-ant-..."
//! ```
//!
//! `OPENAI_API_KEY`, `ANTHROPIC_API_KEY` and `GOOGLE_API_KEY` take
//! precedence over the keys in the file.
//!
//! ## Library use
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use deepyami::style::StyleDirective;
//! use deepyami::translation::{Credential, ModelId, ProviderFamily, ProviderSettings, Translator};
//!
//! let translator = Translator::from_settings(ProviderSettings {
//!     model: ModelId::ClaudeHaiku,
//!     credential: Credential::new(ProviderFamily::Anthropic, "sk-ant-..."),
//! })?;
//! let outcome = translator
//!     .translate("こんにちは", "English", StyleDirective::Business, None)
//!     .await;
//! println!("{:?}", outcome.text());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and API key resolution.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// Interactive translation sessions.
pub mod interactive;

/// Global output configuration and logging setup.
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Translation style presets.
pub mod style;

/// Model selection, prompts, provider clients and the translator.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
