//! Supported models, provider families and credentials.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sampling temperature shared by every model.
pub const TEMPERATURE: f32 = 0.3;

/// Errors raised while selecting a model or building a client.
///
/// These are setup mistakes and are always surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unsupported model type: '{0}'\n\nAvailable models: {list}", list = ModelId::identifiers().join(", "))]
    UnsupportedModel(String),

    #[error("no model selected\n\nRun 'deepyami configure' or pass --model <name>")]
    MissingModel,

    #[error(
        "model '{model}' requires an {family} API key\n\n\
         Set the {env} environment variable or run 'deepyami configure'",
        family = .model.family(),
        env = .model.family().api_key_env()
    )]
    MissingCredential { model: ModelId },

    #[error("model '{model}' cannot use a credential issued for {credential}")]
    CredentialMismatch {
        model: ModelId,
        credential: ProviderFamily,
    },
}

/// The vendor behind a model. Credentials are stored per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderFamily {
    OpenAi,
    Anthropic,
    Google,
}

impl ProviderFamily {
    pub const ALL: [Self; 3] = [Self::OpenAi, Self::Anthropic, Self::Google];

    pub const fn key(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
        }
    }

    /// Environment variable that overrides the stored key.
    pub const fn api_key_env(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Google => "GOOGLE_API_KEY",
        }
    }
}

impl fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Provider-specific reasoning knob sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reasoning {
    /// Thinking disabled or not supported.
    Off,
    /// OpenAI `reasoning_effort`.
    Effort(&'static str),
    /// Gemini `thinkingConfig.thinkingBudget`.
    ThinkingBudget(u32),
}

/// Fixed request parameters for one model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSpec {
    pub model_name: &'static str,
    pub temperature: f32,
    pub reasoning: Reasoning,
}

/// The closed set of selectable models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelId {
    Gpt,
    GptMini,
    Claude,
    ClaudeHaiku,
    Gemini,
    GeminiFlash,
}

impl ModelId {
    pub const ALL: [Self; 6] = [
        Self::Gpt,
        Self::GptMini,
        Self::Claude,
        Self::ClaudeHaiku,
        Self::Gemini,
        Self::GeminiFlash,
    ];

    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Gpt => "gpt",
            Self::GptMini => "gpt-mini",
            Self::Claude => "claude",
            Self::ClaudeHaiku => "claude-haiku",
            Self::Gemini => "gemini",
            Self::GeminiFlash => "gemini-flash",
        }
    }

    pub fn identifiers() -> Vec<&'static str> {
        Self::ALL.iter().map(|m| m.identifier()).collect()
    }

    pub const fn family(self) -> ProviderFamily {
        match self {
            Self::Gpt | Self::GptMini => ProviderFamily::OpenAi,
            Self::Claude | Self::ClaudeHaiku => ProviderFamily::Anthropic,
            Self::Gemini | Self::GeminiFlash => ProviderFamily::Google,
        }
    }

    pub const fn spec(self) -> ModelSpec {
        let (model_name, reasoning) = match self {
            Self::Gpt => ("gpt-5.1", Reasoning::Effort("none")),
            Self::GptMini => ("gpt-4.1-mini", Reasoning::Off),
            Self::Claude => ("claude-sonnet-4-5", Reasoning::Off),
            Self::ClaudeHaiku => ("claude-haiku-4-5", Reasoning::Off),
            Self::Gemini => ("gemini-2.5-pro", Reasoning::ThinkingBudget(128)),
            Self::GeminiFlash => ("gemini-2.5-flash", Reasoning::ThinkingBudget(0)),
        };
        ModelSpec {
            model_name,
            temperature: TEMPERATURE,
            reasoning,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Gpt => "OpenAI flagship model",
            Self::GptMini => "OpenAI small, fast model",
            Self::Claude => "Anthropic Sonnet",
            Self::ClaudeHaiku => "Anthropic Haiku, fast and cheap",
            Self::Gemini => "Google Gemini Pro",
            Self::GeminiFlash => "Google Gemini Flash",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for ModelId {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.identifier().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigurationError::UnsupportedModel(s.to_string()))
    }
}

/// An API key for one provider family.
///
/// The secret is never printed; `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    family: ProviderFamily,
    secret: String,
}

impl Credential {
    pub fn new(family: ProviderFamily, secret: impl Into<String>) -> Self {
        Self {
            family,
            secret: secret.into(),
        }
    }

    pub const fn family(&self) -> ProviderFamily {
        self.family
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn is_blank(&self) -> bool {
        self.secret.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("family", &self.family)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Configuration snapshot the client factory is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub model: ModelId,
    pub credential: Credential,
}

impl ProviderSettings {
    /// Checks that the credential fits the model.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.credential.family() != self.model.family() {
            return Err(ConfigurationError::CredentialMismatch {
                model: self.model,
                credential: self.credential.family(),
            });
        }
        if self.credential.is_blank() {
            return Err(ConfigurationError::MissingCredential { model: self.model });
        }
        Ok(())
    }
}
