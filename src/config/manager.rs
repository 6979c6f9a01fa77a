use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::fs::atomic_write;
use crate::paths;
use crate::style::StyleDirective;
use crate::translation::{
    ConfigurationError, Credential, ENGLISH, JAPANESE, ModelId, ProviderFamily, ProviderSettings,
};

/// Model identifiers from older releases and their replacements.
const LEGACY_MODELS: &[(&str, &str)] = &[("gpt4", "gpt")];

/// Default settings in the `[deepyami]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Model identifier, e.g. `claude-haiku`.
    pub model: Option<String>,
    /// Style key, e.g. `business`.
    pub style: Option<String>,
    /// Language the user usually writes in.
    pub source_language: Option<String>,
    /// Language to translate into.
    pub target_language: Option<String>,
}

/// API keys in the `[api_keys]` section, one per provider family.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<String>,
}

impl ApiKeys {
    const fn slot(&self, family: ProviderFamily) -> &Option<String> {
        match family {
            ProviderFamily::OpenAi => &self.openai,
            ProviderFamily::Anthropic => &self.anthropic,
            ProviderFamily::Google => &self.google,
        }
    }

    /// The key stored in the file, ignoring blanks.
    pub fn stored(&self, family: ProviderFamily) -> Option<&str> {
        self.slot(family)
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Stores a key. Blank input removes it.
    pub fn set(&mut self, family: ProviderFamily, key: &str) {
        let key = key.trim();
        let value = (!key.is_empty()).then(|| key.to_string());
        match family {
            ProviderFamily::OpenAi => self.openai = value,
            ProviderFamily::Anthropic => self.anthropic = value,
            ProviderFamily::Google => self.google = value,
        }
    }

    /// Gets the key, preferring the environment variable over the file.
    pub fn resolve(&self, family: ProviderFamily) -> Option<String> {
        if let Ok(key) = std::env::var(family.api_key_env())
            && !key.trim().is_empty()
        {
            return Some(key.trim().to_string());
        }
        self.stored(family).map(str::to_string)
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |family| self.stored(family).map(|_| "<redacted>");
        f.debug_struct("ApiKeys")
            .field("openai", &mask(ProviderFamily::OpenAi))
            .field("anthropic", &mask(ProviderFamily::Anthropic))
            .field("google", &mask(ProviderFamily::Google))
            .finish()
    }
}

/// Text restored when an interactive session starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub last_source_text: String,
    #[serde(default)]
    pub last_target_text: String,
}

impl SessionState {
    pub fn is_empty(&self) -> bool {
        self.last_source_text.is_empty() && self.last_target_text.is_empty()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/deepyami/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub deepyami: DefaultsConfig,
    #[serde(default)]
    pub api_keys: ApiKeys,
    #[serde(default, skip_serializing_if = "SessionState::is_empty")]
    pub session: SessionState,
}

impl ConfigFile {
    /// Rewrites legacy model identifiers in place.
    ///
    /// Returns `true` when the file content changed.
    pub fn migrate(&mut self) -> bool {
        let Some(model) = self.deepyami.model.as_deref() else {
            return false;
        };

        let Some((old, new)) = LEGACY_MODELS
            .iter()
            .find(|(old, _)| old.eq_ignore_ascii_case(model.trim()))
        else {
            return false;
        };

        tracing::warn!(from = *old, to = *new, "migrated legacy model identifier");
        self.deepyami.model = Some((*new).to_string());
        true
    }

    /// Whether the selected model has a key, counting environment overrides.
    pub fn is_configured(&self) -> bool {
        self.deepyami
            .model
            .as_deref()
            .and_then(|m| m.parse::<ModelId>().ok())
            .is_some_and(|m| self.api_keys.resolve(m.family()).is_some())
    }
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub settings: ProviderSettings,
    pub style: StyleDirective,
    pub source_language: String,
    pub target_language: String,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub model: Option<String>,
    pub style: Option<String>,
    pub to: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Model and credential problems are returned as [`ConfigurationError`]
/// so the binary can map them to a configuration exit code.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let model_name = options
        .model
        .as_deref()
        .or(config_file.deepyami.model.as_deref())
        .filter(|m| !m.trim().is_empty())
        .ok_or(ConfigurationError::MissingModel)?;
    let model: ModelId = model_name.parse()?;

    let family = model.family();
    let secret = config_file
        .api_keys
        .resolve(family)
        .ok_or(ConfigurationError::MissingCredential { model })?;

    let settings = ProviderSettings {
        model,
        credential: Credential::new(family, secret),
    };
    settings.validate()?;

    let style = options
        .style
        .as_deref()
        .or(config_file.deepyami.style.as_deref())
        .map(str::parse::<StyleDirective>)
        .transpose()?
        .unwrap_or_default();

    let target_language = options
        .to
        .clone()
        .or_else(|| config_file.deepyami.target_language.clone())
        .unwrap_or_else(|| ENGLISH.tag.to_string());

    let source_language = config_file
        .deepyami
        .source_language
        .clone()
        .unwrap_or_else(|| JAPANESE.tag.to_string());

    Ok(ResolvedConfig {
        settings,
        style,
        source_language,
        target_language,
    })
}

/// Loads the config file and resolves it against `options`.
pub fn load_resolved(options: &ResolveOptions) -> Result<ResolvedConfig> {
    let config_file = ConfigManager::new()?.load_or_default()?;
    resolve_config(options, &config_file)
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for `$XDG_CONFIG_HOME/deepyami/config.toml`,
    /// falling back to `~/.config/deepyami/config.toml`.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_file()?,
        })
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads and parses the file, applying legacy migrations.
    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let mut config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })?;

        if config_file.migrate() {
            self.save(&config_file)?;
        }

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })
    }

    /// Loads the file, or returns defaults when it is missing.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            Ok(ConfigFile::default())
        }
    }
}
