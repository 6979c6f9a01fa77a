//! Configure command handler for editing default settings.

use anyhow::Result;
use inquire::error::InquireResult;
use inquire::{Password, PasswordDisplayMode, Select};

use crate::config::{ConfigFile, ConfigManager};
use crate::style::PRESETS;
use crate::translation::{ModelId, ProviderFamily, SUPPORTED_LANGUAGES, find_language};
use crate::ui::{PromptResultExt, Style};

/// Prints the current configuration with API keys masked.
pub fn show_config() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;

    println!(
        "{} {}",
        Style::header("Configuration"),
        Style::secondary(manager.config_path().display())
    );
    print_current_defaults(&config);
    Ok(())
}

/// Answers collected by the configure prompts.
struct Answers {
    model: ModelId,
    api_key: Option<String>,
    style: String,
    source_language: String,
    target_language: String,
}

/// Interactively sets the model, its API key, the style and both languages.
///
/// Dismissing any prompt leaves the file untouched.
pub fn run_configure() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    print_current_defaults(&config);

    let Some(answers) = ask(&config).or_dismissed()? else {
        println!();
        return Ok(());
    };

    let family = answers.model.family();
    if let Some(key) = answers.api_key {
        config.api_keys.set(family, &key);
    }
    config.deepyami.model = Some(answers.model.identifier().to_string());
    config.deepyami.style = Some(answers.style);
    config.deepyami.source_language = Some(answers.source_language);
    config.deepyami.target_language = Some(answers.target_language);

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );
    if config.api_keys.resolve(family).is_none() {
        println!(
            "{} No {} key stored. Set {} before translating.",
            Style::warning("Note:"),
            family,
            family.api_key_env()
        );
    }

    Ok(())
}

fn ask(config: &ConfigFile) -> InquireResult<Answers> {
    let defaults = &config.deepyami;
    let model = select_model(defaults.model.as_deref())?;
    let api_key = prompt_api_key(config, model.family())?;
    let style = select_style(defaults.style.as_deref())?;
    let source_language = select_language("Language you write in:", defaults.source_language.as_deref())?;
    let target_language = select_language("Translate into:", defaults.target_language.as_deref())?;

    Ok(Answers {
        model,
        api_key,
        style,
        source_language,
        target_language,
    })
}

fn print_current_defaults(config: &ConfigFile) {
    let or_unset = |value: Option<&str>| value.map_or_else(|| Style::secondary("(not set)"), Style::value);

    println!("  {}             {}", Style::label("model"), or_unset(config.deepyami.model.as_deref()));
    println!("  {}             {}", Style::label("style"), or_unset(config.deepyami.style.as_deref()));
    println!(
        "  {}   {}",
        Style::label("source_language"),
        or_unset(config.deepyami.source_language.as_deref())
    );
    println!(
        "  {}   {}",
        Style::label("target_language"),
        or_unset(config.deepyami.target_language.as_deref())
    );

    for family in ProviderFamily::ALL {
        let status = if std::env::var(family.api_key_env()).is_ok_and(|k| !k.trim().is_empty()) {
            Style::value(format!("(from {})", family.api_key_env()))
        } else if config.api_keys.stored(family).is_some() {
            Style::value("(set)")
        } else {
            Style::secondary("(not set)")
        };
        println!("  {}  {status}", Style::label(format!("api_keys.{:9}", family.key())));
    }
    println!();
}

fn select_model(default: Option<&str>) -> InquireResult<ModelId> {
    let options: Vec<String> = ModelId::ALL
        .iter()
        .map(|m| format!("{} - {}", m.identifier(), m.description()))
        .collect();

    let default_index = default
        .and_then(|d| d.parse::<ModelId>().ok())
        .and_then(|d| ModelId::ALL.iter().position(|m| *m == d))
        .unwrap_or(0);

    let selection = Select::new("Default model:", options)
        .with_starting_cursor(default_index)
        .raw_prompt()?;

    Ok(ModelId::ALL[selection.index])
}

/// `None` when the user left the field empty.
fn prompt_api_key(config: &ConfigFile, family: ProviderFamily) -> InquireResult<Option<String>> {
    let help = if config.api_keys.stored(family).is_some() {
        "Leave empty to keep the stored key"
    } else {
        "Leave empty to rely on the environment variable"
    };

    let key = Password::new(&format!("{family} API key:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(help)
        .prompt()?;

    Ok(Some(key).filter(|k| !k.trim().is_empty()))
}

fn select_style(default: Option<&str>) -> InquireResult<String> {
    let options: Vec<String> = PRESETS
        .iter()
        .map(|p| format!("{} - {}", p.key, p.description))
        .collect();

    let default_index = default
        .and_then(|d| d.parse::<crate::style::StyleDirective>().ok())
        .and_then(|d| PRESETS.iter().position(|p| p.style == d))
        .unwrap_or(0);

    let selection = Select::new("Default style:", options)
        .with_starting_cursor(default_index)
        .raw_prompt()?;

    Ok(PRESETS[selection.index].key.to_string())
}

fn select_language(message: &str, default: Option<&str>) -> InquireResult<String> {
    let options: Vec<String> = SUPPORTED_LANGUAGES
        .iter()
        .map(|l| format!("{} ({})", l.tag, l.code))
        .collect();

    let default_index = default
        .and_then(find_language)
        .and_then(|d| SUPPORTED_LANGUAGES.iter().position(|l| l == d))
        .unwrap_or(0);

    let selection = Select::new(message, options)
        .with_starting_cursor(default_index)
        .raw_prompt()?;

    Ok(SUPPORTED_LANGUAGES[selection.index].tag.to_string())
}
