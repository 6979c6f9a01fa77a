//! Config priority contract tests.
//!
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (API keys only)
//! 3. Config file
//! 4. Built-in defaults

#![allow(clippy::unwrap_used)]

use deepyami::config::{ConfigFile, DefaultsConfig, ResolveOptions, resolve_config};
use deepyami::style::StyleDirective;
use deepyami::translation::{ModelId, ProviderFamily};
use serial_test::serial;

fn make_config_with_defaults() -> ConfigFile {
    let mut config = ConfigFile {
        deepyami: DefaultsConfig {
            model: Some("claude-haiku".to_string()),
            style: Some("standard".to_string()),
            source_language: Some("Korean".to_string()),
            target_language: Some("Japanese".to_string()),
        },
        ..ConfigFile::default()
    };
    config.api_keys.set(ProviderFamily::Anthropic, "file-anthropic");
    config.api_keys.set(ProviderFamily::OpenAi, "file-openai");
    config
}

fn clear_env() {
    for family in ProviderFamily::ALL {
        unsafe { std::env::remove_var(family.api_key_env()) };
    }
}

#[test]
#[serial]
fn test_cli_options_override_file() {
    clear_env();
    let options = ResolveOptions {
        model: Some("gpt".to_string()),
        style: Some("friend".to_string()),
        to: Some("English".to_string()),
    };

    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.settings.model, ModelId::Gpt);
    assert_eq!(resolved.settings.credential.secret(), "file-openai");
    assert_eq!(resolved.style, StyleDirective::Friend);
    assert_eq!(resolved.target_language, "English");
    assert_eq!(resolved.source_language, "Korean");
}

#[test]
#[serial]
fn test_file_values_used_without_cli_options() {
    clear_env();
    let resolved = resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.settings.model, ModelId::ClaudeHaiku);
    assert_eq!(resolved.style, StyleDirective::Standard);
    assert_eq!(resolved.target_language, "Japanese");
}

#[test]
#[serial]
fn test_environment_key_overrides_file_key() {
    clear_env();
    unsafe { std::env::set_var("ANTHROPIC_API_KEY", "env-anthropic") };

    let resolved = resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();
    assert_eq!(resolved.settings.credential.secret(), "env-anthropic");

    clear_env();
}

#[test]
#[serial]
fn test_environment_key_is_enough_without_file_key() {
    clear_env();
    unsafe { std::env::set_var("GOOGLE_API_KEY", "env-google") };

    let options = ResolveOptions {
        model: Some("gemini-flash".to_string()),
        ..ResolveOptions::default()
    };
    let resolved = resolve_config(&options, &ConfigFile::default()).unwrap();

    assert_eq!(resolved.settings.credential.family(), ProviderFamily::Google);
    assert_eq!(resolved.style, StyleDirective::Business);
    assert_eq!(resolved.target_language, "English");
    assert_eq!(resolved.source_language, "Japanese");

    clear_env();
}
