#![allow(clippy::unwrap_used)]
//! CLI smoke tests.
//!
//! Every test points `XDG_CONFIG_HOME` at a temp directory and clears the
//! API key variables, so no test reads the user's config or hits the network.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn deepyami(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("deepyami").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("GOOGLE_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(config_home: &TempDir, contents: &str) {
    let dir = config_home.path().join("deepyami");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    deepyami(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Translate and proofread"))
        .stdout(predicate::str::contains("--to"))
        .stdout(predicate::str::contains("--style"))
        .stdout(predicate::str::contains("proofread"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    deepyami(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_models_list() {
    let home = TempDir::new().unwrap();
    deepyami(&home)
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("gpt-mini"))
        .stdout(predicate::str::contains("claude-haiku"))
        .stdout(predicate::str::contains("gemini-flash"))
        .stdout(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_styles_list_marks_default() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[deepyami]\nstyle = \"friend\"\n");
    deepyami(&home)
        .arg("styles")
        .assert()
        .success()
        .stdout(predicate::str::contains("business"))
        .stdout(predicate::str::contains("standard"))
        .stdout(predicate::str::contains("colleague"))
        .stdout(predicate::str::is_match(r"friend .*\(default\)").unwrap());
}

#[test]
fn test_languages_list() {
    let home = TempDir::new().unwrap();
    deepyami(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("Japanese"))
        .stdout(predicate::str::contains("Chinese-Traditional"))
        .stdout(predicate::str::contains("zh-TW"));
}

#[test]
fn test_configure_show_masks_keys() {
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        "[deepyami]\nmodel = \"claude\"\n\n[api_keys]\nanthropic = \"sk-ant-secret\"\n",
    );
    deepyami(&home)
        .args(["configure", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("claude"))
        .stdout(predicate::str::contains("(set)"))
        .stdout(predicate::str::contains("sk-ant-secret").not());
}

#[test]
fn test_translate_without_model_is_config_error() {
    let home = TempDir::new().unwrap();
    deepyami(&home)
        .write_stdin("こんにちは")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("no model selected"));
}

#[test]
fn test_translate_unsupported_model_is_config_error() {
    let home = TempDir::new().unwrap();
    deepyami(&home)
        .args(["--model", "gpt4"])
        .write_stdin("こんにちは")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("unsupported model type"));
}

#[test]
fn test_proofread_without_key_is_config_error() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[deepyami]\nmodel = \"gemini\"\n");
    deepyami(&home)
        .arg("proofread")
        .write_stdin("Thanks for you help")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("GOOGLE_API_KEY"));
}

#[test]
fn test_unknown_style_is_usage_error() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[deepyami]\nmodel = \"gpt\"\n\n[api_keys]\nopenai = \"sk-test\"\n");
    deepyami(&home)
        .args(["--style", "pirate"])
        .write_stdin("Hello")
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("Style 'pirate' not found"));
}

#[test]
fn test_legacy_model_is_migrated_on_load() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[deepyami]\nmodel = \"gpt4\"\n");
    deepyami(&home).arg("models").assert().success();

    let saved = std::fs::read_to_string(home.path().join("deepyami").join("config.toml")).unwrap();
    assert!(saved.contains("model = \"gpt\""));
}
