use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};

use super::command::{Input, Mode, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::cli::commands::translate::{Job, execute};
use crate::config::{ConfigFile, ConfigManager, ResolveOptions, resolve_config};
use crate::style::StyleDirective;
use crate::translation::{ModelId, Outcome, Translator, auto_target, display_name, find_language};
use crate::ui::{PromptResultExt, Style};

/// Settings the user can change during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Model identifier; `None` until one is chosen.
    pub model: Option<String>,
    pub style: StyleDirective,
    pub source_language: String,
    pub target_language: String,
    pub mode: Mode,
}

/// A REPL that translates or proofreads each line the user enters.
///
/// The translator is built on first use and dropped whenever the model
/// changes.
pub struct InteractiveSession {
    manager: ConfigManager,
    config_file: ConfigFile,
    config: SessionConfig,
    translator: Option<Translator>,
}

impl InteractiveSession {
    pub const fn new(manager: ConfigManager, config_file: ConfigFile, config: SessionConfig) -> Self {
        Self {
            manager,
            config_file,
            config,
            translator: None,
        }
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(&self.config);
        ui::print_last_session(&self.config_file.session);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message(&format!(
                    "[{}] Type text, /help for commands, Ctrl+C to quit",
                    self.config.mode.name()
                ))
                .prompt();

            let Some(line) = input.or_dismissed()? else {
                println!();
                break;
            };
            match parse_input(&line) {
                Input::Empty => {}
                Input::Command(cmd) => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                Input::Text(text) => self.process(text).await?,
            }
        }

        self.save_session();
        ui::print_goodbye();
        Ok(())
    }

    /// Returns `false` when the session should end.
    fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Config => {
                let client = self.translator.as_ref().map(Translator::describe);
                ui::print_config(&self.config, client.as_deref());
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Mode(mode) => {
                self.config.mode = mode.unwrap_or_else(|| self.config.mode.toggled());
                ui::print_success(&format!("Mode set to {}", Style::value(self.config.mode.name())));
            }
            SlashCommand::Set { key, value } => self.handle_set(&key, value.as_deref()),
            SlashCommand::Swap => {
                self.swap_languages();
                ui::print_success(&format!(
                    "{} → {}",
                    Style::value(&self.config.source_language),
                    Style::value(&self.config.target_language)
                ));
            }
            SlashCommand::Quit => return false,
            SlashCommand::Unknown(cmd) => ui::print_error(&format!("Unknown command: /{cmd}")),
        }
        true
    }

    fn handle_set(&mut self, key: &str, value: Option<&str>) {
        let result = match (key, value) {
            ("to", Some(lang)) => {
                self.set_target(lang);
                Ok(())
            }
            ("style", Some(style)) => self.set_style(style),
            ("model", Some(model)) => self.set_model(model),
            ("to" | "style" | "model", None) => Err(format!("Usage: /set {key} <value>")),
            ("", _) => Err("Usage: /set <to|style|model> <value>".to_string()),
            _ => Err(format!("Unknown setting: {key}\nAvailable: to, style, model")),
        };

        if let Err(message) = result {
            ui::print_error(&message);
        }
    }

    fn set_target(&mut self, lang: &str) {
        let lang = find_language(lang).map_or(lang, |l| l.tag);
        self.config.target_language = lang.to_string();
        ui::print_success(&format!("Target language set to {}", Style::value(lang)));
    }

    fn set_style(&mut self, style: &str) -> Result<(), String> {
        let style: StyleDirective = style.parse().map_err(|e| format!("{e}"))?;
        self.config.style = style;
        ui::print_success(&format!("Style set to {}", Style::value(style)));
        Ok(())
    }

    fn set_model(&mut self, model: &str) -> Result<(), String> {
        let model: ModelId = model.parse().map_err(|e| format!("{e}"))?;
        self.config.model = Some(model.identifier().to_string());
        self.translator = None;
        ui::print_success(&format!("Model set to {}", Style::value(model)));
        Ok(())
    }

    pub fn swap_languages(&mut self) {
        std::mem::swap(
            &mut self.config.source_language,
            &mut self.config.target_language,
        );
    }

    /// Returns the session translator, building it on first use.
    fn translator(&mut self) -> Result<Translator> {
        if let Some(translator) = &self.translator {
            return Ok(translator.clone());
        }

        let resolved = resolve_config(
            &ResolveOptions {
                model: self.config.model.clone(),
                ..ResolveOptions::default()
            },
            &self.config_file,
        )?;
        let translator = Translator::from_settings(resolved.settings)?;
        tracing::debug!(client = %translator.describe(), "built session translator");

        self.translator = Some(translator.clone());
        Ok(translator)
    }

    async fn process(&mut self, text: String) -> Result<()> {
        let translator = match self.translator() {
            Ok(translator) => translator,
            Err(e) => {
                ui::print_error(&format!("{e}"));
                return Ok(());
            }
        };

        let job = self.job_for(&text);
        if let Job::Translate { target_language } = &job {
            println!("{}", Style::hint(format!("→ {}", display_name(target_language))));
        }

        let outcome = execute(&translator, job, text.clone(), self.config.style, true).await?;
        println!();

        match outcome {
            Outcome::Completed(result) => {
                let session = &mut self.config_file.session;
                session.last_source_text = text;
                session.last_target_text = result;
            }
            Outcome::Failed(cause) => ui::print_error(&cause),
            Outcome::Cancelled => println!("{}", Style::warning("Cancelled")),
        }
        Ok(())
    }

    fn job_for(&self, text: &str) -> Job {
        match self.config.mode {
            Mode::Translate => Job::Translate {
                target_language: auto_target(
                    text,
                    &self.config.target_language,
                    &self.config.source_language,
                )
                .to_string(),
            },
            Mode::Proofread => Job::Proofread,
        }
    }

    /// Persists the last texts and language pair. Failures are logged only.
    fn save_session(&mut self) {
        let defaults = &mut self.config_file.deepyami;
        defaults.source_language = Some(self.config.source_language.clone());
        defaults.target_language = Some(self.config.target_language.clone());

        if let Err(e) = self.manager.save(&self.config_file) {
            tracing::warn!(error = %format!("{e:#}"), "failed to save session state");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session(temp_dir: &TempDir) -> InteractiveSession {
        let config = SessionConfig {
            model: Some("claude".to_string()),
            style: StyleDirective::Business,
            source_language: "Japanese".to_string(),
            target_language: "English".to_string(),
            mode: Mode::Translate,
        };
        InteractiveSession::new(
            ConfigManager::with_path(temp_dir.path().join("config.toml")),
            ConfigFile::default(),
            config,
        )
    }

    #[test]
    fn test_swap_languages() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);
        session.swap_languages();
        assert_eq!(session.config().source_language, "English");
        assert_eq!(session.config().target_language, "Japanese");
    }

    #[test]
    fn test_job_for_swaps_when_text_is_in_target() {
        let temp_dir = TempDir::new().unwrap();
        let session = session(&temp_dir);

        assert_eq!(
            session.job_for("お世話になっております"),
            Job::Translate {
                target_language: "English".to_string()
            }
        );
        assert_eq!(
            session.job_for("Thank you for your help"),
            Job::Translate {
                target_language: "Japanese".to_string()
            }
        );
    }

    #[test]
    fn test_job_for_proofread_mode() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);
        session.handle_command(SlashCommand::Mode(None));
        assert_eq!(session.job_for("text"), Job::Proofread);
    }

    #[test]
    fn test_set_commands() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);

        session.handle_set("to", Some("ko"));
        session.handle_set("style", Some("casual"));
        session.handle_set("model", Some("gemini-flash"));
        session.handle_set("model", Some("gpt4"));

        assert_eq!(session.config().target_language, "Korean");
        assert_eq!(session.config().style, StyleDirective::Friend);
        assert_eq!(session.config().model.as_deref(), Some("gemini-flash"));
    }

    #[test]
    fn test_set_model_drops_translator() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);
        session.config_file.api_keys.set(crate::translation::ProviderFamily::Anthropic, "k");
        session.config_file.api_keys.set(crate::translation::ProviderFamily::Google, "g");

        let first = session.translator().unwrap();
        assert!(first.describe().contains("claude"));
        assert!(session.translator.is_some());

        session.handle_set("model", Some("gemini"));
        assert!(session.translator.is_none());
        assert!(session.translator().unwrap().describe().contains("gemini"));
    }

    #[test]
    fn test_quit_and_save() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session(&temp_dir);
        session.config_file.session.last_source_text = "こんにちは".to_string();
        session.config_file.session.last_target_text = "Hello".to_string();

        assert!(!session.handle_command(SlashCommand::Quit));
        session.save_session();

        let saved = ConfigManager::with_path(temp_dir.path().join("config.toml"))
            .load()
            .unwrap();
        assert_eq!(saved.session.last_target_text, "Hello");
        assert_eq!(saved.deepyami.target_language.as_deref(), Some("English"));
    }
}
