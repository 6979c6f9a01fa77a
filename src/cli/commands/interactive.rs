use anyhow::Result;

use crate::config::ConfigManager;
use crate::interactive::{InteractiveSession, Mode, SessionConfig};
use crate::style::StyleDirective;
use crate::translation::{ENGLISH, JAPANESE, ModelId, find_language};

pub struct InteractiveOptions {
    pub to: Option<String>,
    pub style: Option<String>,
    pub model: Option<String>,
}

pub async fn run_interactive(options: InteractiveOptions) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default()?;
    let defaults = &config_file.deepyami;

    // Bad flags fail fast; a missing key is reported on the first request.
    if let Some(model) = &options.model {
        model.parse::<ModelId>()?;
    }
    let style = options
        .style
        .as_deref()
        .or(defaults.style.as_deref())
        .map(str::parse::<StyleDirective>)
        .transpose()?
        .unwrap_or_default();

    let target_language = options
        .to
        .as_deref()
        .map(|to| find_language(to).map_or(to, |l| l.tag).to_string())
        .or_else(|| defaults.target_language.clone())
        .unwrap_or_else(|| ENGLISH.tag.to_string());

    let config = SessionConfig {
        model: options.model.or_else(|| defaults.model.clone()),
        style,
        source_language: defaults
            .source_language
            .clone()
            .unwrap_or_else(|| JAPANESE.tag.to_string()),
        target_language,
        mode: Mode::Translate,
    };

    let mut session = InteractiveSession::new(manager, config_file, config);
    session.run().await
}
