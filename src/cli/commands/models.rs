//! Model listing command handler.

use anyhow::Result;

use crate::config::{ConfigFile, ConfigManager};
use crate::translation::{ModelId, ProviderFamily};
use crate::ui::Style;

/// Prints every supported model with its provider and key status.
pub fn print_models() -> Result<()> {
    let config = ConfigManager::new()?.load_or_default()?;
    print_models_for(&config);
    Ok(())
}

fn print_models_for(config: &ConfigFile) {
    let default_model = config
        .deepyami
        .model
        .as_deref()
        .and_then(|m| m.parse::<ModelId>().ok());

    for family in ProviderFamily::ALL {
        let key_status = if config.api_keys.resolve(family).is_some() {
            Style::success("key set")
        } else {
            Style::warning(format!("no key, set {}", family.api_key_env()))
        };
        println!("{} {}", Style::header(family), Style::secondary(format!("({key_status})")));

        for model in ModelId::ALL.into_iter().filter(|m| m.family() == family) {
            let marker = if default_model == Some(model) {
                format!(" {}", Style::default_marker())
            } else {
                String::new()
            };
            println!(
                "  {}  {}  {}{marker}",
                Style::value(format!("{:13}", model.identifier())),
                Style::label(format!("{:18}", model.spec().model_name)),
                Style::secondary(model.description()),
            );
        }
        println!();
    }
}
