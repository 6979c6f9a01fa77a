//! Styles command handler.

use anyhow::Result;

use crate::config::ConfigManager;
use crate::style::{PRESETS, StyleDirective};
use crate::ui::Style;

/// Lists the style presets and marks the configured default.
pub fn list_styles() -> Result<()> {
    let config = ConfigManager::new()?.load_or_default()?;
    let default_style = config
        .deepyami
        .style
        .as_deref()
        .and_then(|s| s.parse::<StyleDirective>().ok())
        .unwrap_or_default();

    println!("{}", Style::header("Styles"));
    for preset in PRESETS {
        let marker = if preset.style == default_style {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!(
            "  {}  {}{marker}",
            Style::value(format!("{:10}", preset.key)),
            Style::secondary(preset.description)
        );
        if !preset.aliases.is_empty() {
            println!(
                "  {:10}  {}",
                "",
                Style::hint(format!("also: {}", preset.aliases.join(", ")))
            );
        }
    }

    Ok(())
}
