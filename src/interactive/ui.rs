//! Interactive mode UI components.

use super::command::SLASH_COMMANDS;
use super::session::SessionConfig;
use crate::config::SessionState;
use crate::translation::display_name;
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PREVIEW_CHARS: usize = 60;

pub fn print_header(config: &SessionConfig) {
    println!(
        "{} {} - Interactive Translation Mode",
        Style::header("deepyami"),
        Style::version(format!("v{VERSION}"))
    );
    println!(
        "{}",
        Style::secondary(format!(
            "{} → {}, {} style",
            display_name(&config.source_language),
            display_name(&config.target_language),
            config.style
        ))
    );
    println!();
}

pub fn print_last_session(session: &SessionState) {
    if session.is_empty() {
        return;
    }
    println!("{}", Style::label("Last session"));
    println!("  {}", Style::secondary(preview(&session.last_source_text)));
    println!("  {}", Style::secondary(preview(&session.last_target_text)));
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_success(message: &str) {
    println!("{} {message}", Style::success("✓"));
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}

pub fn print_config(config: &SessionConfig, client: Option<&str>) {
    let model = config.model.as_deref().unwrap_or("(not set)");

    println!("{}", Style::header("Configuration"));
    println!("  {}     {}", Style::label("mode"), Style::value(config.mode.name()));
    println!("  {}    {}", Style::label("model"), Style::value(model));
    println!("  {}    {}", Style::label("style"), Style::value(config.style));
    println!("  {}     {}", Style::label("from"), Style::value(&config.source_language));
    println!("  {}       {}", Style::label("to"), Style::value(&config.target_language));
    if let Some(client) = client {
        println!("  {}   {}", Style::label("client"), Style::secondary(client));
    }
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    for (command, description) in SLASH_COMMANDS {
        println!(
            "  {}  {}",
            Style::command(format!("{command:8}")),
            Style::secondary(description)
        );
    }
    println!();
    println!(
        "  {}",
        Style::hint("/set to <language>, /set style <business|standard|friend>, /set model <name>")
    );
    println!();
}

/// First line of `text`, shortened to a fixed number of characters.
fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS || text.lines().nth(1).is_some() {
        let head: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{head}…")
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text() {
        assert_eq!(preview("Hello"), "Hello");
    }

    #[test]
    fn test_preview_truncates_long_and_multiline_text() {
        let long = "あ".repeat(PREVIEW_CHARS + 5);
        assert_eq!(preview(&long).chars().count(), PREVIEW_CHARS + 1);
        assert_eq!(preview("first\nsecond"), "first…");
    }
}
