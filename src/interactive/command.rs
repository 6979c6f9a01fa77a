use inquire::autocompletion::{Autocomplete, Replacement};

// (command, description)
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/config", "Show current settings"),
    ("/help", "Show available commands"),
    ("/mode", "Switch between translate and proofread"),
    ("/set", "Change to, style or model"),
    ("/swap", "Swap source and target languages"),
    ("/quit", "Exit interactive mode"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') || input.contains(' ') {
            return Ok(vec![]);
        }

        Ok(SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        Ok(highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string()))
    }
}

/// Which operation plain text lines go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Translate,
    Proofread,
}

impl Mode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Translate => Self::Proofread,
            Self::Proofread => Self::Translate,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Proofread => "proofread",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "translate" | "t" => Some(Self::Translate),
            "proofread" | "p" => Some(Self::Proofread),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Config,
    Help,
    /// `None` toggles.
    Mode(Option<Mode>),
    Set { key: String, value: Option<String> },
    Swap,
    Quit,
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    let command = match parts.as_slice() {
        ["config"] => SlashCommand::Config,
        ["help" | "?"] => SlashCommand::Help,
        ["mode"] => SlashCommand::Mode(None),
        ["mode", mode] => match Mode::parse(mode) {
            Some(mode) => SlashCommand::Mode(Some(mode)),
            None => SlashCommand::Unknown(parts.join(" ")),
        },
        ["set"] => SlashCommand::Set {
            key: String::new(),
            value: None,
        },
        ["set", key] => SlashCommand::Set {
            key: key.to_ascii_lowercase(),
            value: None,
        },
        // Language names may contain spaces
        ["set", key, rest @ ..] => SlashCommand::Set {
            key: key.to_ascii_lowercase(),
            value: Some(rest.join(" ")),
        },
        ["swap"] => SlashCommand::Swap,
        ["quit" | "exit" | "q"] => SlashCommand::Quit,
        _ => SlashCommand::Unknown(parts.join(" ")),
    };

    Input::Command(command)
}
