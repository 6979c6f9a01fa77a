use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "deepyami")]
#[command(about = "Translate and proofread text with OpenAI, Anthropic and Gemini models")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Target language (e.g. English, Japanese, ko, zh-TW)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    #[command(flatten)]
    pub request: RequestArgs,

    /// Suppress status messages
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by every command that talks to a model.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct RequestArgs {
    /// Translation style (business, standard, friend)
    #[arg(short = 's', long)]
    pub style: Option<String>,

    /// Model (gpt, gpt-mini, claude, claude-haiku, gemini, gemini-flash)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Wait for the full response instead of streaming it
    #[arg(long)]
    pub no_stream: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Proofread text in its original language
    Proofread {
        /// File to proofread (reads from stdin if not provided)
        file: Option<PathBuf>,

        #[command(flatten)]
        request: RequestArgs,
    },
    /// Check the API key and connection for a model
    Check {
        /// Model to check (defaults to the configured model)
        #[arg(short = 'm', long)]
        model: Option<String>,
    },
    /// Interactive translation session
    #[command(alias = "chat")]
    Interactive {
        /// Target language
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        /// Translation style
        #[arg(short = 's', long)]
        style: Option<String>,

        /// Model name
        #[arg(short = 'm', long)]
        model: Option<String>,
    },
    /// Configure the default model, API keys and languages
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// List supported models
    Models,
    /// List supported languages
    Languages,
    /// List translation styles
    Styles,
}
