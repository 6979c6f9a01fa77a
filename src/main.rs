use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use deepyami::cli::commands::translate::{self, ProofreadOptions, RequestFailed, TranslateOptions};
use deepyami::cli::commands::{check, configure, interactive, models, styles};
use deepyami::cli::{Args, Command};
use deepyami::output::{self, OutputConfig};
use deepyami::style::StyleError;
use deepyami::translation::{ConfigurationError, print_languages};
use deepyami::ui::Style;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        verbose: args.verbose,
        no_color: args.no_color || OutputConfig::default().no_color,
    });

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", Style::error("Error:"));
            ExitCode::from(exit_code_for(&e))
        }
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Proofread { file, request }) => {
            translate::run_proofread(ProofreadOptions { file, request }).await
        }
        Some(Command::Check { model }) => check::run_check(model).await,
        Some(Command::Interactive { to, style, model }) => {
            interactive::run_interactive(interactive::InteractiveOptions { to, style, model }).await
        }
        Some(Command::Configure { show }) => {
            if show {
                configure::show_config()
            } else {
                configure::run_configure()
            }
        }
        Some(Command::Models) => models::print_models(),
        Some(Command::Languages) => {
            print_languages();
            Ok(())
        }
        Some(Command::Styles) => styles::list_styles(),
        None => {
            translate::run_translate(TranslateOptions {
                file: args.file,
                to: args.to,
                request: args.request,
            })
            .await
        }
    }
}

fn exit_code_for(error: &anyhow::Error) -> u8 {
    let code = if error.downcast_ref::<ConfigurationError>().is_some() {
        exitcode::CONFIG
    } else if error.downcast_ref::<StyleError>().is_some() {
        exitcode::USAGE
    } else if error.downcast_ref::<RequestFailed>().is_some() {
        exitcode::UNAVAILABLE
    } else {
        1
    };
    u8::try_from(code).unwrap_or(1)
}
