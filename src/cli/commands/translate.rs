use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::cli::args::RequestArgs;
use crate::config::{ResolveOptions, load_resolved};
use crate::input::InputReader;
use crate::status;
use crate::style::StyleDirective;
use crate::translation::{ChannelSink, FragmentSink, Outcome, Translator, auto_target, find_language};
use crate::ui::{Spinner, Style};

/// A model request failed after the client was built.
#[derive(Debug, thiserror::Error)]
#[error("{task} failed: {cause}")]
pub struct RequestFailed {
    pub task: &'static str,
    pub cause: String,
}

/// What to do with the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    Translate { target_language: String },
    Proofread,
}

impl Job {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Translate { .. } => "Translation",
            Self::Proofread => "Proofreading",
        }
    }

    const fn progress_message(&self) -> &'static str {
        match self {
            Self::Translate { .. } => "Translating...",
            Self::Proofread => "Proofreading...",
        }
    }
}

pub struct TranslateOptions {
    pub file: Option<PathBuf>,
    pub to: Option<String>,
    pub request: RequestArgs,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let resolved = load_resolved(&ResolveOptions {
        model: options.request.model.clone(),
        style: options.request.style.clone(),
        to: options.to.clone(),
    })?;
    let translator = Translator::from_settings(resolved.settings)?;

    let text = InputReader::read(options.file.as_deref())?;

    // An explicit --to is always honored; the configured target may be
    // swapped when the input is already written in it.
    let target_language = match options.to {
        Some(to) => to,
        None => auto_target(&text, &resolved.target_language, &resolved.source_language).to_string(),
    };
    if find_language(&target_language).is_none() {
        status!(
            "{} '{target_language}' is not a built-in language, sending it to the model as-is",
            Style::warning("Note:")
        );
    }

    let job = Job::Translate { target_language };
    let outcome = execute(&translator, job.clone(), text, resolved.style, !options.request.no_stream).await?;
    finish(&job, outcome)
}

pub struct ProofreadOptions {
    pub file: Option<PathBuf>,
    pub request: RequestArgs,
}

pub async fn run_proofread(options: ProofreadOptions) -> Result<()> {
    let resolved = load_resolved(&ResolveOptions {
        model: options.request.model.clone(),
        style: options.request.style.clone(),
        to: None,
    })?;
    let translator = Translator::from_settings(resolved.settings)?;

    let text = InputReader::read(options.file.as_deref())?;

    let job = Job::Proofread;
    let outcome = execute(&translator, job.clone(), text, resolved.style, !options.request.no_stream).await?;
    finish(&job, outcome)
}

fn finish(job: &Job, outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Completed(_) => Ok(()),
        Outcome::Cancelled => {
            status!("{}", Style::warning("Cancelled"));
            Ok(())
        }
        Outcome::Failed(cause) => Err(RequestFailed {
            task: job.name(),
            cause,
        }
        .into()),
    }
}

/// Runs `job` on a worker task and renders the result to stdout.
///
/// Streamed fragments are printed as they arrive. Ctrl+C cancels the
/// request and abandons the worker.
pub async fn execute(
    translator: &Translator,
    job: Job,
    text: String,
    style: StyleDirective,
    stream: bool,
) -> Result<Outcome> {
    let message = job.progress_message();
    let cancel = CancellationToken::new();
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    let worker = {
        let translator = translator.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let mut sink = ChannelSink::new(sender, cancel);
            let sink = if stream {
                Some(&mut sink as &mut dyn FragmentSink)
            } else {
                None
            };
            match job {
                Job::Translate { target_language } => {
                    translator.translate(&text, &target_language, style, sink).await
                }
                Job::Proofread => translator.proofread(&text, style, sink).await,
            }
        })
    };

    let spinner = Spinner::new(message);
    let mut stdout = io::stdout();
    let mut streamed = false;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            fragment = receiver.recv() => {
                let Some(fragment) = fragment else { break };
                if !streamed {
                    spinner.stop();
                    streamed = true;
                }
                write!(stdout, "{fragment}")?;
                stdout.flush()?;
            }
            _ = &mut ctrl_c => {
                cancel.cancel();
                receiver.close();
                break;
            }
        }
    }
    spinner.stop();

    if cancel.is_cancelled() {
        worker.abort();
        if streamed {
            writeln!(stdout)?;
        }
        return Ok(Outcome::Cancelled);
    }

    let outcome = worker.await.context("Translation worker stopped unexpectedly")?;

    match &outcome {
        Outcome::Completed(_) if streamed => writeln!(stdout)?,
        Outcome::Completed(text) if !text.is_empty() => writeln!(stdout, "{text}")?,
        Outcome::Failed(_) if streamed => writeln!(stdout)?,
        _ => {}
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_names() {
        let job = Job::Translate {
            target_language: "English".to_string(),
        };
        assert_eq!(job.name(), "Translation");
        assert_eq!(job.progress_message(), "Translating...");
        assert_eq!(Job::Proofread.name(), "Proofreading");
    }

    #[test]
    fn test_request_failed_message() {
        let err = RequestFailed {
            task: "Translation",
            cause: "API request failed with status 401".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Translation failed: API request failed with status 401"
        );
    }
}
