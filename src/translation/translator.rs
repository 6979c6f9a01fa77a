//! Translation orchestration.
//!
//! [`Translator`] turns a request into a prompt, runs it against a
//! [`ChatClient`] in blocking or streaming mode, and folds every failure of
//! the model call into an [`Outcome`]. Nothing below this boundary can make
//! `translate` or `proofread` return an error.

use std::ops::ControlFlow;
use std::sync::Arc;

use anyhow::Result;
use futures_util::StreamExt;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::client::{ChatClient, create_client};
use super::language::JAPANESE;
use super::model::{ConfigurationError, ProviderSettings};
use super::prompt::{Prompt, build_proofread_prompt, build_translation_prompt};
use crate::style::StyleDirective;

/// Result of one translate or proofread call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The model answered; the text is trimmed and may be empty.
    Completed(String),
    /// The model call failed. Carries a human-readable cause.
    Failed(String),
    /// The sink stopped the stream. Partial output is discarded.
    Cancelled,
}

impl Outcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Completed(text) => Some(text),
            Self::Failed(_) | Self::Cancelled => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Completed(text) => Some(text),
            Self::Failed(_) | Self::Cancelled => None,
        }
    }

    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Receives streamed fragments in arrival order.
///
/// Returning [`ControlFlow::Break`] cancels the request: no further
/// fragments are read and the call ends with [`Outcome::Cancelled`].
pub trait FragmentSink: Send {
    fn accept(&mut self, fragment: &str) -> ControlFlow<()>;
}

impl<F> FragmentSink for F
where
    F: FnMut(&str) -> ControlFlow<()> + Send,
{
    fn accept(&mut self, fragment: &str) -> ControlFlow<()> {
        self(fragment)
    }
}

/// Forwards fragments to another task over a channel.
///
/// Used when the request runs on a worker task and the fragments must be
/// rendered by the task that owns the terminal. Breaks when `cancel` fires
/// or when the receiving side has gone away.
pub struct ChannelSink {
    sender: UnboundedSender<String>,
    cancel: CancellationToken,
}

impl ChannelSink {
    pub const fn new(sender: UnboundedSender<String>, cancel: CancellationToken) -> Self {
        Self { sender, cancel }
    }
}

impl FragmentSink for ChannelSink {
    fn accept(&mut self, fragment: &str) -> ControlFlow<()> {
        if self.cancel.is_cancelled() || self.sender.send(fragment.to_string()).is_err() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Result of [`Translator::test_connection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionCheck {
    pub success: bool,
    pub message: String,
}

/// Translates and proofreads text with one fixed chat client.
///
/// Cloning is cheap; clones share the client.
#[derive(Clone)]
pub struct Translator {
    client: Arc<dyn ChatClient>,
}

impl Translator {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    /// Builds the client described by `settings`.
    pub fn from_settings(settings: ProviderSettings) -> Result<Self, ConfigurationError> {
        create_client(settings.model, settings.credential).map(Self::new)
    }

    pub fn describe(&self) -> String {
        self.client.describe()
    }

    /// Translates `text` into `target_language`, detecting the source
    /// language automatically.
    ///
    /// Blank input returns `Completed("")` without contacting the model.
    /// With a sink the response is streamed through it.
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
        style: StyleDirective,
        sink: Option<&mut dyn FragmentSink>,
    ) -> Outcome {
        if text.trim().is_empty() {
            return Outcome::Completed(String::new());
        }

        let prompt = build_translation_prompt(text, target_language, style);
        let span = tracing::info_span!("translate", to = target_language, %style);
        self.run(prompt, sink).instrument(span).await
    }

    /// Proofreads `text` in its original language.
    pub async fn proofread(
        &self,
        text: &str,
        style: StyleDirective,
        sink: Option<&mut dyn FragmentSink>,
    ) -> Outcome {
        if text.trim().is_empty() {
            return Outcome::Completed(String::new());
        }

        let prompt = build_proofread_prompt(text, style);
        let span = tracing::info_span!("proofread", %style);
        self.run(prompt, sink).instrument(span).await
    }

    /// Translates a fixed word to check credentials and connectivity.
    pub async fn test_connection(&self) -> ConnectionCheck {
        let outcome = self
            .translate("Hello", JAPANESE.tag, StyleDirective::default(), None)
            .await;

        match outcome {
            Outcome::Completed(text) if !text.is_empty() => ConnectionCheck {
                success: true,
                message: format!("Connected to {}", self.describe()),
            },
            Outcome::Completed(_) => ConnectionCheck {
                success: false,
                message: "The model returned an empty response".to_string(),
            },
            Outcome::Failed(cause) => ConnectionCheck {
                success: false,
                message: format!("Connection failed: {cause}"),
            },
            Outcome::Cancelled => ConnectionCheck {
                success: false,
                message: "Connection test was cancelled".to_string(),
            },
        }
    }

    async fn run(&self, prompt: Prompt, sink: Option<&mut dyn FragmentSink>) -> Outcome {
        tracing::debug!(client = %self.client.describe(), streaming = sink.is_some(), "sending request");

        let result = match sink {
            Some(sink) => self.run_streaming(&prompt, sink).await,
            None => self.client.invoke(&prompt).await.map(Some),
        };

        match result {
            Ok(Some(text)) => {
                tracing::debug!(chars = text.chars().count(), "request completed");
                Outcome::Completed(text.trim().to_string())
            }
            Ok(None) => {
                tracing::debug!("request cancelled by caller");
                Outcome::Cancelled
            }
            Err(e) => {
                let cause = format!("{e:#}");
                tracing::warn!(client = %self.client.describe(), error = %cause, "request failed");
                Outcome::Failed(cause)
            }
        }
    }

    /// Returns `None` when the sink cancelled.
    async fn run_streaming(
        &self,
        prompt: &Prompt,
        sink: &mut dyn FragmentSink,
    ) -> Result<Option<String>> {
        let mut stream = self.client.stream(prompt).await?;
        let mut accumulated = String::new();

        while let Some(fragment) = stream.next().await {
            let fragment = fragment?;
            accumulated.push_str(&fragment);
            if sink.accept(&fragment).is_break() {
                return Ok(None);
            }
        }

        Ok(Some(accumulated))
    }
}
