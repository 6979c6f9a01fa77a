//! Translator behaviour against stub chat clients.

#![allow(clippy::unwrap_used)]

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use deepyami::style::StyleDirective;
use deepyami::translation::{
    ChatClient, ConfigurationError, Credential, FragmentStream, ModelId, Outcome, Prompt,
    ProviderFamily, ProviderSettings, Translator, create_client_by_name,
};

/// Replies with fixed fragments and records every call.
#[derive(Default)]
struct StubClient {
    fragments: Vec<&'static str>,
    fail_with: Option<&'static str>,
    /// Error yielded by the stream after all fragments were sent.
    break_stream_with: Option<&'static str>,
    calls: AtomicUsize,
    pulled: Arc<AtomicUsize>,
    prompts: Mutex<Vec<Prompt>>,
}

impl StubClient {
    fn replying(fragments: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            fragments: fragments.to_vec(),
            ..Self::default()
        })
    }

    fn failing(cause: &'static str) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(cause),
            ..Self::default()
        })
    }

    fn dropping_after(fragments: &[&'static str], cause: &'static str) -> Arc<Self> {
        Arc::new(Self {
            fragments: fragments.to_vec(),
            break_stream_with: Some(cause),
            ..Self::default()
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> Prompt {
        self.prompts.lock().unwrap().last().cloned().unwrap()
    }

    fn record(&self, prompt: &Prompt) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());
        match self.fail_with {
            Some(cause) => anyhow::bail!(cause),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ChatClient for StubClient {
    fn describe(&self) -> String {
        "stub/echo".to_string()
    }

    async fn invoke(&self, prompt: &Prompt) -> Result<String> {
        self.record(prompt)?;
        Ok(self.fragments.concat())
    }

    async fn stream(&self, prompt: &Prompt) -> Result<FragmentStream> {
        self.record(prompt)?;
        let fragments = self.fragments.clone();
        let pulled = Arc::clone(&self.pulled);
        let break_with = self.break_stream_with;
        Ok(Box::pin(async_stream::stream! {
            for fragment in fragments {
                pulled.fetch_add(1, Ordering::SeqCst);
                yield Ok(fragment.to_string());
            }
            if let Some(cause) = break_with {
                yield Err(anyhow::anyhow!(cause));
            }
        }))
    }
}

fn translator(client: &Arc<StubClient>) -> Translator {
    Translator::new(Arc::clone(client) as Arc<dyn ChatClient>)
}

#[tokio::test]
async fn test_blank_input_never_calls_the_client() {
    let client = StubClient::replying(&["unused"]);
    let translator = translator(&client);

    let outcome = translator
        .translate("  \n\t ", "English", StyleDirective::Business, None)
        .await;
    assert_eq!(outcome, Outcome::Completed(String::new()));

    let outcome = translator.proofread("  ", StyleDirective::Business, None).await;
    assert_eq!(outcome, Outcome::Completed(String::new()));

    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_blocking_translation_returns_trimmed_text() {
    let client = StubClient::replying(&["  Hello.\n"]);
    let translator = translator(&client);

    let outcome = translator
        .translate("こんにちは", "English", StyleDirective::Business, None)
        .await;

    assert_eq!(outcome, Outcome::Completed("Hello.".to_string()));
    assert_eq!(client.calls(), 1);

    let prompt = client.last_prompt();
    assert!(prompt.user.contains("<text_to_translate>\nこんにちは\n</text_to_translate>"));
    assert!(prompt.user.contains("English"));
    assert!(
        prompt
            .system
            .contains("formal business tone with polite and professional language")
    );
}

#[tokio::test]
async fn test_streaming_forwards_fragments_in_order() {
    let client = StubClient::replying(&["Bon", "jour"]);
    let translator = translator(&client);

    let mut seen = Vec::new();
    let mut sink = |fragment: &str| {
        seen.push(fragment.to_string());
        ControlFlow::Continue(())
    };

    let outcome = translator
        .translate("Hello", "French", StyleDirective::Standard, Some(&mut sink))
        .await;

    assert_eq!(outcome, Outcome::Completed("Bonjour".to_string()));
    assert_eq!(seen, vec!["Bon", "jour"]);
}

#[tokio::test]
async fn test_sink_break_cancels_and_stops_pulling() {
    let client = StubClient::replying(&["Bon", "jour", "!"]);
    let translator = translator(&client);

    let mut seen = Vec::new();
    let mut sink = |fragment: &str| {
        seen.push(fragment.to_string());
        ControlFlow::Break(())
    };

    let outcome = translator
        .translate("Hello", "French", StyleDirective::Business, Some(&mut sink))
        .await;

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(seen, vec!["Bon"]);
    assert_eq!(client.pulled.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_client_error_becomes_failed_outcome() {
    let client = StubClient::failing("API request failed with status 401");
    let translator = translator(&client);

    let outcome = translator
        .translate("Hello", "Japanese", StyleDirective::Business, None)
        .await;

    let Outcome::Failed(cause) = outcome else {
        panic!("expected a failure, got {outcome:?}");
    };
    assert!(cause.contains("401"));

    let mut sink = |_: &str| ControlFlow::Continue(());
    let outcome = translator
        .proofread("Hello", StyleDirective::Friend, Some(&mut sink))
        .await;
    assert!(matches!(outcome, Outcome::Failed(_)));
}

#[tokio::test]
async fn test_error_mid_stream_becomes_failed_outcome() {
    let client = StubClient::dropping_after(&["Bon"], "connection reset");
    let translator = translator(&client);

    let mut seen = Vec::new();
    let mut sink = |fragment: &str| {
        seen.push(fragment.to_string());
        ControlFlow::Continue(())
    };

    let outcome = translator
        .translate("Hello", "French", StyleDirective::Business, Some(&mut sink))
        .await;

    let Outcome::Failed(cause) = outcome else {
        panic!("expected a failure, got {outcome:?}");
    };
    assert!(cause.contains("connection reset"));
    assert_eq!(seen, vec!["Bon"]);
}

#[tokio::test]
async fn test_proofread_keeps_language_and_wraps_text() {
    let client = StubClient::replying(&["Thank you for your help."]);
    let translator = translator(&client);

    let outcome = translator
        .proofread("Thanks for you help.", StyleDirective::Standard, None)
        .await;
    assert_eq!(outcome.text(), Some("Thank you for your help."));

    let prompt = client.last_prompt();
    assert!(prompt.user.contains("<text_to_proofread>"));
    assert!(!prompt.system.contains("Use formal"));
    assert!(!prompt.system.contains("Use friendly"));
}

#[tokio::test]
async fn test_connection_check() {
    let client = StubClient::replying(&["こんにちは"]);
    let check = translator(&client).test_connection().await;
    assert!(check.success);
    assert!(check.message.contains("stub/echo"));
    assert!(client.last_prompt().user.contains("Hello"));

    let empty = StubClient::replying(&["   "]);
    assert!(!translator(&empty).test_connection().await.success);

    let failing = StubClient::failing("connection refused");
    let check = translator(&failing).test_connection().await;
    assert!(!check.success);
    assert!(check.message.contains("connection refused"));
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let client = StubClient::replying(&["ok"]);
    let translator = translator(&client);

    let tasks: Vec<_> = (0..4)
        .map(|i| {
            let translator = translator.clone();
            tokio::spawn(async move {
                translator
                    .translate(&format!("text {i}"), "Korean", StyleDirective::Business, None)
                    .await
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), Outcome::Completed("ok".to_string()));
    }
    assert_eq!(client.calls(), 4);
}

#[test]
fn test_unsupported_model_is_a_configuration_error() {
    let result = create_client_by_name("llama-3", Credential::new(ProviderFamily::OpenAi, "k"));
    assert!(matches!(result, Err(ConfigurationError::UnsupportedModel(_))));
}

#[test]
fn test_from_settings_rejects_blank_key() {
    let result = Translator::from_settings(ProviderSettings {
        model: ModelId::GptMini,
        credential: Credential::new(ProviderFamily::OpenAi, "  "),
    });
    assert!(matches!(
        result,
        Err(ConfigurationError::MissingCredential { model: ModelId::GptMini })
    ));
}
