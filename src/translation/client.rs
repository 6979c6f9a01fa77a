use std::pin::Pin;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::Stream;
use reqwest::{RequestBuilder, Response};

use super::model::{ConfigurationError, Credential, ModelId, ModelSpec, ProviderFamily, ProviderSettings};
use super::prompt::Prompt;
use super::providers::{AnthropicClient, GeminiClient, OpenAiClient};

/// A stream of text fragments, already normalized to plain text.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// A chat-completion capable model.
///
/// Implementations hide the provider wire format: they accept a system/user
/// prompt and return plain text, either at once or as fragments.
/// Implementations are immutable after construction and may be shared
/// between concurrent calls.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Short description for logs, e.g. `anthropic/claude-haiku-4-5`.
    fn describe(&self) -> String;

    /// Sends the prompt and waits for the full response.
    async fn invoke(&self, prompt: &Prompt) -> Result<String>;

    /// Sends the prompt and returns the response as it is generated.
    async fn stream(&self, prompt: &Prompt) -> Result<FragmentStream>;
}

/// Builds the client for `model`, authenticated with `credential`.
///
/// No request is made here; the first network call happens on the first
/// `invoke` or `stream`.
pub fn create_client(
    model: ModelId,
    credential: Credential,
) -> Result<Arc<dyn ChatClient>, ConfigurationError> {
    let settings = ProviderSettings { model, credential };
    settings.validate()?;

    let spec = model.spec();
    let http = reqwest::Client::new();
    let api_key = settings.credential.secret().to_string();

    tracing::debug!(model = %model, name = spec.model_name, "creating chat client");

    Ok(match model.family() {
        ProviderFamily::OpenAi => Arc::new(OpenAiClient::new(http, api_key, spec)),
        ProviderFamily::Anthropic => Arc::new(AnthropicClient::new(http, api_key, spec)),
        ProviderFamily::Google => Arc::new(GeminiClient::new(http, api_key, spec)),
    })
}

/// Parses a model identifier string and builds its client.
pub fn create_client_by_name(
    model: &str,
    credential: Credential,
) -> Result<Arc<dyn ChatClient>, ConfigurationError> {
    create_client(model.parse()?, credential)
}

/// Sends a request and fails on non-success HTTP status.
pub(crate) async fn send_checked(request: RequestBuilder, url: &str) -> Result<Response> {
    let response = request
        .send()
        .await
        .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("API request failed with status {status}: {body}");
    }

    Ok(response)
}

pub(crate) fn client_label(family: ProviderFamily, spec: &ModelSpec) -> String {
    format!("{family}/{}", spec.model_name)
}
