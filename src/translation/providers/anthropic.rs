use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fragment_stream;
use crate::translation::client::{ChatClient, FragmentStream, client_label, send_checked};
use crate::translation::content::extract_text;
use crate::translation::model::{ModelSpec, ProviderFamily};
use crate::translation::prompt::Prompt;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 8192;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: [Message<'a>; 1],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Value,
}

/// One streaming event. Only the fields used here are modelled.
#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    kind: String,
    delta: Option<Value>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Client for the Anthropic messages API.
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    api_key: String,
    spec: ModelSpec,
}

impl AnthropicClient {
    pub fn new(client: Client, api_key: String, spec: ModelSpec) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            spec,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }

    fn body<'a>(&'a self, prompt: &'a Prompt, stream: bool) -> MessagesRequest<'a> {
        MessagesRequest {
            model: self.spec.model_name,
            max_tokens: MAX_TOKENS,
            temperature: self.spec.temperature,
            system: &prompt.system,
            messages: [Message {
                role: "user",
                content: &prompt.user,
            }],
            stream,
        }
    }

    async fn send(&self, prompt: &Prompt, stream: bool) -> Result<reqwest::Response> {
        let url = self.url();
        let request = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&self.body(prompt, stream));
        send_checked(request, &url).await
    }
}

#[async_trait]
impl ChatClient for AnthropicClient {
    fn describe(&self) -> String {
        client_label(ProviderFamily::Anthropic, &self.spec)
    }

    async fn invoke(&self, prompt: &Prompt) -> Result<String> {
        let response: MessagesResponse = self
            .send(prompt, false)
            .await?
            .json()
            .await
            .context("Failed to parse Anthropic response")?;

        Ok(extract_text(&response.content))
    }

    async fn stream(&self, prompt: &Prompt) -> Result<FragmentStream> {
        let response = self.send(prompt, true).await?;
        Ok(fragment_stream(response, parse_stream_event))
    }
}

fn parse_stream_event(data: &str) -> Result<Option<String>> {
    let Ok(event) = serde_json::from_str::<StreamEvent>(data) else {
        return Ok(None);
    };

    match event.kind.as_str() {
        "content_block_delta" => Ok(event.delta.as_ref().and_then(delta_text)),
        "error" => {
            let message = event.error.map_or_else(|| "unknown error".to_string(), |e| e.message);
            anyhow::bail!("Anthropic stream error: {message}")
        }
        _ => Ok(None),
    }
}

/// Text of a `text_delta`; thinking and tool deltas are ignored.
fn delta_text(delta: &Value) -> Option<String> {
    if delta.get("type").and_then(Value::as_str) != Some("text_delta") {
        return None;
    }
    delta.get("text").and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::translation::model::ModelId;

    #[test]
    fn test_body_shape() {
        let client = AnthropicClient::new(Client::new(), "k".to_string(), ModelId::ClaudeHaiku.spec());
        let prompt = Prompt {
            system: "sys".to_string(),
            user: "usr".to_string(),
        };
        let body = serde_json::to_value(client.body(&prompt, true)).unwrap();
        assert_eq!(body["model"], "claude-haiku-4-5");
        assert_eq!(body["system"], "sys");
        assert_eq!(body["max_tokens"], 8192);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[test]
    fn test_url() {
        let client = AnthropicClient::new(Client::new(), "k".to_string(), ModelId::Claude.spec())
            .with_base_url("http://proxy.local/");
        assert_eq!(client.url(), "http://proxy.local/v1/messages");
    }

    #[test]
    fn test_parse_text_delta() {
        let data = r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hi"}}"#;
        assert_eq!(parse_stream_event(data).unwrap(), Some("Hi".to_string()));
    }

    #[test]
    fn test_parse_thinking_delta_is_skipped() {
        let data = r#"{"type":"content_block_delta","index":0,"delta":{"type":"thinking_delta","thinking":"..."}}"#;
        assert_eq!(parse_stream_event(data).unwrap(), None);
    }

    #[test]
    fn test_parse_other_events_skipped() {
        for data in [
            r#"{"type":"message_start","message":{}}"#,
            r#"{"type":"content_block_start","index":0,"content_block":{"type":"text","text":""}}"#,
            r#"{"type":"ping"}"#,
            r#"{"type":"message_stop"}"#,
        ] {
            assert_eq!(parse_stream_event(data).unwrap(), None);
        }
    }

    #[test]
    fn test_parse_error_event() {
        let data = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        let err = parse_stream_event(data).unwrap_err();
        assert!(err.to_string().contains("Overloaded"));
    }

    #[test]
    fn test_response_content_blocks() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"text","text":"Hello"},{"type":"text","text":"."}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&response.content), "Hello.");
    }
}
