use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fragment_stream;
use crate::translation::client::{ChatClient, FragmentStream, client_label, send_checked};
use crate::translation::content::extract_text;
use crate::translation::model::{ModelSpec, ProviderFamily, Reasoning};
use crate::translation::prompt::Prompt;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<&'a str>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Value,
}

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Value,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Client for the OpenAI chat completions API.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    spec: ModelSpec,
}

impl OpenAiClient {
    pub fn new(client: Client, api_key: String, spec: ModelSpec) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            spec,
        }
    }

    /// Points the client at an OpenAI-compatible endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }

    fn body<'a>(&'a self, prompt: &'a Prompt, stream: bool) -> ChatCompletionRequest<'a> {
        let reasoning_effort = match self.spec.reasoning {
            Reasoning::Effort(effort) => Some(effort),
            Reasoning::Off | Reasoning::ThinkingBudget(_) => None,
        };

        ChatCompletionRequest {
            model: self.spec.model_name,
            messages: [
                Message {
                    role: "system",
                    content: &prompt.system,
                },
                Message {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.spec.temperature,
            reasoning_effort,
            stream,
        }
    }

    async fn send(&self, prompt: &Prompt, stream: bool) -> Result<reqwest::Response> {
        let url = self.url();
        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.body(prompt, stream));
        send_checked(request, &url).await
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    fn describe(&self) -> String {
        client_label(ProviderFamily::OpenAi, &self.spec)
    }

    async fn invoke(&self, prompt: &Prompt) -> Result<String> {
        let response: CompletionResponse = self
            .send(prompt, false)
            .await?
            .json()
            .await
            .context("Failed to parse OpenAI response")?;

        parse_completion(response)
    }

    async fn stream(&self, prompt: &Prompt) -> Result<FragmentStream> {
        let response = self.send(prompt, true).await?;
        Ok(fragment_stream(response, parse_stream_event))
    }
}

fn parse_completion(response: CompletionResponse) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .context("OpenAI response contained no choices")?;
    Ok(extract_text(&choice.message.content))
}

fn parse_stream_event(data: &str) -> Result<Option<String>> {
    // Keep-alive and unknown payloads are not fatal
    let Ok(event) = serde_json::from_str::<StreamResponse>(data) else {
        return Ok(None);
    };

    if let Some(error) = event.error {
        anyhow::bail!("OpenAI stream error: {}", error.message);
    }

    let content: String = event
        .choices
        .iter()
        .map(|c| extract_text(&c.delta.content))
        .collect();

    Ok((!content.is_empty()).then_some(content))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::translation::model::ModelId;

    fn client(model: ModelId) -> OpenAiClient {
        OpenAiClient::new(Client::new(), "sk-test".to_string(), model.spec())
    }

    fn prompt() -> Prompt {
        Prompt {
            system: "sys".to_string(),
            user: "usr".to_string(),
        }
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = client(ModelId::Gpt).with_base_url("http://localhost:8080/");
        assert_eq!(client.url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_body_includes_reasoning_effort() {
        let client = client(ModelId::Gpt);
        let prompt = prompt();
        let body = serde_json::to_value(client.body(&prompt, true)).unwrap();
        assert_eq!(body["model"], "gpt-5.1");
        assert_eq!(body["reasoning_effort"], "none");
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "usr");
    }

    #[test]
    fn test_body_omits_reasoning_when_off() {
        let client = client(ModelId::GptMini);
        let prompt = prompt();
        let body = serde_json::to_value(client.body(&prompt, false)).unwrap();
        assert!(body.get("reasoning_effort").is_none());
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_parse_stream_event_with_content() {
        let data = r#"{"choices":[{"delta":{"content":"Hello"}}]}"#;
        assert_eq!(parse_stream_event(data).unwrap(), Some("Hello".to_string()));
    }

    #[test]
    fn test_parse_stream_event_empty_content() {
        let data = r#"{"choices":[{"delta":{"content":""}}]}"#;
        assert_eq!(parse_stream_event(data).unwrap(), None);
    }

    #[test]
    fn test_parse_stream_event_null_content() {
        let data = r#"{"choices":[{"delta":{}}]}"#;
        assert_eq!(parse_stream_event(data).unwrap(), None);
    }

    #[test]
    fn test_parse_stream_event_multiple_choices() {
        let data = r#"{"choices":[{"delta":{"content":"Hello"}},{"delta":{"content":" World"}}]}"#;
        assert_eq!(
            parse_stream_event(data).unwrap(),
            Some("Hello World".to_string())
        );
    }

    #[test]
    fn test_parse_stream_event_invalid_json_is_skipped() {
        assert_eq!(parse_stream_event("not json").unwrap(), None);
    }

    #[test]
    fn test_parse_stream_event_error() {
        let data = r#"{"error":{"message":"rate limited"}}"#;
        let err = parse_stream_event(data).unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn test_parse_completion_string_content() {
        let response: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"Bonjour"}}]}"#).unwrap();
        assert_eq!(parse_completion(response).unwrap(), "Bonjour");
    }

    #[test]
    fn test_parse_completion_part_content() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":[{"type":"text","text":"Bon"},{"type":"text","text":"jour"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(parse_completion(response).unwrap(), "Bonjour");
    }

    #[test]
    fn test_parse_completion_no_choices() {
        let response: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(parse_completion(response).is_err());
    }
}
