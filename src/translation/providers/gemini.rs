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

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Value,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Client for the Gemini `generateContent` API.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    spec: ModelSpec,
}

impl GeminiClient {
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

    fn url(&self, stream: bool) -> String {
        let method = if stream {
            "streamGenerateContent?alt=sse"
        } else {
            "generateContent"
        };
        format!(
            "{}/v1beta/models/{}:{method}",
            self.base_url.trim_end_matches('/'),
            self.spec.model_name
        )
    }

    fn body<'a>(&self, prompt: &'a Prompt) -> GenerateContentRequest<'a> {
        let thinking_config = match self.spec.reasoning {
            Reasoning::ThinkingBudget(thinking_budget) => Some(ThinkingConfig { thinking_budget }),
            Reasoning::Off | Reasoning::Effort(_) => None,
        };

        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: &prompt.system,
                }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part { text: &prompt.user }],
            }],
            generation_config: GenerationConfig {
                temperature: self.spec.temperature,
                thinking_config,
            },
        }
    }

    async fn send(&self, prompt: &Prompt, stream: bool) -> Result<reqwest::Response> {
        let url = self.url(stream);
        let request = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.body(prompt));
        send_checked(request, &url).await
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    fn describe(&self) -> String {
        client_label(ProviderFamily::Google, &self.spec)
    }

    async fn invoke(&self, prompt: &Prompt) -> Result<String> {
        let response: GenerateContentResponse = self
            .send(prompt, false)
            .await?
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        response_text(response)
    }

    async fn stream(&self, prompt: &Prompt) -> Result<FragmentStream> {
        let response = self.send(prompt, true).await?;
        Ok(fragment_stream(response, parse_stream_event))
    }
}

/// Text of the first candidate. Blocked or empty candidates yield "".
fn response_text(response: GenerateContentResponse) -> Result<String> {
    if let Some(error) = response.error {
        anyhow::bail!("Gemini error: {}", error.message);
    }

    Ok(response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| extract_text(&c.parts))
        .unwrap_or_default())
}

fn parse_stream_event(data: &str) -> Result<Option<String>> {
    let Ok(chunk) = serde_json::from_str::<GenerateContentResponse>(data) else {
        return Ok(None);
    };
    let text = response_text(chunk)?;
    Ok((!text.is_empty()).then_some(text))
}
