//! Provider-specific chat clients.
//!
//! Each client converts a [`Prompt`](super::prompt::Prompt) into its
//! vendor's request body and normalizes responses with
//! [`extract_text`](super::content::extract_text).

mod anthropic;
mod gemini;
mod openai;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

use anyhow::Result;
use reqwest::Response;

use super::client::FragmentStream;
use super::sse_parser::sse_data_stream;

/// Parses one SSE payload into a text fragment (`None` to skip the event).
type EventParser = fn(&str) -> Result<Option<String>>;

/// Turns a streaming HTTP response into text fragments.
///
/// Empty fragments are dropped; the first error ends the stream.
fn fragment_stream(response: Response, parse: EventParser) -> FragmentStream {
    let payloads = sse_data_stream(response.bytes_stream());

    Box::pin(async_stream::stream! {
        use futures_util::StreamExt;

        let mut payloads = std::pin::pin!(payloads);

        while let Some(payload) = payloads.next().await {
            let parsed = payload.and_then(|data| parse(&data));
            match parsed {
                Ok(Some(text)) if !text.is_empty() => yield Ok(text),
                Ok(_) => {}
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }
    })
}
