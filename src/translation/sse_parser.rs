//! Server-Sent Events (SSE) decoding shared by all providers.
//!
//! The decoder only deals with framing: it turns a raw byte stream into the
//! payloads of `data:` lines. Each provider parses the JSON payloads itself.

use anyhow::Result;
use bytes::Bytes;
use futures_util::Stream;

/// Converts a raw SSE byte stream into a stream of `data:` payloads.
///
/// Handles buffering across chunk boundaries, skips comments, blank lines
/// and `event:` lines, and ends at the OpenAI `[DONE]` sentinel. A transport
/// error is yielded once and ends the stream.
pub fn sse_data_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        // Bytes, not text: a chunk may end inside a multi-byte character
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {e}"));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let raw: Vec<u8> = buffer.drain(..=line_end).collect();
                let line = String::from_utf8_lossy(&raw);

                match parse_data_line(line.trim()) {
                    Some("[DONE]") => return,
                    Some(data) => yield Ok(data.to_string()),
                    None => {}
                }
            }
        }

        let rest = String::from_utf8_lossy(&buffer);
        if let Some(data) = parse_data_line(rest.trim())
            && data != "[DONE]"
        {
            yield Ok(data.to_string());
        }
    }
}

/// Returns the payload of a `data:` line.
///
/// `None` for comments, other fields and empty payloads.
fn parse_data_line(line: &str) -> Option<&str> {
    let data = line.strip_prefix("data:")?.trim_start();
    if data.is_empty() { None } else { Some(data) }
}
