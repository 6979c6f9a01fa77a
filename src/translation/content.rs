//! Normalization of provider message content into plain text.

use serde_json::Value;

/// Extracts the text payload of a message content value.
///
/// Providers return content either as a plain string or as a list of typed
/// parts (`[{"type": "text", "text": "..."}]`, Gemini `parts`, ...). Parts
/// are concatenated in order. Any part carrying a string `text` field counts,
/// whatever its `type`, except reasoning parts. Never fails.
pub fn extract_text(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().filter_map(part_text).collect(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Part kinds that hold model reasoning rather than answer text.
const REASONING_KINDS: [&str; 2] = ["thinking", "reasoning"];

fn part_text(item: &Value) -> Option<&str> {
    match item {
        Value::String(s) => Some(s),
        Value::Object(map) => {
            let is_reasoning_kind = map
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|kind| REASONING_KINDS.contains(&kind));
            // Gemini marks reasoning summaries with `thought: true`
            let is_thought = map.get("thought").and_then(Value::as_bool) == Some(true);
            if is_reasoning_kind || is_thought {
                None
            } else {
                map.get("text").and_then(Value::as_str)
            }
        }
        _ => None,
    }
}
