mod client;
mod content;
mod language;
mod model;
mod prompt;
mod providers;
mod sse_parser;
mod translator;

pub use client::{ChatClient, FragmentStream, create_client, create_client_by_name};
pub use content::extract_text;
pub use language::{
    CHINESE_SIMPLIFIED, CHINESE_TRADITIONAL, ENGLISH, JAPANESE, KOREAN, LanguageTag,
    SUPPORTED_LANGUAGES, auto_target, detect_language, display_name, find_language,
    print_languages, validate_language,
};
pub use model::{
    ConfigurationError, Credential, ModelId, ModelSpec, ProviderFamily, ProviderSettings,
    Reasoning, TEMPERATURE,
};
pub use prompt::{Prompt, build_proofread_prompt, build_translation_prompt};
pub use providers::{AnthropicClient, GeminiClient, OpenAiClient};
pub use sse_parser::sse_data_stream;
pub use translator::{ChannelSink, ConnectionCheck, FragmentSink, Outcome, Translator};
