//! OpenAI-compatible adapters: chat completions and audio speech.

mod chat;
mod dto;
mod speech;

pub use chat::OpenAIChatClient;
pub use dto::{
    ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatUsage,
    SpeechPayload,
};
pub use speech::OpenAISpeechClient;

/// Default base URL for OpenAI endpoints.
pub(crate) const OPENAI_API_URL: &str = "https://api.openai.com/v1";
