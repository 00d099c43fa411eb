//! Data transfer objects for the Anthropic Messages API.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A message in the Anthropic conversation format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnthropicMessage {
    /// Role: "user" or "assistant"
    pub role: String,
    /// Plain-text content
    pub content: String,
}

impl AnthropicMessage {
    /// A user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Anthropic messages request.
#[derive(Debug, Clone, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct AnthropicRequest {
    /// Model identifier
    model: String,
    /// Maximum tokens to generate
    max_tokens: u32,
    /// Conversation messages
    messages: Vec<AnthropicMessage>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Optional system prompt
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

impl AnthropicRequest {
    /// Creates a new builder for AnthropicRequest.
    pub fn builder() -> AnthropicRequestBuilder {
        AnthropicRequestBuilder::default()
    }
}

/// A content block in the response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicContentBlock {
    /// Generated text
    Text {
        /// The text
        text: String,
    },
    /// Any block type this adapter does not consume
    #[serde(other)]
    Other,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct AnthropicUsage {
    /// Prompt tokens
    #[serde(default)]
    pub input_tokens: u64,
    /// Completion tokens
    #[serde(default)]
    pub output_tokens: u64,
}

/// Anthropic messages response.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicResponse {
    /// Message identifier
    #[serde(default)]
    pub id: String,
    /// Content blocks in order
    #[serde(default)]
    pub content: Vec<AnthropicContentBlock>,
    /// Why generation stopped
    #[serde(default)]
    pub stop_reason: Option<String>,
    /// Token usage
    #[serde(default)]
    pub usage: Option<AnthropicUsage>,
}

impl AnthropicResponse {
    /// Text of the first text block, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            AnthropicContentBlock::Text { text } => Some(text.as_str()),
            AnthropicContentBlock::Other => None,
        })
    }
}
