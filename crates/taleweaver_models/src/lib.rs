//! Provider adapters for Taleweaver.
//!
//! Each adapter wraps one external HTTP API and implements the matching
//! trait from `taleweaver_interface`.
//!
//! # Available Providers
//!
//! - **Anthropic** Messages API: primary story provider
//! - **OpenAI** chat completions: backup story provider (any compatible endpoint)
//! - **OpenAI** audio speech: narration
//! - **Stability** text-to-image: illustrations
//! - **Geoapify** and **Google Places**: local business search
//! - **Pinecone**: reader profile and book archive
//!
//! Every adapter reads its API key from the caller; an empty key makes the
//! adapter report itself as not configured instead of failing at startup.
//!
//! # Example
//!
//! ```no_run
//! use taleweaver_models::AnthropicClient;
//! use taleweaver_interface::StoryProvider;
//! use taleweaver_core::{GenerationParams, StoryPrompt};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AnthropicClient::new(std::env::var("ANTHROPIC_API_KEY")?, "claude-3-5-haiku-latest");
//! let prompt = StoryPrompt::new("You write children's stories.", "A story about a brave snail.");
//! let text = client.generate(&prompt, &GenerationParams::default()).await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anthropic;
mod metrics;
mod openai;
mod pinecone;
mod places;
mod stability;
mod transport;

pub use anthropic::{
    AnthropicClient, AnthropicContentBlock, AnthropicMessage, AnthropicRequest,
    AnthropicRequestBuilder, AnthropicResponse, AnthropicUsage,
};
pub use metrics::{LlmMetrics, classify_error};
pub use openai::{
    ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatUsage,
    OpenAIChatClient, OpenAISpeechClient, SpeechPayload,
};
pub use pinecone::PineconeClient;
pub use places::{GeoapifyPlaces, GooglePlaces};
pub use stability::{
    Artifact, StabilityImageClient, TextPrompt, TextToImageRequest, TextToImageResponse,
};
