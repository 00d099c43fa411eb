//! Story generation request.

use crate::{AgeBand, GenerationParams, StoryMode};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One story-generation call, consumed once by the generator.
///
/// # Examples
///
/// ```
/// use taleweaver_core::{AgeBand, GenerationRequest, StoryMode};
///
/// let request = GenerationRequest::builder()
///     .prompt_text("An interactive adventure about dragons")
///     .mode(StoryMode::continuation("Follow the dragon"))
///     .age_band(AgeBand::EarlyReader)
///     .genre("fantasy")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.previous_choice(), Some("Follow the dragon"));
/// assert_eq!(*request.max_tokens(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct GenerationRequest {
    /// Theme for fresh stories, the story so far for continuations and endings
    prompt_text: String,
    /// Fresh, continuation or ending
    #[builder(default)]
    mode: StoryMode,
    /// Reader's age band, if known
    #[builder(default)]
    age_band: Option<AgeBand>,
    /// Optional genre hint
    #[builder(default, setter(into, strip_option))]
    genre: Option<String>,
    /// Named characters to feature, in order
    #[builder(default)]
    characters: Vec<String>,
    /// Optional setting hint
    #[builder(default, setter(into, strip_option))]
    setting: Option<String>,
    /// Maximum tokens to generate
    #[builder(default = "1000")]
    max_tokens: u32,
    /// Sampling temperature
    #[builder(default = "0.7")]
    temperature: f32,
}

impl GenerationRequest {
    /// Creates a new builder for GenerationRequest.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// The reader's previous choice; present iff the mode is a continuation.
    pub fn previous_choice(&self) -> Option<&str> {
        self.mode.previous_choice()
    }

    /// Sampling parameters to forward to providers.
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
