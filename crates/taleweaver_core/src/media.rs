//! Requests for the speech and image side channels.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Audio container requested from a speech provider.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AudioFormat {
    /// MPEG layer 3
    #[default]
    Mp3,
    /// Ogg Opus
    Opus,
    /// Uncompressed wave
    Wav,
}

impl AudioFormat {
    /// MIME type for the format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/ogg",
            Self::Wav => "audio/wav",
        }
    }

    /// File extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Wav => "wav",
        }
    }
}

/// Text to be read aloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Text to synthesize
    pub text: String,
    /// Provider voice identifier
    pub voice: String,
    /// Output container
    pub format: AudioFormat,
}

/// Text-to-image request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Positive prompt
    prompt: String,
    /// Width in pixels
    #[builder(default = "1024")]
    width: u32,
    /// Height in pixels
    #[builder(default = "1024")]
    height: u32,
    /// Prompt adherence
    #[builder(default = "7.0")]
    cfg_scale: f32,
    /// Diffusion steps
    #[builder(default = "30")]
    steps: u32,
    /// Seed for reproducible artwork
    #[builder(default)]
    seed: Option<u32>,
}

impl ImageRequest {
    /// Creates a new builder for ImageRequest.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}
