//! Data transfer objects for the Stability text-to-image API.

use serde::{Deserialize, Serialize};

/// One weighted prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPrompt {
    /// Prompt text
    pub text: String,
    /// Weight; negative values steer away
    pub weight: f32,
}

/// Text-to-image request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextToImageRequest {
    /// Prompts
    pub text_prompts: Vec<TextPrompt>,
    /// Prompt adherence
    pub cfg_scale: f32,
    /// Height in pixels
    pub height: u32,
    /// Width in pixels
    pub width: u32,
    /// Diffusion steps
    pub steps: u32,
    /// Number of images
    pub samples: u32,
    /// Seed; omitted for a random one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

/// One generated image.
#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    /// Base64-encoded PNG
    pub base64: String,
    /// Seed actually used
    #[serde(default)]
    pub seed: Option<u64>,
    /// "SUCCESS", "CONTENT_FILTERED" or "ERROR"
    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
}

/// Text-to-image response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TextToImageResponse {
    /// Generated images
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}
