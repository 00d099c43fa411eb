//! Stability AI text-to-image adapter.

mod client;
mod dto;

pub use client::StabilityImageClient;
pub use dto::{Artifact, TextPrompt, TextToImageRequest, TextToImageResponse};
