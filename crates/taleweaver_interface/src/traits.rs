//! Trait definitions for external providers.

use crate::{Available, Probe};
use async_trait::async_trait;
use taleweaver_core::{
    Business, GenerationParams, ImageRequest, NearbySearch, SpeechRequest, StoryPrompt,
    TextSearch, VectorMatch, VectorRecord,
};
use taleweaver_error::TaleweaverResult;

/// Behavior shared by every external provider.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name used in logs, metrics and attempt records.
    fn name(&self) -> &str;

    /// Cheap, configuration-level check (credentials present, settings valid).
    ///
    /// Must not perform I/O.
    fn availability(&self) -> Probe {
        Ok(Available)
    }

    /// Network probe confirming the provider answers.
    ///
    /// Defaults to [`Provider::availability`].
    async fn health_check(&self) -> Probe {
        self.availability()
    }
}

/// A large-language-model backend that writes story text.
///
/// Adapters surface every failure as an error so the generator can fall back
/// to the next provider; they never retry internally.
#[async_trait]
pub trait StoryProvider: Provider {
    /// Model identifier (e.g., "claude-3-5-haiku-latest").
    fn model_name(&self) -> &str;

    /// Send the prompt and return the model's raw text.
    async fn generate(
        &self,
        prompt: &StoryPrompt,
        params: &GenerationParams,
    ) -> TaleweaverResult<String>;
}

/// A text-to-speech backend.
#[async_trait]
pub trait SpeechSynthesizer: Provider {
    /// Synthesize the text and return the encoded audio.
    async fn synthesize(&self, request: &SpeechRequest) -> TaleweaverResult<Vec<u8>>;
}

/// A text-to-image backend.
#[async_trait]
pub trait ImageGenerator: Provider {
    /// Generate one image and return its decoded PNG bytes.
    async fn generate_image(&self, request: &ImageRequest) -> TaleweaverResult<Vec<u8>>;
}

/// A geo search backend.
#[async_trait]
pub trait PlacesBackend: Provider {
    /// Businesses around a point.
    async fn search_nearby(&self, search: &NearbySearch) -> TaleweaverResult<Vec<Business>>;

    /// Businesses matching free text near a point.
    async fn search_text(&self, search: &TextSearch) -> TaleweaverResult<Vec<Business>>;
}

/// A vector database used to archive profiles and books.
#[async_trait]
pub trait VectorStore: Provider {
    /// Insert or replace records; returns the number written.
    async fn upsert(&self, records: Vec<VectorRecord>) -> TaleweaverResult<usize>;

    /// Nearest records to the given vector.
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> TaleweaverResult<Vec<VectorMatch>>;
}
