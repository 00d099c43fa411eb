//! Text-to-speech client for the `/audio/speech` endpoint.

use super::OPENAI_API_URL;
use crate::openai::SpeechPayload;
use crate::transport::{
    DEFAULT_TIMEOUT, ensure_success, key_probe, missing_key, transport_error, trim_base,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use taleweaver_core::SpeechRequest;
use taleweaver_error::{ProviderError, ProviderErrorKind, TaleweaverResult};
use taleweaver_interface::{Probe, Provider, SpeechSynthesizer};
use tracing::{debug, instrument};

const PROVIDER: &str = "openai-speech";

/// Narration client for OpenAI-compatible speech synthesis.
#[derive(Debug, Clone)]
pub struct OpenAISpeechClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAISpeechClient {
    /// Creates a new speech client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key; empty means not configured
    /// * `model` - Speech model (e.g., "tts-1")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENAI_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different compatible host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base(base_url);
        self
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Provider for OpenAISpeechClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn availability(&self) -> Probe {
        key_probe(PROVIDER, &self.api_key)
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAISpeechClient {
    #[instrument(skip(self, request), fields(voice = %request.voice, chars = request.text.chars().count()))]
    async fn synthesize(&self, request: &SpeechRequest) -> TaleweaverResult<Vec<u8>> {
        if self.api_key.trim().is_empty() {
            return Err(missing_key(PROVIDER).into());
        }

        let payload = SpeechPayload {
            model: self.model.clone(),
            input: request.text.clone(),
            voice: request.voice.clone(),
            response_format: request.format.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let response = ensure_success(PROVIDER, response).await?;
        let audio = response.bytes().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "Failed to read audio stream: {}",
                e
            )))
        })?;

        if audio.is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::EmptyResponse).into());
        }

        debug!(bytes = audio.len(), "Received narration audio");
        Ok(audio.to_vec())
    }
}
