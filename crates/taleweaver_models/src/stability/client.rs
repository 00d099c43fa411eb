use crate::stability::{TextPrompt, TextToImageRequest, TextToImageResponse};
use crate::transport::{
    DEFAULT_TIMEOUT, decode_json, ensure_success, key_probe, missing_key, probe_response,
    transport_error, trim_base,
};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use std::time::Duration;
use taleweaver_core::ImageRequest;
use taleweaver_error::{ProviderError, ProviderErrorKind, TaleweaverResult};
use taleweaver_interface::{ImageGenerator, Probe, Provider};
use tracing::{debug, instrument, warn};

const STABILITY_API_URL: &str = "https://api.stability.ai";
const PROVIDER: &str = "stability";

/// Stability AI text-to-image client.
#[derive(Debug, Clone)]
pub struct StabilityImageClient {
    client: Client,
    api_key: String,
    engine: String,
    base_url: String,
    timeout: Duration,
}

impl StabilityImageClient {
    /// Creates a new image client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Stability API key; empty means not configured
    /// * `engine` - Engine id (e.g., "stable-diffusion-xl-1024-v1-0")
    pub fn new(api_key: impl Into<String>, engine: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            engine: engine.into(),
            base_url: STABILITY_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base(base_url);
        self
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn convert_request(request: &ImageRequest) -> TextToImageRequest {
        TextToImageRequest {
            text_prompts: vec![TextPrompt {
                text: request.prompt().clone(),
                weight: 1.0,
            }],
            cfg_scale: *request.cfg_scale(),
            height: *request.height(),
            width: *request.width(),
            steps: *request.steps(),
            samples: 1,
            seed: *request.seed(),
        }
    }
}

#[async_trait]
impl Provider for StabilityImageClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn availability(&self) -> Probe {
        key_probe(PROVIDER, &self.api_key)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Probe {
        self.availability()?;
        let result = self
            .client
            .get(format!("{}/v1/user/account", self.base_url))
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await;
        probe_response(result)
    }
}

#[async_trait]
impl ImageGenerator for StabilityImageClient {
    #[instrument(skip(self, request), fields(engine = %self.engine, seed = ?request.seed()))]
    async fn generate_image(&self, request: &ImageRequest) -> TaleweaverResult<Vec<u8>> {
        if self.api_key.trim().is_empty() {
            return Err(missing_key(PROVIDER).into());
        }

        let body = Self::convert_request(request);
        let response = self
            .client
            .post(format!(
                "{}/v1/generation/{}/text-to-image",
                self.base_url, self.engine
            ))
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let response = ensure_success(PROVIDER, response).await?;
        let parsed: TextToImageResponse = decode_json(PROVIDER, response).await?;

        let artifact = parsed
            .artifacts
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::EmptyResponse))?;

        if let Some(reason) = artifact
            .finish_reason
            .as_deref()
            .filter(|reason| *reason != "SUCCESS")
        {
            warn!(reason, "Image generation did not finish cleanly");
            return Err(ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "artifact finished with {}",
                reason
            )))
            .into());
        }

        let png = STANDARD.decode(artifact.base64.as_bytes()).map_err(|e| {
            ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
                "Invalid base64 image: {}",
                e
            )))
        })?;

        debug!(bytes = png.len(), "Decoded illustration");
        Ok(png)
    }
}
