use crate::anthropic::{AnthropicMessage, AnthropicRequest, AnthropicResponse};
use crate::transport::{
    DEFAULT_TIMEOUT, decode_json, ensure_success, key_probe, missing_key, probe_response,
    transport_error, trim_base,
};
use crate::{LlmMetrics, classify_error};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use taleweaver_core::{GenerationParams, StoryPrompt};
use taleweaver_error::{ProviderError, ProviderErrorKind, TaleweaverResult};
use taleweaver_interface::{Probe, Provider, StoryProvider};
use tracing::{debug, instrument};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const PROVIDER: &str = "anthropic";

/// Anthropic API client.
///
/// Sends the whole instruction as a single user turn, system guidance first.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl AnthropicClient {
    /// Creates a new Anthropic client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key; empty means not configured
    /// * `model` - Model identifier (e.g., "claude-3-5-haiku-latest")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new Anthropic client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: ANTHROPIC_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different host (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base(base_url);
        self
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the wire request for a prompt.
    fn convert_request(
        &self,
        prompt: &StoryPrompt,
        params: &GenerationParams,
    ) -> Result<AnthropicRequest, ProviderError> {
        AnthropicRequest::builder()
            .model(&self.model)
            .max_tokens(params.max_tokens)
            .temperature(params.temperature)
            .messages(vec![AnthropicMessage::user(prompt.instruction_text())])
            .build()
            .map_err(|e| ProviderError::new(ProviderErrorKind::Builder(e.to_string())))
    }

    /// Sends a request to the Anthropic API.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn generate_anthropic(
        &self,
        request: &AnthropicRequest,
    ) -> Result<AnthropicResponse, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(missing_key(PROVIDER));
        }
        debug!("Sending request to Anthropic API");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .timeout(self.timeout)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let response = ensure_success(PROVIDER, response).await?;
        let anthropic_response: AnthropicResponse = decode_json(PROVIDER, response).await?;

        debug!(response_id = %anthropic_response.id, "Received response from Anthropic");
        Ok(anthropic_response)
    }
}

#[async_trait]
impl Provider for AnthropicClient {
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
            .get(format!("{}/v1/models", self.base_url))
            .timeout(self.timeout)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .send()
            .await;
        probe_response(result)
    }
}

#[async_trait]
impl StoryProvider for AnthropicClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, prompt, params), fields(provider = PROVIDER, model = %self.model))]
    async fn generate(
        &self,
        prompt: &StoryPrompt,
        params: &GenerationParams,
    ) -> TaleweaverResult<String> {
        let metrics = LlmMetrics::get();
        let started = Instant::now();

        let result: Result<String, ProviderError> = async {
            let request = self.convert_request(prompt, params)?;
            let response = self.generate_anthropic(&request).await?;
            if let Some(usage) = response.usage {
                metrics.record_tokens(
                    &self.model,
                    usage.input_tokens,
                    usage.output_tokens,
                    usage.input_tokens + usage.output_tokens,
                );
            }
            response
                .first_text()
                .filter(|text| !text.trim().is_empty())
                .map(str::to_string)
                .ok_or_else(|| ProviderError::new(ProviderErrorKind::EmptyResponse))
        }
        .await;

        match result {
            Ok(text) => {
                metrics.record_request(PROVIDER, &self.model, started.elapsed().as_secs_f64());
                Ok(text)
            }
            Err(e) => {
                metrics.record_error(PROVIDER, &self.model, classify_error(&e));
                Err(e.into())
            }
        }
    }
}
