//! Chat completions client, used as the backup story provider.

use super::OPENAI_API_URL;
use crate::openai::{ChatMessage, ChatRequest, ChatResponse};
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

/// Client for any OpenAI-compatible chat completions endpoint.
///
/// System and user instructions travel as separate messages.
#[derive(Debug, Clone)]
pub struct OpenAIChatClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    provider_name: String,
    timeout: Duration,
}

impl OpenAIChatClient {
    /// Creates a new chat client against the OpenAI API.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for authentication; empty means not configured
    /// * `model` - Model identifier (e.g., "gpt-4o-mini")
    #[instrument(skip(api_key, model))]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        debug!(model = %model, "Created OpenAI chat client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model,
            base_url: OPENAI_API_URL.to_string(),
            provider_name: "openai".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different compatible host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base(base_url);
        self
    }

    /// Name reported in attempts and metrics.
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn convert_request(
        &self,
        prompt: &StoryPrompt,
        params: &GenerationParams,
    ) -> Result<ChatRequest, ProviderError> {
        ChatRequest::builder()
            .model(&self.model)
            .messages(vec![
                ChatMessage::system(&prompt.system),
                ChatMessage::user(&prompt.user),
            ])
            .max_tokens(params.max_tokens)
            .temperature(params.temperature)
            .build()
            .map_err(|e| ProviderError::new(ProviderErrorKind::Builder(e.to_string())))
    }

    /// Sends a chat completion request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self, request), fields(provider = %self.provider_name, model = %self.model))]
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(missing_key(&self.provider_name));
        }
        debug!(
            message_count = request.messages().len(),
            "Sending request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(&self.provider_name, e))?;

        let response = ensure_success(&self.provider_name, response).await?;
        let chat_response: ChatResponse = decode_json(&self.provider_name, response).await?;

        debug!(choices = chat_response.choices.len(), "Received response");
        Ok(chat_response)
    }
}

#[async_trait]
impl Provider for OpenAIChatClient {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn availability(&self) -> Probe {
        key_probe(&self.provider_name, &self.api_key)
    }

    #[instrument(skip(self), fields(provider = %self.provider_name))]
    async fn health_check(&self) -> Probe {
        self.availability()?;
        let result = self
            .client
            .get(format!("{}/models", self.base_url))
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await;
        probe_response(result)
    }
}

#[async_trait]
impl StoryProvider for OpenAIChatClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, prompt, params), fields(provider = %self.provider_name, model = %self.model))]
    async fn generate(
        &self,
        prompt: &StoryPrompt,
        params: &GenerationParams,
    ) -> TaleweaverResult<String> {
        let metrics = LlmMetrics::get();
        let started = Instant::now();

        let result: Result<String, ProviderError> = async {
            let request = self.convert_request(prompt, params)?;
            let response = self.complete(&request).await?;
            if let Some(usage) = response.usage {
                metrics.record_tokens(
                    &self.model,
                    usage.prompt_tokens,
                    usage.completion_tokens,
                    usage.total_tokens,
                );
            }
            response
                .first_content()
                .filter(|text| !text.trim().is_empty())
                .map(str::to_string)
                .ok_or_else(|| ProviderError::new(ProviderErrorKind::EmptyResponse))
        }
        .await;

        match result {
            Ok(text) => {
                metrics.record_request(
                    &self.provider_name,
                    &self.model,
                    started.elapsed().as_secs_f64(),
                );
                Ok(text)
            }
            Err(e) => {
                metrics.record_error(&self.provider_name, &self.model, classify_error(&e));
                Err(e.into())
            }
        }
    }
}
