//! Provider fallback orchestration.

use crate::{PromptBuilder, parse_story};
use std::sync::Arc;
use taleweaver_core::{GenerationRequest, GenerationResult, ProviderAttempt};
use taleweaver_error::{
    GenerationError, GenerationErrorKind, ProviderFailure, TaleweaverError, TaleweaverErrorKind,
    TaleweaverResult,
};
use taleweaver_interface::StoryProvider;
use tracing::{debug, info, instrument, warn};

/// Most choices a page may offer, whatever the model returned.
pub const MAX_CHOICES: usize = 3;

/// Generates story pages by trying providers in order until one answers.
///
/// Providers are tried strictly one after another. A failing provider is
/// recorded and the next one is tried; there is no retry within a provider.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use taleweaver_core::GenerationRequest;
/// use taleweaver_interface::StoryProvider;
/// use taleweaver_story::StoryGenerator;
///
/// # async fn example(primary: Arc<dyn StoryProvider>, backup: Arc<dyn StoryProvider>) -> Result<(), Box<dyn std::error::Error>> {
/// let generator = StoryGenerator::new(vec![primary, backup]);
/// let request = GenerationRequest::builder()
///     .prompt_text("An interactive adventure about kindness")
///     .build()?;
/// let result = generator.generate(&request).await?;
/// println!("{} (via {})", result.story_text, result.provider_used);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StoryGenerator {
    providers: Vec<Arc<dyn StoryProvider>>,
    probe_before_generate: bool,
}

impl std::fmt::Debug for StoryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("StoryGenerator")
            .field("providers", &names)
            .field("probe_before_generate", &self.probe_before_generate)
            .finish()
    }
}

impl StoryGenerator {
    /// Create a generator over providers in priority order.
    pub fn new(providers: Vec<Arc<dyn StoryProvider>>) -> Self {
        Self {
            providers,
            probe_before_generate: false,
        }
    }

    /// Also run each provider's network health check before using it.
    pub fn with_probe_before_generate(mut self, probe: bool) -> Self {
        self.probe_before_generate = probe;
        self
    }

    /// All providers, configured or not, in priority order.
    pub fn providers(&self) -> &[Arc<dyn StoryProvider>] {
        &self.providers
    }

    /// Providers that pass their probes, in priority order.
    async fn usable_providers(&self) -> Vec<&Arc<dyn StoryProvider>> {
        let mut usable = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            let probe = if self.probe_before_generate {
                provider.health_check().await
            } else {
                provider.availability()
            };
            match probe {
                Ok(_) => usable.push(provider),
                Err(reason) => {
                    warn!(provider = provider.name(), %reason, "Skipping unavailable provider");
                }
            }
        }
        usable
    }

    /// Generate one page of story.
    ///
    /// # Errors
    ///
    /// Fails with [`GenerationErrorKind::AllProvidersExhausted`] when every
    /// usable provider failed, listing each failure in attempt order. The list
    /// is empty when no provider is configured.
    #[instrument(skip(self, request), fields(mode = %request.mode()))]
    pub async fn generate(&self, request: &GenerationRequest) -> TaleweaverResult<GenerationResult> {
        let prompt = PromptBuilder::build(request);
        let params = request.params();
        let mut attempts = Vec::new();
        let mut failures = Vec::new();

        for provider in self.usable_providers().await {
            let name = provider.name().to_string();
            debug!(provider = %name, model = provider.model_name(), "Attempting provider");

            match provider.generate(&prompt, &params).await {
                Ok(raw) => {
                    let parsed = parse_story(&raw);
                    attempts.push(ProviderAttempt::success(&name, raw));

                    let mut choices = parsed.choices;
                    if request.mode().is_ending() {
                        choices.clear();
                    } else {
                        choices.truncate(MAX_CHOICES);
                    }

                    info!(
                        provider = %name,
                        attempts = attempts.len(),
                        choices = choices.len(),
                        "Story generated"
                    );
                    return Ok(GenerationResult {
                        story_text: parsed.story_text,
                        location: parsed.location,
                        choices,
                        provider_used: name,
                        attempts,
                    });
                }
                Err(e) => {
                    let reason = failure_reason(&e);
                    warn!(provider = %name, %reason, "Provider failed, falling back");
                    attempts.push(ProviderAttempt::failure(&name, &reason));
                    failures.push(ProviderFailure::new(name, reason));
                }
            }
        }

        Err(GenerationError::new(GenerationErrorKind::AllProvidersExhausted { failures }).into())
    }
}

/// Short reason for an attempt record, without source locations.
fn failure_reason(error: &TaleweaverError) -> String {
    match error.kind() {
        TaleweaverErrorKind::Provider(e) => e.kind.to_string(),
        other => other.to_string(),
    }
}
