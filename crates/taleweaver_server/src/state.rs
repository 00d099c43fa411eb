//! Shared application state and its construction from configuration.

use crate::{Credentials, TaleweaverConfig};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use taleweaver_error::TaleweaverResult;
use taleweaver_interface::{
    HealthStatus, ImageGenerator, PlacesBackend, Provider, SpeechSynthesizer, StoryProvider,
    VectorStore,
};
use taleweaver_models::{
    AnthropicClient, GeoapifyPlaces, GooglePlaces, OpenAIChatClient, OpenAISpeechClient,
    PineconeClient, StabilityImageClient,
};
use taleweaver_storage::{FileSystemStorage, MediaStorage};
use taleweaver_story::{
    Archive, Illustrator, LocationService, Narrator, StoryGenerator, StoryPipeline,
};
use tracing::{info, instrument, warn};

/// A side-channel provider reported on the health endpoint.
#[derive(Clone)]
pub struct HealthProbe {
    role: &'static str,
    provider: Arc<dyn Provider>,
}

impl HealthProbe {
    /// Report `provider` under `role` (e.g. "narration").
    pub fn new(role: &'static str, provider: Arc<dyn Provider>) -> Self {
        Self { role, provider }
    }
}

impl std::fmt::Debug for HealthProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthProbe")
            .field("role", &self.role)
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Health of one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Provider name
    pub name: String,
    /// What the provider is used for
    pub role: String,
    /// Probe outcome
    #[serde(flatten)]
    pub health: HealthStatus,
}

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pipeline: StoryPipeline,
    archive: Archive,
    storage: Arc<dyn MediaStorage>,
    probes: Vec<HealthProbe>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("pipeline", &self.pipeline)
            .field("archive", &self.archive)
            .field("probes", &self.probes)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create state from already-built parts.
    pub fn new(pipeline: StoryPipeline, archive: Archive, storage: Arc<dyn MediaStorage>) -> Self {
        Self {
            pipeline,
            archive,
            storage,
            probes: Vec::new(),
        }
    }

    /// Also report these side-channel providers on `/health`.
    pub fn with_health_probes(mut self, probes: Vec<HealthProbe>) -> Self {
        self.probes = probes;
        self
    }

    /// Wire every adapter from configuration and credentials.
    ///
    /// Providers without credentials are still constructed; they report
    /// themselves as not configured and are skipped at request time.
    ///
    /// # Errors
    ///
    /// Returns an error if the media directory cannot be created.
    #[instrument(skip_all)]
    pub fn from_config(config: &TaleweaverConfig, credentials: &Credentials) -> TaleweaverResult<Self> {
        let timeout = config.story.timeout();
        info!(present = ?credentials.present(), "Building providers");

        let anthropic = Arc::new(
            AnthropicClient::new(&credentials.anthropic_api_key, &config.story.primary.model)
                .with_base_url(&config.story.primary.base_url)
                .with_timeout(timeout),
        );
        let openai = Arc::new(
            OpenAIChatClient::new(&credentials.openai_api_key, &config.story.backup.model)
                .with_base_url(&config.story.backup.base_url)
                .with_timeout(timeout),
        );
        let speech = Arc::new(
            OpenAISpeechClient::new(&credentials.openai_api_key, &config.narration.model)
                .with_base_url(&config.narration.base_url)
                .with_timeout(timeout),
        );
        let images = Arc::new(
            StabilityImageClient::new(&credentials.stability_api_key, &config.illustration.engine)
                .with_base_url(&config.illustration.base_url)
                .with_timeout(timeout),
        );
        let geoapify = Arc::new(
            GeoapifyPlaces::new(&credentials.geoapify_api_key)
                .with_base_url(&config.places.geoapify_base_url)
                .with_timeout(timeout),
        );
        let google = Arc::new(
            GooglePlaces::new(&credentials.google_places_api_key)
                .with_base_url(&config.places.google_base_url)
                .with_timeout(timeout),
        );
        let pinecone = Arc::new(
            PineconeClient::new(&credentials.pinecone_api_key, &credentials.pinecone_index_host)
                .with_namespace(&config.archive.namespace)
                .with_timeout(timeout),
        );

        let storage: Arc<dyn MediaStorage> =
            Arc::new(FileSystemStorage::new(&config.storage.media_dir)?);

        let generator = StoryGenerator::new(vec![
            anthropic as Arc<dyn StoryProvider>,
            openai as Arc<dyn StoryProvider>,
        ])
        .with_probe_before_generate(config.story.probe_before_generate);
        let narrator = Narrator::new(
            speech.clone() as Arc<dyn SpeechSynthesizer>,
            storage.clone(),
            &config.narration.default_voice,
        );
        let illustrator = Illustrator::new(images.clone() as Arc<dyn ImageGenerator>, storage.clone())
            .with_size(config.illustration.width, config.illustration.height)
            .with_quality(config.illustration.cfg_scale, config.illustration.steps);
        let locations = LocationService::new(vec![
            geoapify.clone() as Arc<dyn PlacesBackend>,
            google.clone() as Arc<dyn PlacesBackend>,
        ]);
        let archive = Archive::new(
            pinecone.clone() as Arc<dyn VectorStore>,
            config.archive.dimension,
        );

        let pipeline = StoryPipeline::new(
            Arc::new(generator),
            Arc::new(narrator),
            Arc::new(illustrator),
            Arc::new(locations),
        );

        Ok(Self::new(pipeline, archive, storage).with_health_probes(vec![
            HealthProbe::new("narration", speech),
            HealthProbe::new("illustration", images),
            HealthProbe::new("places", geoapify),
            HealthProbe::new("places", google),
            HealthProbe::new("archive", pinecone),
        ]))
    }

    /// The story pipeline.
    pub fn pipeline(&self) -> &StoryPipeline {
        &self.pipeline
    }

    /// The profile and book archive.
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Media storage backing `/media`.
    pub fn storage(&self) -> &Arc<dyn MediaStorage> {
        &self.storage
    }

    /// Probe story providers and side channels concurrently.
    ///
    /// Story providers come first, in fallback order.
    pub async fn service_health(&self) -> Vec<ServiceHealth> {
        let stories = self.pipeline.generator().providers().iter().map(|provider| async move {
            ServiceHealth {
                name: provider.name().to_string(),
                role: "story".to_string(),
                health: provider.health_check().await.into(),
            }
        });
        let sides = self.probes.iter().map(|probe| async move {
            ServiceHealth {
                name: probe.provider.name().to_string(),
                role: probe.role.to_string(),
                health: probe.provider.health_check().await.into(),
            }
        });

        let (mut services, sides) = futures::join!(join_all(stories), join_all(sides));
        services.extend(sides);
        for service in services.iter().filter(|s| !s.health.is_healthy()) {
            warn!(name = %service.name, role = %service.role, health = ?service.health, "Service not healthy");
        }
        services
    }
}

/// Overall status from individual probes.
///
/// Healthy when at least one story provider answers and no configured
/// provider fails its probe. Unconfigured providers do not degrade the status.
pub fn overall_status(services: &[ServiceHealth]) -> &'static str {
    let story_ok = services
        .iter()
        .any(|s| s.role == "story" && s.health.is_healthy());
    let any_failing = services
        .iter()
        .any(|s| matches!(s.health, HealthStatus::Unhealthy { .. }));
    if story_ok && !any_failing {
        "healthy"
    } else {
        "degraded"
    }
}
