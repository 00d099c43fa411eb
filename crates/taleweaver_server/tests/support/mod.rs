//! Stub providers and a live test server.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use taleweaver_core::{
    Business, GenerationParams, ImageRequest, NearbySearch, SpeechRequest, StoryPrompt,
    TextSearch, VectorMatch, VectorRecord,
};
use taleweaver_error::{ProviderError, ProviderErrorKind, TaleweaverResult};
use taleweaver_interface::{
    Available, ImageGenerator, PlacesBackend, Probe, Provider, SpeechSynthesizer, StoryProvider,
    UnavailableReason, VectorStore,
};
use taleweaver_server::{AppState, HealthProbe, serve_on};
use taleweaver_storage::{FileSystemStorage, MediaStorage};
use taleweaver_story::{
    Archive, Illustrator, LocationService, Narrator, StoryGenerator, StoryPipeline,
};
use tempfile::TempDir;

pub const KITTEN: &str = "STORY:\nA girl finds a lost kitten in the park.\nLOCATION: Willow Park\nCHOICES:\n1. Return the kitten\n2. Keep searching for its owner";

/// Story provider with a canned reply or failure.
pub struct StubStory {
    name: String,
    reply: Result<String, ProviderErrorKind>,
}

impl StubStory {
    pub fn replying(name: &str, text: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            reply: Ok(text.to_string()),
        })
    }

    pub fn failing(name: &str, kind: ProviderErrorKind) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            reply: Err(kind),
        })
    }
}

#[async_trait]
impl Provider for StubStory {
    fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl StoryProvider for StubStory {
    fn model_name(&self) -> &str {
        "stub-model"
    }

    async fn generate(
        &self,
        _prompt: &StoryPrompt,
        _params: &GenerationParams,
    ) -> TaleweaverResult<String> {
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(kind) => Err(ProviderError::new(kind.clone()).into()),
        }
    }
}

/// Speech and image provider returning fixed bytes, or failing.
pub struct StubMedia {
    fail: bool,
}

impl StubMedia {
    pub fn working() -> Arc<Self> {
        Arc::new(Self { fail: false })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self { fail: true })
    }

    fn answer(&self, bytes: &[u8]) -> TaleweaverResult<Vec<u8>> {
        if self.fail {
            return Err(ProviderError::new(ProviderErrorKind::Http("media down".into())).into());
        }
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Provider for StubMedia {
    fn name(&self) -> &str {
        "stub-media"
    }
}

#[async_trait]
impl SpeechSynthesizer for StubMedia {
    async fn synthesize(&self, _request: &SpeechRequest) -> TaleweaverResult<Vec<u8>> {
        self.answer(b"ID3 narration")
    }
}

#[async_trait]
impl ImageGenerator for StubMedia {
    async fn generate_image(&self, _request: &ImageRequest) -> TaleweaverResult<Vec<u8>> {
        self.answer(b"\x89PNG page")
    }
}

/// Places backend with fixed health and results.
pub struct StubPlaces {
    name: String,
    healthy: bool,
    results: Vec<Business>,
}

impl StubPlaces {
    pub fn new(name: &str, healthy: bool, results: Vec<Business>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            healthy,
            results,
        })
    }
}

#[async_trait]
impl Provider for StubPlaces {
    fn name(&self) -> &str {
        &self.name
    }

    async fn health_check(&self) -> Probe {
        if self.healthy {
            Ok(Available)
        } else {
            Err(UnavailableReason::Unreachable("offline".to_string()))
        }
    }
}

#[async_trait]
impl PlacesBackend for StubPlaces {
    async fn search_nearby(&self, search: &NearbySearch) -> TaleweaverResult<Vec<Business>> {
        Ok(self.results.iter().take(search.limit).cloned().collect())
    }

    async fn search_text(&self, _search: &TextSearch) -> TaleweaverResult<Vec<Business>> {
        Ok(self.results.clone())
    }
}

/// In-memory vector store.
pub struct MemoryVectors {
    configured: bool,
    records: Mutex<Vec<VectorRecord>>,
}

impl MemoryVectors {
    pub fn configured() -> Arc<Self> {
        Arc::new(Self {
            configured: true,
            records: Mutex::new(Vec::new()),
        })
    }

    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            configured: false,
            records: Mutex::new(Vec::new()),
        })
    }

    pub fn records(&self) -> Vec<VectorRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MemoryVectors {
    fn name(&self) -> &str {
        "memory"
    }

    fn availability(&self) -> Probe {
        if self.configured {
            Ok(Available)
        } else {
            Err(UnavailableReason::NotConfigured("no key".to_string()))
        }
    }
}

#[async_trait]
impl VectorStore for MemoryVectors {
    async fn upsert(&self, records: Vec<VectorRecord>) -> TaleweaverResult<usize> {
        let count = records.len();
        self.records.lock().unwrap().extend(records);
        Ok(count)
    }

    async fn query(&self, _vector: Vec<f32>, top_k: usize) -> TaleweaverResult<Vec<VectorMatch>> {
        if !self.configured {
            return Err(ProviderError::new(ProviderErrorKind::MissingCredentials(
                "PINECONE_API_KEY".into(),
            ))
            .into());
        }
        Ok(self
            .records()
            .into_iter()
            .take(top_k)
            .map(|record| VectorMatch {
                id: record.id,
                score: 1.0,
                metadata: record.metadata,
            })
            .collect())
    }
}

pub fn business(name: &str, address: &str, categories: &[&str]) -> Business {
    Business::builder()
        .name(name)
        .address(address)
        .categories(categories.iter().map(|c| c.to_string()).collect::<Vec<_>>())
        .build()
        .unwrap()
}

/// Providers for one test server.
pub struct Setup {
    pub story: Arc<StubStory>,
    pub media: Arc<StubMedia>,
    pub places: Arc<StubPlaces>,
    pub vectors: Arc<MemoryVectors>,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            story: StubStory::replying("primary", KITTEN),
            media: StubMedia::working(),
            places: StubPlaces::new(
                "geoapify",
                true,
                vec![
                    business("Bean There", "1 Pike St", &["catering.cafe"]),
                    business("Starbucks", "2 Pike St", &["catering.cafe"]),
                    business("Green Lake", "Seattle", &["leisure.park"]),
                ],
            ),
            vectors: MemoryVectors::configured(),
        }
    }
}

/// A running server and the directory backing its media.
pub struct TestServer {
    pub base: String,
    pub client: reqwest::Client,
    pub vectors: Arc<MemoryVectors>,
    _media: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

pub async fn spawn(setup: Setup) -> TestServer {
    let media = TempDir::new().unwrap();
    let storage: Arc<dyn MediaStorage> = Arc::new(FileSystemStorage::new(media.path()).unwrap());

    let pipeline = StoryPipeline::new(
        Arc::new(StoryGenerator::new(vec![setup.story as Arc<dyn StoryProvider>])),
        Arc::new(Narrator::new(
            setup.media.clone() as Arc<dyn SpeechSynthesizer>,
            storage.clone(),
            "nova",
        )),
        Arc::new(Illustrator::new(
            setup.media.clone() as Arc<dyn ImageGenerator>,
            storage.clone(),
        )),
        Arc::new(LocationService::new(vec![
            setup.places.clone() as Arc<dyn PlacesBackend>
        ])),
    );
    let archive = Archive::new(setup.vectors.clone() as Arc<dyn VectorStore>, 4);
    let state = AppState::new(pipeline, archive, storage).with_health_probes(vec![
        HealthProbe::new("places", setup.places),
        HealthProbe::new("archive", setup.vectors.clone()),
    ]);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(serve_on(listener, state, std::future::pending()));

    TestServer {
        base,
        client: reqwest::Client::new(),
        vectors: setup.vectors,
        _media: media,
    }
}
