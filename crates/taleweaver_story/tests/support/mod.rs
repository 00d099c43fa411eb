//! Stub providers shared by the story tests.

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

/// Story provider returning a canned reply.
pub struct StubStory {
    name: String,
    reply: Result<String, ProviderErrorKind>,
    configured: bool,
    reachable: bool,
    calls: Mutex<usize>,
    prompts: Mutex<Vec<StoryPrompt>>,
}

impl StubStory {
    pub fn replying(name: &str, text: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            reply: Ok(text.to_string()),
            configured: true,
            reachable: true,
            calls: Mutex::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(name: &str, kind: ProviderErrorKind) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            reply: Err(kind),
            configured: true,
            reachable: true,
            calls: Mutex::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn unconfigured(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            reply: Ok("never used".to_string()),
            configured: false,
            reachable: true,
            calls: Mutex::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Has credentials, would answer, but fails its network health check.
    pub fn unreachable(name: &str, text: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            reply: Ok(text.to_string()),
            configured: true,
            reachable: false,
            calls: Mutex::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn last_prompt(&self) -> Option<StoryPrompt> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Provider for StubStory {
    fn name(&self) -> &str {
        &self.name
    }

    fn availability(&self) -> Probe {
        if self.configured {
            Ok(Available)
        } else {
            Err(UnavailableReason::NotConfigured("no key".to_string()))
        }
    }

    async fn health_check(&self) -> Probe {
        self.availability()?;
        if self.reachable {
            Ok(Available)
        } else {
            Err(UnavailableReason::Unreachable("connection refused".to_string()))
        }
    }
}

#[async_trait]
impl StoryProvider for StubStory {
    fn model_name(&self) -> &str {
        "stub-model"
    }

    async fn generate(
        &self,
        prompt: &StoryPrompt,
        _params: &GenerationParams,
    ) -> TaleweaverResult<String> {
        *self.calls.lock().unwrap() += 1;
        self.prompts.lock().unwrap().push(prompt.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(kind) => Err(ProviderError::new(kind.clone()).into()),
        }
    }
}

/// Speech provider returning fixed bytes, or failing.
pub struct StubSpeech {
    fail: bool,
    requests: Mutex<Vec<SpeechRequest>>,
}

impl StubSpeech {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for StubSpeech {
    fn name(&self) -> &str {
        "stub-speech"
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSpeech {
    async fn synthesize(&self, request: &SpeechRequest) -> TaleweaverResult<Vec<u8>> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(ProviderError::new(ProviderErrorKind::Http("speech down".into())).into());
        }
        Ok(b"ID3 narration".to_vec())
    }
}

/// Image provider returning fixed bytes, or failing.
pub struct StubImages {
    fail: bool,
    requests: Mutex<Vec<ImageRequest>>,
}

impl StubImages {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for StubImages {
    fn name(&self) -> &str {
        "stub-images"
    }
}

#[async_trait]
impl ImageGenerator for StubImages {
    async fn generate_image(&self, request: &ImageRequest) -> TaleweaverResult<Vec<u8>> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(ProviderError::new(ProviderErrorKind::RateLimited("busy".into())).into());
        }
        Ok(b"\x89PNG page".to_vec())
    }
}

/// Places backend with a fixed health and result list.
pub struct StubPlaces {
    name: String,
    healthy: bool,
    fail_searches: bool,
    results: Vec<Business>,
    probes: Mutex<usize>,
    text_queries: Mutex<Vec<TextSearch>>,
}

impl StubPlaces {
    pub fn new(name: &str, healthy: bool, results: Vec<Business>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            healthy,
            fail_searches: false,
            results,
            probes: Mutex::new(0),
            text_queries: Mutex::new(Vec::new()),
        })
    }

    pub fn erroring(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            healthy: true,
            fail_searches: true,
            results: Vec::new(),
            probes: Mutex::new(0),
            text_queries: Mutex::new(Vec::new()),
        })
    }

    pub fn probe_count(&self) -> usize {
        *self.probes.lock().unwrap()
    }

    pub fn text_queries(&self) -> Vec<TextSearch> {
        self.text_queries.lock().unwrap().clone()
    }

    fn answer(&self) -> TaleweaverResult<Vec<Business>> {
        if self.fail_searches {
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: 500,
                message: "places down".into(),
            })
            .into());
        }
        Ok(self.results.clone())
    }
}

#[async_trait]
impl Provider for StubPlaces {
    fn name(&self) -> &str {
        &self.name
    }

    async fn health_check(&self) -> Probe {
        *self.probes.lock().unwrap() += 1;
        if self.healthy {
            Ok(Available)
        } else {
            Err(UnavailableReason::Unreachable("offline".to_string()))
        }
    }
}

#[async_trait]
impl PlacesBackend for StubPlaces {
    async fn search_nearby(&self, _search: &NearbySearch) -> TaleweaverResult<Vec<Business>> {
        self.answer()
    }

    async fn search_text(&self, search: &TextSearch) -> TaleweaverResult<Vec<Business>> {
        self.text_queries.lock().unwrap().push(search.clone());
        self.answer()
    }
}

/// Vector store keeping records in memory.
#[derive(Default)]
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
        Arc::new(Self::default())
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
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .take(top_k)
            .map(|record| VectorMatch {
                id: record.id.clone(),
                score: 1.0,
                metadata: record.metadata.clone(),
            })
            .collect())
    }
}

/// A business with the given name and categories.
pub fn business(name: &str, address: &str, categories: &[&str]) -> Business {
    Business::builder()
        .name(name)
        .address(address)
        .categories(categories.iter().map(|c| c.to_string()).collect::<Vec<_>>())
        .build()
        .unwrap()
}
