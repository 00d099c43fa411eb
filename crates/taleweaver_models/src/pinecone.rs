//! Pinecone vector store adapter.

use crate::transport::{
    DEFAULT_TIMEOUT, decode_json, ensure_success, key_probe, missing_key, probe_response,
    transport_error, trim_base,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use taleweaver_core::{VectorMatch, VectorRecord};
use taleweaver_error::TaleweaverResult;
use taleweaver_interface::{Probe, Provider, UnavailableReason, VectorStore};
use tracing::{debug, instrument};

const PROVIDER: &str = "pinecone";
const API_VERSION: &str = "2024-07";

#[derive(Debug, Serialize)]
struct UpsertBody<'a> {
    vectors: &'a [VectorRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryBody<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<VectorMatch>,
}

/// Pinecone data-plane client bound to one index host.
#[derive(Debug, Clone)]
pub struct PineconeClient {
    client: Client,
    api_key: String,
    index_host: String,
    namespace: Option<String>,
    timeout: Duration,
}

impl PineconeClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Pinecone API key; empty means not configured
    /// * `index_host` - Index host, with or without scheme
    pub fn new(api_key: impl Into<String>, index_host: impl Into<String>) -> Self {
        let host = index_host.into();
        let index_host = if host.is_empty() || host.contains("://") {
            trim_base(host)
        } else {
            trim_base(format!("https://{}", host))
        };
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            index_host,
            namespace: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Write and read within a namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Provider for PineconeClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn availability(&self) -> Probe {
        key_probe(PROVIDER, &self.api_key)?;
        if self.index_host.is_empty() {
            return Err(UnavailableReason::NotConfigured(
                "pinecone index host is not set".to_string(),
            ));
        }
        Ok(taleweaver_interface::Available)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Probe {
        self.availability()?;
        let result = self
            .client
            .post(format!("{}/describe_index_stats", self.index_host))
            .timeout(self.timeout)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&serde_json::json!({}))
            .send()
            .await;
        probe_response(result)
    }
}

#[async_trait]
impl VectorStore for PineconeClient {
    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn upsert(&self, records: Vec<VectorRecord>) -> TaleweaverResult<usize> {
        if self.availability().is_err() {
            return Err(missing_key(PROVIDER).into());
        }

        let body = UpsertBody {
            vectors: &records,
            namespace: self.namespace.as_deref(),
        };
        let response = self
            .client
            .post(format!("{}/vectors/upsert", self.index_host))
            .timeout(self.timeout)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let response = ensure_success(PROVIDER, response).await?;
        let parsed: UpsertResponse = decode_json(PROVIDER, response).await?;
        debug!(upserted = parsed.upserted_count, "Upserted vectors");
        Ok(parsed.upserted_count)
    }

    #[instrument(skip(self, vector))]
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> TaleweaverResult<Vec<VectorMatch>> {
        if self.availability().is_err() {
            return Err(missing_key(PROVIDER).into());
        }

        let body = QueryBody {
            vector: &vector,
            top_k,
            include_metadata: true,
            namespace: self.namespace.as_deref(),
        };
        let response = self
            .client
            .post(format!("{}/query", self.index_host))
            .timeout(self.timeout)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let response = ensure_success(PROVIDER, response).await?;
        let parsed: QueryResponse = decode_json(PROVIDER, response).await?;
        Ok(parsed.matches)
    }
}
