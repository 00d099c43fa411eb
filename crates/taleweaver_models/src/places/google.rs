//! Google Places backend.

use crate::transport::{
    DEFAULT_TIMEOUT, decode_json, ensure_success, key_probe, missing_key, probe_response,
    transport_error, trim_base,
};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use taleweaver_core::{Business, Coordinates, NearbySearch, TextSearch};
use taleweaver_error::{ProviderError, ProviderErrorKind, TaleweaverResult};
use taleweaver_interface::{PlacesBackend, Probe, Provider};
use tracing::{debug, instrument, warn};

const GOOGLE_PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place";
const PROVIDER: &str = "google-places";

/// Radius used to bound free-text searches, in meters.
const TEXT_SEARCH_RADIUS: u32 = 5000;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<PlaceDetails>,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceDetails {
    #[serde(default)]
    formatted_phone_number: Option<String>,
    #[serde(default)]
    website: Option<String>,
}

impl PlaceResult {
    fn into_business(self, details: PlaceDetails) -> Option<Business> {
        let mut builder = Business::builder();
        builder
            .name(self.name?)
            .address(
                self.formatted_address
                    .or(self.vicinity)
                    .unwrap_or_default(),
            )
            .categories(self.types);
        if let Some(geometry) = self.geometry {
            builder.coordinates(Coordinates::new(geometry.location.lat, geometry.location.lng));
        }
        if let Some(rating) = self.rating {
            builder.rating(rating);
        }
        if let Some(place_id) = self.place_id {
            builder.place_id(place_id);
        }
        if let Some(phone) = details.formatted_phone_number {
            builder.phone(phone);
        }
        if let Some(website) = details.website {
            builder.website(website);
        }
        builder.build().ok()
    }
}

/// Google Places API backend.
///
/// Nearby results are enriched with phone and website from the details
/// endpoint; a failed details lookup leaves those fields empty.
#[derive(Debug, Clone)]
pub struct GooglePlaces {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl GooglePlaces {
    /// Creates a new backend; an empty key means not configured.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GOOGLE_PLACES_URL.to_string(),
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

    async fn search(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<PlaceResult>, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(missing_key(PROVIDER));
        }

        let response = self
            .client
            .get(format!("{}/{}/json", self.base_url, endpoint))
            .timeout(self.timeout)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let response = ensure_success(PROVIDER, response).await?;
        let parsed: SearchResponse = decode_json(PROVIDER, response).await?;

        match parsed.status.as_str() {
            "OK" => Ok(parsed.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            status => Err(ProviderError::new(ProviderErrorKind::Api {
                status: 200,
                message: format!(
                    "{}: {}",
                    status,
                    parsed.error_message.unwrap_or_default()
                ),
            })),
        }
    }

    /// Phone and website for a place; empty on any failure.
    async fn details(&self, place_id: Option<&str>) -> PlaceDetails {
        let Some(place_id) = place_id else {
            return PlaceDetails::default();
        };
        let result = self
            .client
            .get(format!("{}/details/json", self.base_url))
            .timeout(self.timeout)
            .query(&[
                ("place_id", place_id),
                ("fields", "formatted_phone_number,website"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await;

        let response = match result {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(place_id, status = %response.status(), "Place details lookup failed");
                return PlaceDetails::default();
            }
            Err(e) => {
                warn!(place_id, error = %e, "Place details lookup failed");
                return PlaceDetails::default();
            }
        };
        match response.json::<DetailsResponse>().await {
            Ok(details) if details.status == "OK" => details.result.unwrap_or_default(),
            Ok(details) => {
                debug!(place_id, status = %details.status, "No place details");
                PlaceDetails::default()
            }
            Err(e) => {
                warn!(place_id, error = %e, "Unreadable place details");
                PlaceDetails::default()
            }
        }
    }

    async fn enrich(&self, results: Vec<PlaceResult>) -> Vec<Business> {
        let details = join_all(
            results
                .iter()
                .map(|place| self.details(place.place_id.as_deref())),
        )
        .await;
        results
            .into_iter()
            .zip(details)
            .filter_map(|(place, details)| place.into_business(details))
            .collect()
    }
}

#[async_trait]
impl Provider for GooglePlaces {
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
            .get(format!("{}/textsearch/json", self.base_url))
            .timeout(self.timeout)
            .query(&[("query", "test"), ("key", self.api_key.as_str())])
            .send()
            .await;
        probe_response(result)
    }
}

#[async_trait]
impl PlacesBackend for GooglePlaces {
    #[instrument(skip(self, search), fields(radius = search.radius_meters, limit = search.limit))]
    async fn search_nearby(&self, search: &NearbySearch) -> TaleweaverResult<Vec<Business>> {
        let place_type = search
            .categories
            .first()
            .cloned()
            .unwrap_or_else(|| "establishment".to_string());
        let query = [
            (
                "location",
                format!("{},{}", search.position.lat, search.position.lng),
            ),
            ("radius", search.radius_meters.to_string()),
            ("type", place_type),
        ];
        let mut results = self.search("nearbysearch", &query).await?;
        results.truncate(search.limit);
        Ok(self.enrich(results).await)
    }

    #[instrument(skip(self, search), fields(query = %search.query, limit = search.limit))]
    async fn search_text(&self, search: &TextSearch) -> TaleweaverResult<Vec<Business>> {
        let query = [
            ("query", search.query.clone()),
            (
                "location",
                format!("{},{}", search.position.lat, search.position.lng),
            ),
            ("radius", TEXT_SEARCH_RADIUS.to_string()),
        ];
        let mut results = self.search("textsearch", &query).await?;
        results.truncate(search.limit);
        Ok(results
            .into_iter()
            .filter_map(|place| place.into_business(PlaceDetails::default()))
            .collect())
    }
}
