//! Geoapify Places backend.

use crate::transport::{
    DEFAULT_TIMEOUT, decode_json, ensure_success, key_probe, missing_key, probe_response,
    transport_error, trim_base,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use taleweaver_core::{Business, Coordinates, NearbySearch, TextSearch};
use taleweaver_error::{ProviderError, ProviderErrorKind, TaleweaverResult};
use taleweaver_interface::{PlacesBackend, Probe, Provider};
use tracing::{debug, instrument};

const GEOAPIFY_API_URL: &str = "https://api.geoapify.com";
const PROVIDER: &str = "geoapify";

/// Categories searched when the caller gives none.
const DEFAULT_CATEGORIES: &str =
    "catering,commercial,entertainment,leisure,education.library,tourism.attraction";

/// Categories searched for free-text queries.
const TEXT_SEARCH_CATEGORIES: &str =
    "catering.cafe,leisure.park,leisure.playground,entertainment,commercial.books,education.library";

/// Radius used to bound free-text searches, in meters.
const TEXT_SEARCH_RADIUS: u32 = 5000;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Debug, Default, Deserialize)]
struct Contact {
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Properties {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    formatted: Option<String>,
    #[serde(default)]
    address_line1: Option<String>,
    #[serde(default)]
    address_line2: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    contact: Option<Contact>,
}

impl Properties {
    /// Convert to a business; features without any name are dropped.
    fn into_business(self) -> Option<Business> {
        let name = self.name.or_else(|| self.address_line1.clone())?;
        let address = self
            .address_line2
            .or(self.formatted)
            .unwrap_or_default();

        let mut builder = Business::builder();
        builder
            .name(name)
            .address(address)
            .categories(self.categories);
        if let Some(phone) = self.contact.and_then(|c| c.phone) {
            builder.phone(phone);
        }
        if let Some(website) = self.website {
            builder.website(website);
        }
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            builder.coordinates(Coordinates::new(lat, lon));
        }
        if let Some(distance) = self.distance {
            builder.distance_meters(distance);
        }
        if let Some(place_id) = self.place_id {
            builder.place_id(place_id);
        }
        builder.build().ok()
    }
}

/// Geoapify Places API backend.
#[derive(Debug, Clone)]
pub struct GeoapifyPlaces {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl GeoapifyPlaces {
    /// Creates a new backend; an empty key means not configured.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GEOAPIFY_API_URL.to_string(),
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

    async fn fetch(&self, query: &[(&str, String)]) -> Result<Vec<Business>, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(missing_key(PROVIDER));
        }

        let response = self
            .client
            .get(format!("{}/v2/places", self.base_url))
            .timeout(self.timeout)
            .query(query)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let response = ensure_success(PROVIDER, response).await?;
        let collection: FeatureCollection = decode_json(PROVIDER, response).await?;

        let businesses: Vec<Business> = collection
            .features
            .into_iter()
            .filter_map(|feature| feature.properties.into_business())
            .collect();
        debug!(count = businesses.len(), "Geoapify returned places");
        Ok(businesses)
    }

    fn proximity(position: &Coordinates) -> String {
        format!("proximity:{},{}", position.lng, position.lat)
    }

    fn circle(position: &Coordinates, radius: u32) -> String {
        format!("circle:{},{},{}", position.lng, position.lat, radius)
    }
}

#[async_trait]
impl Provider for GeoapifyPlaces {
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
            .get(format!("{}/v1/geocode/search", self.base_url))
            .timeout(self.timeout)
            .query(&[
                ("text", "test"),
                ("limit", "1"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await;
        probe_response(result)
    }
}

#[async_trait]
impl PlacesBackend for GeoapifyPlaces {
    #[instrument(skip(self, search), fields(radius = search.radius_meters, limit = search.limit))]
    async fn search_nearby(&self, search: &NearbySearch) -> TaleweaverResult<Vec<Business>> {
        let categories = if search.categories.is_empty() {
            DEFAULT_CATEGORIES.to_string()
        } else {
            search.categories.join(",")
        };
        let query = [
            ("categories", categories),
            (
                "filter",
                Self::circle(&search.position, search.radius_meters),
            ),
            ("bias", Self::proximity(&search.position)),
            ("limit", search.limit.to_string()),
        ];
        let mut businesses = self.fetch(&query).await?;
        businesses.truncate(search.limit);
        Ok(businesses)
    }

    #[instrument(skip(self, search), fields(query = %search.query, limit = search.limit))]
    async fn search_text(&self, search: &TextSearch) -> TaleweaverResult<Vec<Business>> {
        if search.query.trim().is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::Builder(
                "search text must not be empty".to_string(),
            ))
            .into());
        }
        let query = [
            ("categories", TEXT_SEARCH_CATEGORIES.to_string()),
            ("name", search.query.clone()),
            (
                "filter",
                Self::circle(&search.position, TEXT_SEARCH_RADIUS),
            ),
            ("bias", Self::proximity(&search.position)),
            ("limit", search.limit.to_string()),
        ];
        let mut businesses = self.fetch(&query).await?;
        businesses.truncate(search.limit);
        Ok(businesses)
    }
}
