//! Local business suggestions.

use derive_builder::Builder;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are within valid ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A place a reader could visit, as returned by a places backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct Business {
    /// Display name
    name: String,
    /// Formatted street address
    #[builder(default)]
    address: String,
    /// Phone number, if listed
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    /// Website, if listed
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    website: Option<String>,
    /// Category labels
    #[builder(default)]
    #[serde(default)]
    categories: Vec<String>,
    /// Position, if known
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coordinates: Option<Coordinates>,
    /// Distance from the search origin in meters
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    distance_meters: Option<f64>,
    /// Average rating, if the backend reports one
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rating: Option<f32>,
    /// Backend-specific identifier
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    place_id: Option<String>,
}

impl Business {
    /// Creates a new builder for Business.
    pub fn builder() -> BusinessBuilder {
        BusinessBuilder::default()
    }

    /// Key used to de-duplicate results gathered from several searches.
    pub fn dedup_key(&self) -> String {
        format!("{}_{}", self.name, self.address)
    }
}

/// Search around a point, optionally restricted to categories.
///
/// # Examples
///
/// ```
/// use taleweaver_core::{Coordinates, NearbySearch};
///
/// let search = NearbySearch::around(Coordinates::new(47.6, -122.3)).with_limit(3usize);
/// assert_eq!(search.radius_meters, 5000);
/// assert_eq!(search.limit, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
pub struct NearbySearch {
    /// Search origin
    pub position: Coordinates,
    /// Search radius in meters
    pub radius_meters: u32,
    /// Backend category filters; empty means any
    pub categories: Vec<String>,
    /// Maximum results
    pub limit: usize,
}

impl NearbySearch {
    /// Search with the default 5 km radius and ten results.
    pub fn around(position: Coordinates) -> Self {
        Self {
            position,
            radius_meters: 5000,
            categories: Vec::new(),
            limit: 10,
        }
    }
}

/// Free-text search biased toward a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSearch {
    /// Search text
    pub query: String,
    /// Bias position
    pub position: Coordinates,
    /// Maximum results
    pub limit: usize,
}
