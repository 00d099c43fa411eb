//! Local business suggestions tied to the story.
//!
//! Backends are tried in priority order. The first backend's health probe is
//! run once and remembered for the life of the service; later backends are
//! probed on each call. When no backend answers, a small demo list is served
//! so the reader still sees suggestions.

use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use taleweaver_core::{Business, Coordinates, NearbySearch, TextSearch};
use taleweaver_interface::PlacesBackend;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

/// Default number of story-related suggestions.
pub const DEFAULT_STORY_RESULTS: usize = 5;

/// Text searches over-fetch by this factor before filtering.
const OVERFETCH_FACTOR: usize = 5;

const MAX_SEARCH_TERMS: usize = 5;
const SEARCHED_TERMS: usize = 3;
const RESULTS_PER_TERM: usize = 3;

/// Story keywords and the searches they suggest.
const THEME_TERMS: [(&str, [&str; 3]); 10] = [
    ("coffee", ["coffee shop", "cafe", "coffee"]),
    ("book", ["bookstore", "library", "book shop"]),
    ("food", ["restaurant", "food", "dining"]),
    ("park", ["park", "playground", "outdoor"]),
    ("museum", ["museum", "gallery", "exhibition"]),
    ("shop", ["shop", "store", "retail"]),
    ("play", ["playground", "park", "recreation"]),
    ("learn", ["school", "library", "education"]),
    ("art", ["art gallery", "museum", "art studio"]),
    ("music", ["music store", "concert hall", "music venue"]),
];

const FALLBACK_TERMS: [&str; 3] = ["local business", "shop", "restaurant"];

const CHAIN_NAMES: [&str; 39] = [
    "starbucks",
    "mcdonalds",
    "burger king",
    "wendys",
    "subway",
    "taco bell",
    "pizza hut",
    "dominos",
    "papa johns",
    "kfc",
    "popeyes",
    "chipotle",
    "panera",
    "dunkin",
    "tim hortons",
    "costa",
    "peets",
    "caribou",
    "target",
    "walmart",
    "costco",
    "cvs",
    "walgreens",
    "rite aid",
    "whole foods",
    "7-eleven",
    "circle k",
    "shell",
    "chevron",
    "bp",
    "applebees",
    "olive garden",
    "chilis",
    "red lobster",
    "outback",
    "ihop",
    "dennys",
    "cracker barrel",
    "buffalo wild wings",
];

const STREET_WORDS: [&str; 6] = ["street", "avenue", "road", "lane", "drive", "way"];

const LOCAL_CATEGORIES: [&str; 5] = ["cafe", "coffee", "park", "garden", "recreation"];

/// Search terms suggested by a story, at most five.
///
/// # Examples
///
/// ```
/// use taleweaver_story::story_search_terms;
///
/// assert_eq!(
///     story_search_terms("They met for coffee."),
///     vec!["coffee shop", "cafe", "coffee"]
/// );
/// assert_eq!(
///     story_search_terms("A quiet night."),
///     vec!["local business", "shop", "restaurant"]
/// );
/// ```
pub fn story_search_terms(story: &str) -> Vec<&'static str> {
    let story = story.to_lowercase();
    let mut terms: Vec<&'static str> = THEME_TERMS
        .iter()
        .filter(|(keyword, _)| story.contains(keyword))
        .flat_map(|(_, terms)| terms.iter().copied())
        .collect();
    if terms.is_empty() {
        terms = FALLBACK_TERMS.to_vec();
    }
    terms.truncate(MAX_SEARCH_TERMS);
    terms
}

/// Whether a result is an independent café, park, garden or play space.
pub fn is_local_spot(business: &Business) -> bool {
    let name = business.name().to_lowercase();
    let normalized: String = name.chars().filter(|c| *c != '\'').collect();
    if CHAIN_NAMES.iter().any(|chain| normalized.contains(chain)) {
        return false;
    }
    if looks_like_street_address(&normalized) {
        return false;
    }
    business.categories().iter().any(|category| {
        let category = category.to_lowercase();
        LOCAL_CATEGORIES.iter().any(|local| category.contains(local))
    })
}

fn looks_like_street_address(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_digit())
        && name
            .split_whitespace()
            .any(|word| STREET_WORDS.contains(&word))
}

/// Drop repeats of the same name and address, keeping the first.
pub fn dedup_businesses(businesses: Vec<Business>) -> Vec<Business> {
    let mut seen = HashSet::new();
    businesses
        .into_iter()
        .filter(|business| seen.insert(business.dedup_key()))
        .collect()
}

fn demo_business(
    name: &str,
    address: &str,
    phone: &str,
    website: &str,
    categories: [&str; 2],
    distance: f64,
) -> Option<Business> {
    Business::builder()
        .name(name)
        .address(address)
        .phone(phone)
        .website(website)
        .categories(categories.map(String::from).to_vec())
        .distance_meters(distance)
        .build()
        .ok()
}

/// Suggestions served when no places backend is reachable.
pub fn demo_businesses() -> Vec<Business> {
    [
        demo_business(
            "The Friendship Café",
            "123 Main Street, Your City",
            "(555) 123-4567",
            "https://example.com",
            ["Restaurant", "Coffee Shop"],
            250.0,
        ),
        demo_business(
            "Adventure Bookstore",
            "456 Oak Avenue, Your City",
            "(555) 987-6543",
            "https://bookstore.com",
            ["Bookstore", "Education"],
            500.0,
        ),
        demo_business(
            "Kindness Community Center",
            "789 Pine Street, Your City",
            "(555) 456-7890",
            "https://community.org",
            ["Community Center", "Volunteer"],
            800.0,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Finds places to visit near the reader.
pub struct LocationService {
    backends: Vec<Arc<dyn PlacesBackend>>,
    primary_available: OnceCell<bool>,
}

impl std::fmt::Debug for LocationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.backends.iter().map(|b| b.name()).collect();
        f.debug_struct("LocationService")
            .field("backends", &names)
            .field("primary_available", &self.primary_available.get())
            .finish()
    }
}

impl LocationService {
    /// Create a service over backends in priority order.
    pub fn new(backends: Vec<Arc<dyn PlacesBackend>>) -> Self {
        Self {
            backends,
            primary_available: OnceCell::new(),
        }
    }

    /// The backend to use for this call, if any answers.
    async fn select_backend(&self) -> Option<&Arc<dyn PlacesBackend>> {
        let (primary, rest) = self.backends.split_first()?;

        let primary_ok = *self
            .primary_available
            .get_or_init(|| async {
                let probe = primary.health_check().await;
                match &probe {
                    Ok(_) => info!(backend = primary.name(), "Places backend available"),
                    Err(reason) => {
                        warn!(backend = primary.name(), %reason, "Places backend unavailable")
                    }
                }
                probe.is_ok()
            })
            .await;
        if primary_ok {
            return Some(primary);
        }

        for backend in rest {
            match backend.health_check().await {
                Ok(_) => {
                    debug!(backend = backend.name(), "Using fallback places backend");
                    return Some(backend);
                }
                Err(reason) => debug!(backend = backend.name(), %reason, "Places backend unavailable"),
            }
        }
        None
    }

    /// Name of the backend currently in use, or `"demo"`.
    pub async fn active_backend(&self) -> String {
        self.select_backend()
            .await
            .map(|backend| backend.name().to_string())
            .unwrap_or_else(|| "demo".to_string())
    }

    /// Businesses around a point.
    ///
    /// Demo data when no backend answers; empty when the backend fails.
    #[instrument(skip(self, search), fields(limit = search.limit))]
    pub async fn search_nearby(&self, search: &NearbySearch) -> Vec<Business> {
        let Some(backend) = self.select_backend().await else {
            return demo_businesses();
        };
        match backend.search_nearby(search).await {
            Ok(businesses) => businesses,
            Err(e) => {
                warn!(backend = backend.name(), error = %e, "Nearby search failed");
                Vec::new()
            }
        }
    }

    /// Independent local spots matching free text near a point.
    ///
    /// Over-fetches and filters out chains and bare addresses before applying
    /// the limit. Demo data when no backend answers; empty when it fails.
    #[instrument(skip(self, position))]
    pub async fn search_by_text(
        &self,
        query: &str,
        position: Coordinates,
        limit: usize,
    ) -> Vec<Business> {
        let Some(backend) = self.select_backend().await else {
            return demo_businesses();
        };
        Self::text_search(backend, query, position, limit).await
    }

    async fn text_search(
        backend: &Arc<dyn PlacesBackend>,
        query: &str,
        position: Coordinates,
        limit: usize,
    ) -> Vec<Business> {
        let search = TextSearch {
            query: query.to_string(),
            position,
            limit: limit.saturating_mul(OVERFETCH_FACTOR),
        };
        match backend.search_text(&search).await {
            Ok(found) => {
                let fetched = found.len();
                let mut local: Vec<Business> = found.into_iter().filter(is_local_spot).collect();
                local.truncate(limit);
                debug!(fetched, kept = local.len(), "Filtered text search results");
                local
            }
            Err(e) => {
                warn!(backend = backend.name(), error = %e, "Text search failed");
                Vec::new()
            }
        }
    }

    /// Places that fit the story, de-duplicated and capped at `limit`.
    ///
    /// Falls back to demo data when no backend answers.
    #[instrument(skip(self, story, position))]
    pub async fn find_story_related(
        &self,
        story: &str,
        position: Coordinates,
        limit: usize,
    ) -> Vec<Business> {
        let Some(backend) = self.select_backend().await else {
            let mut demo = demo_businesses();
            demo.truncate(limit);
            return demo;
        };

        let terms = story_search_terms(story);
        let searches = terms
            .iter()
            .take(SEARCHED_TERMS)
            .map(|term| Self::text_search(backend, term, position, RESULTS_PER_TERM));
        let found: Vec<Business> = join_all(searches).await.into_iter().flatten().collect();

        let mut unique = dedup_businesses(found);
        unique.truncate(limit);
        debug!(terms = ?terms, count = unique.len(), "Story-related businesses");
        unique
    }
}
