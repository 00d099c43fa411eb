//! HTTP routes.

use crate::{ApiError, AppState, PageMetrics, overall_status};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use taleweaver_core::{Business, CompletedBook, Coordinates, NearbySearch, PageKey, ReaderProfile};
use taleweaver_error::{BuilderError, TaleweaverError, TaleweaverResult};
use taleweaver_storage::{MediaReference, MediaType};
use taleweaver_story::{
    DEFAULT_STORY_RESULTS, Illustration, Illustrator, ReaderContext, StoryPage,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

const DEFAULT_THEME: &str = "kindness";
const DEFAULT_SEARCH_LIMIT: usize = 10;
const MAX_SEARCH_LIMIT: usize = 50;

/// Router state: application state plus request metrics.
#[derive(Clone, Debug)]
struct ApiState {
    app: AppState,
    metrics: PageMetrics,
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let state = ApiState {
        app: state,
        metrics: PageMetrics::new(),
    };
    Router::new()
        .route("/", get(api_info))
        .route("/api", get(api_info))
        .route("/health", get(health_check))
        .route("/story/generate", get(generate_story))
        .route("/story/continue", post(continue_story))
        .route("/story/end", post(end_story))
        .route("/voice/demo", get(voice_demo))
        .route("/profile", post(save_profile))
        .route("/book", post(save_book))
        .route("/archive/recent", get(recent_archive))
        .route("/locations/search", get(search_locations))
        .route("/locations/story", post(story_locations))
        .route("/media/:session/:file", get(media))
        .with_state(state)
}

/// URL path under which a stored file is served.
pub fn media_url(reference: &MediaReference) -> String {
    format!("/media/{}", reference.key())
}

/// One story page as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryResponse {
    /// Story theme
    pub theme: String,
    /// Page text
    pub story: String,
    /// Setting named by the model; may be empty
    pub location: String,
    /// Options for the next page; empty on the last page
    pub choices: Vec<String>,
    /// Narration URL, absent when narration failed
    pub voice_file: Option<String>,
    /// Artwork URL or a placeholder image
    pub image_url: String,
    /// Prompt the artwork was drawn from
    pub image_description: String,
    /// Places related to the story
    pub businesses: Vec<Business>,
    /// Provider that wrote the page
    pub provider_used: String,
    /// Reading session
    pub session_id: Uuid,
    /// Page number within the session
    pub page_number: u32,
}

impl From<&StoryPage> for StoryResponse {
    fn from(page: &StoryPage) -> Self {
        let result = page.result();
        let image_url = match page.illustration() {
            Illustration::Stored(reference) => media_url(reference),
            Illustration::Placeholder(url) => url.clone(),
        };
        Self {
            theme: page.theme().clone(),
            story: result.story_text.clone(),
            location: result.location.clone(),
            choices: result.choices.clone(),
            voice_file: page.narration().as_ref().map(media_url),
            image_url,
            image_description: Illustrator::image_prompt(&result.story_text, page.theme()),
            businesses: page.businesses().clone(),
            provider_used: result.provider_used.clone(),
            session_id: page.page_key().session_id,
            page_number: page.page_key().page_number,
        }
    }
}

/// Reader details shared by every story request.
#[derive(Debug, Clone, Deserialize)]
struct ReaderFields {
    age: Option<u8>,
    voice: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

impl ReaderFields {
    fn into_context(self) -> Result<ReaderContext, ApiError> {
        let position = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(coordinates(lat, lng)?),
            (None, None) => None,
            _ => return Err(ApiError::invalid("lat/lng", "both coordinates are required")),
        };
        if let Some(voice) = &self.voice {
            validate_voice(voice)?;
        }
        Ok(ReaderContext {
            age: self.age,
            voice: self.voice,
            position,
        })
    }
}

fn coordinates(lat: f64, lng: f64) -> Result<Coordinates, ApiError> {
    let position = Coordinates::new(lat, lng);
    if position.is_valid() {
        Ok(position)
    } else {
        Err(ApiError::invalid("lat/lng", "coordinates out of range"))
    }
}

/// Voice names become file names, so only simple identifiers are accepted.
fn validate_voice(voice: &str) -> Result<(), ApiError> {
    let simple = !voice.is_empty()
        && voice.len() <= 32
        && voice
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if simple {
        Ok(())
    } else {
        Err(ApiError::invalid("voice", "expected a voice name"))
    }
}

/// Page key for a follow-up page: the given session and page, or a new
/// session starting at page two.
fn follow_up_key(session_id: Option<Uuid>, page_number: Option<u32>) -> PageKey {
    match session_id {
        Some(session) => PageKey::new(session, page_number.unwrap_or(2).max(1)),
        None => PageKey::start().next(),
    }
}

/// Query strings carry every value as text, so reader fields are listed
/// here rather than flattened.
#[derive(Debug, Deserialize)]
struct GenerateQuery {
    theme: Option<String>,
    session: Option<Uuid>,
    age: Option<u8>,
    voice: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ContinueRequest {
    theme: String,
    story_context: String,
    choice: String,
    session_id: Option<Uuid>,
    page_number: Option<u32>,
    #[serde(flatten)]
    reader: ReaderFields,
}

#[derive(Debug, Deserialize)]
struct EndRequest {
    theme: String,
    story_context: String,
    session_id: Option<Uuid>,
    page_number: Option<u32>,
    #[serde(flatten)]
    reader: ReaderFields,
}

#[derive(Debug, Deserialize)]
struct VoiceQuery {
    voice: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BookRequest {
    id: Option<String>,
    theme: String,
    pages: Vec<String>,
    #[serde(default)]
    user_name: String,
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    lat: f64,
    lng: f64,
    query: Option<String>,
    radius: Option<u32>,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct StoryLocationsRequest {
    story: String,
    lat: f64,
    lng: f64,
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct LocationsResponse {
    businesses: Vec<Business>,
    count: usize,
    backend: String,
}

async fn api_info() -> impl IntoResponse {
    Json(json!({
        "message": "Taleweaver API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "generate_story": "/story/generate?theme=your_theme",
            "continue_story": "/story/continue",
            "end_story": "/story/end",
            "voice_demo": "/voice/demo?voice=nova",
            "profile": "/profile",
            "book": "/book",
            "recent_archive": "/archive/recent?limit=10",
            "locations": "/locations/search?lat=..&lng=..",
            "story_locations": "/locations/story",
            "health": "/health",
        }
    }))
}

async fn health_check(State(state): State<ApiState>) -> impl IntoResponse {
    let services = state.app.service_health().await;
    let status = overall_status(&services);
    Json(json!({
        "status": status,
        "timestamp": Utc::now(),
        "services": services,
    }))
}

fn page_response(
    metrics: &PageMetrics,
    operation: &'static str,
    started: Instant,
    page: TaleweaverResult<StoryPage>,
) -> Result<Json<StoryResponse>, ApiError> {
    match page {
        Ok(page) => {
            metrics.record_page(
                operation,
                &page.result().provider_used,
                started.elapsed().as_secs_f64(),
            );
            Ok(Json(StoryResponse::from(&page)))
        }
        Err(e) => {
            metrics.record_failure(operation);
            Err(e.into())
        }
    }
}

#[instrument(skip(state, query), fields(theme = ?query.theme))]
async fn generate_story(
    State(state): State<ApiState>,
    Query(query): Query<GenerateQuery>,
) -> Result<Json<StoryResponse>, ApiError> {
    let started = Instant::now();
    let reader = ReaderFields {
        age: query.age,
        voice: query.voice,
        lat: query.lat,
        lng: query.lng,
    }
    .into_context()?;
    let theme = query.theme.unwrap_or_else(|| DEFAULT_THEME.to_string());
    let key = query
        .session
        .map(|session| PageKey::new(session, 1))
        .unwrap_or_else(PageKey::start);

    let page = state.app.pipeline().start(&theme, key, &reader).await;
    page_response(&state.metrics, "start", started, page)
}

#[instrument(skip(state, request), fields(theme = %request.theme))]
async fn continue_story(
    State(state): State<ApiState>,
    Json(request): Json<ContinueRequest>,
) -> Result<Json<StoryResponse>, ApiError> {
    let started = Instant::now();
    let reader = request.reader.into_context()?;
    let key = follow_up_key(request.session_id, request.page_number);

    let page = state
        .app
        .pipeline()
        .continue_story(&request.theme, &request.story_context, &request.choice, key, &reader)
        .await;
    page_response(&state.metrics, "continue", started, page)
}

#[instrument(skip(state, request), fields(theme = %request.theme))]
async fn end_story(
    State(state): State<ApiState>,
    Json(request): Json<EndRequest>,
) -> Result<Json<StoryResponse>, ApiError> {
    let started = Instant::now();
    let reader = request.reader.into_context()?;
    let key = follow_up_key(request.session_id, request.page_number);

    let page = state
        .app
        .pipeline()
        .finish(&request.theme, &request.story_context, key, &reader)
        .await;
    page_response(&state.metrics, "end", started, page)
}

async fn voice_demo(
    State(state): State<ApiState>,
    Query(query): Query<VoiceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(voice) = &query.voice {
        validate_voice(voice)?;
    }
    let narrator = state.app.pipeline().narrator();
    let voice = query
        .voice
        .clone()
        .unwrap_or_else(|| narrator.default_voice().to_string());
    match narrator.voice_demo(Some(&voice)).await {
        Some(reference) => Ok(Json(json!({
            "voice": voice,
            "voice_file": media_url(&reference),
        }))),
        None => Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Voice synthesis is unavailable",
        )),
    }
}

async fn save_profile(
    State(state): State<ApiState>,
    Json(profile): Json<ReaderProfile>,
) -> Result<impl IntoResponse, ApiError> {
    if profile.name.trim().is_empty() {
        return Err(ApiError::invalid("name", "must not be empty"));
    }
    validate_voice(&profile.voice)?;
    let id = state.app.archive().save_profile_detached(profile);
    info!(%id, "Profile queued for archive");
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "status": "accepted", "id": id })),
    ))
}

async fn save_book(
    State(state): State<ApiState>,
    Json(request): Json<BookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.pages.is_empty() {
        return Err(ApiError::invalid("pages", "a book needs at least one page"));
    }
    let book = CompletedBook::builder()
        .id(request.id.unwrap_or_else(|| Uuid::new_v4().to_string()))
        .theme(request.theme)
        .pages(request.pages)
        .user_name(request.user_name)
        .build()
        .map_err(|e| TaleweaverError::from(BuilderError::from(e.to_string())))?;
    let id = state.app.archive().save_book_detached(book);
    info!(%id, "Book queued for archive");
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "status": "accepted", "id": id })),
    ))
}

#[instrument(skip(state))]
async fn recent_archive(
    State(state): State<ApiState>,
    Query(query): Query<RecentQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);
    let records = state.app.archive().recent(limit).await.map_err(|e| {
        warn!(error = %e, "Archive query failed");
        ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Archive unavailable")
    })?;
    Ok(Json(json!({ "count": records.len(), "records": records })))
}

#[instrument(skip(state))]
async fn search_locations(
    State(state): State<ApiState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<LocationsResponse>, ApiError> {
    let position = coordinates(query.lat, query.lng)?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);
    let locations = state.app.pipeline().locations();

    let businesses = match query.query.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => locations.search_by_text(text, position, limit).await,
        _ => {
            let mut search = NearbySearch::around(position).with_limit(limit);
            if let Some(radius) = query.radius {
                search = search.with_radius_meters(radius);
            }
            locations.search_nearby(&search).await
        }
    };
    Ok(Json(LocationsResponse {
        count: businesses.len(),
        businesses,
        backend: locations.active_backend().await,
    }))
}

#[instrument(skip(state, request))]
async fn story_locations(
    State(state): State<ApiState>,
    Json(request): Json<StoryLocationsRequest>,
) -> Result<Json<LocationsResponse>, ApiError> {
    let position = coordinates(request.lat, request.lng)?;
    let limit = request
        .limit
        .unwrap_or(DEFAULT_STORY_RESULTS)
        .clamp(1, MAX_SEARCH_LIMIT);
    let locations = state.app.pipeline().locations();

    let businesses = locations
        .find_story_related(&request.story, position, limit)
        .await;
    Ok(Json(LocationsResponse {
        count: businesses.len(),
        businesses,
        backend: locations.active_backend().await,
    }))
}

async fn media(
    State(state): State<ApiState>,
    Path((session, file)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let Some((_, mime)) = MediaType::from_file_name(&file) else {
        return Err(ApiError::new(StatusCode::NOT_FOUND, "Media not found"));
    };
    let bytes = state.app.storage().load(&session, &file).await?;
    Ok(([(header::CONTENT_TYPE, mime)], bytes))
}
