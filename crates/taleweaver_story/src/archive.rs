//! Reader profiles and finished books in the vector store.

use chrono::Utc;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use taleweaver_core::{CompletedBook, ReaderProfile, VectorMatch, VectorRecord};
use taleweaver_error::TaleweaverResult;
use taleweaver_interface::VectorStore;
use tracing::{debug, info, instrument, warn};

/// Value filling the placeholder embedding.
const PLACEHOLDER_VALUE: f32 = 0.1;

/// Identifier for a profile saved at `timestamp` (unix seconds).
///
/// # Examples
///
/// ```
/// assert_eq!(taleweaver_story::profile_id("Ada Lovelace", 1700000000), "user_ada_lovelace_1700000000");
/// ```
pub fn profile_id(name: &str, timestamp: i64) -> String {
    format!("user_{}_{}", name.to_lowercase().replace(' ', "_"), timestamp)
}

/// Identifier for a book.
pub fn book_id(book: &CompletedBook) -> String {
    format!("book_{}", book.id())
}

/// Archives profiles and books.
///
/// Records carry a constant placeholder vector; lookups are by metadata and
/// recency rather than similarity.
#[derive(Clone)]
pub struct Archive {
    store: Arc<dyn VectorStore>,
    dimension: usize,
}

impl std::fmt::Debug for Archive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("store", &self.store.name())
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl Archive {
    /// Create an archive writing vectors of `dimension` values.
    pub fn new(store: Arc<dyn VectorStore>, dimension: usize) -> Self {
        Self { store, dimension }
    }

    fn placeholder_vector(&self) -> Vec<f32> {
        vec![PLACEHOLDER_VALUE; self.dimension]
    }

    /// Record written for a profile.
    pub fn profile_record(&self, profile: &ReaderProfile, timestamp: i64) -> VectorRecord {
        let mut metadata = Map::new();
        metadata.insert("type".into(), json!("profile"));
        metadata.insert("name".into(), json!(profile.name));
        metadata.insert("age".into(), json!(profile.age));
        metadata.insert("voice".into(), json!(profile.voice));
        metadata.insert("created_at".into(), json!(Utc::now().to_rfc3339()));
        VectorRecord {
            id: profile_id(&profile.name, timestamp),
            values: self.placeholder_vector(),
            metadata,
        }
    }

    /// Record written for a book.
    pub fn book_record(&self, book: &CompletedBook) -> VectorRecord {
        let mut metadata = Map::new();
        metadata.insert("type".into(), json!("book"));
        metadata.insert("theme".into(), json!(book.theme()));
        metadata.insert("pages_count".into(), json!(book.pages().len()));
        metadata.insert("user_name".into(), json!(book.user_name()));
        metadata.insert(
            "completed_at".into(),
            Value::String(book.completed_at().to_rfc3339()),
        );
        metadata.insert("summary".into(), json!(book.summary()));
        VectorRecord {
            id: book_id(book),
            values: self.placeholder_vector(),
            metadata,
        }
    }

    /// Save a profile and return its id.
    #[instrument(skip(self, profile), fields(name = %profile.name))]
    pub async fn save_profile(&self, profile: &ReaderProfile) -> TaleweaverResult<String> {
        let record = self.profile_record(profile, Utc::now().timestamp());
        let id = record.id.clone();
        self.store.upsert(vec![record]).await?;
        info!(%id, "Saved reader profile");
        Ok(id)
    }

    /// Save a book and return its id.
    #[instrument(skip(self, book), fields(book = %book.id()))]
    pub async fn save_book(&self, book: &CompletedBook) -> TaleweaverResult<String> {
        let record = self.book_record(book);
        let id = record.id.clone();
        self.store.upsert(vec![record]).await?;
        info!(%id, "Saved completed book");
        Ok(id)
    }

    /// Save a profile in the background; failures are only logged.
    ///
    /// Returns the id the profile will be stored under.
    pub fn save_profile_detached(&self, profile: ReaderProfile) -> String {
        let record = self.profile_record(&profile, Utc::now().timestamp());
        let id = record.id.clone();
        self.spawn_upsert(record);
        id
    }

    /// Save a book in the background; failures are only logged.
    pub fn save_book_detached(&self, book: CompletedBook) -> String {
        let record = self.book_record(&book);
        let id = record.id.clone();
        self.spawn_upsert(record);
        id
    }

    fn spawn_upsert(&self, record: VectorRecord) {
        if let Err(reason) = self.store.availability() {
            debug!(id = %record.id, %reason, "Archive disabled, record dropped");
            return;
        }
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let id = record.id.clone();
            match store.upsert(vec![record]).await {
                Ok(count) => debug!(%id, count, "Archived record"),
                Err(e) => warn!(%id, error = %e, "Failed to archive record"),
            }
        });
    }

    /// Most relevant archived records for the placeholder vector.
    #[instrument(skip(self))]
    pub async fn recent(&self, top_k: usize) -> TaleweaverResult<Vec<VectorMatch>> {
        self.store.query(self.placeholder_vector(), top_k).await
    }
}
