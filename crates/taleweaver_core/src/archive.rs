//! Records persisted to the vector store.

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A reader's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderProfile {
    /// Reader's name
    pub name: String,
    /// Reader's age in years
    pub age: u8,
    /// Preferred narration voice
    pub voice: String,
}

/// A finished storybook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct CompletedBook {
    /// Caller-assigned book identifier
    id: String,
    /// Story theme
    theme: String,
    /// Page texts in reading order
    #[builder(default)]
    pages: Vec<String>,
    /// Reader's name
    #[builder(default)]
    user_name: String,
    /// Completion time
    #[builder(default = "Utc::now()")]
    completed_at: DateTime<Utc>,
}

impl CompletedBook {
    /// Creates a new builder for CompletedBook.
    pub fn builder() -> CompletedBookBuilder {
        CompletedBookBuilder::default()
    }

    /// One-line summary stored alongside the book.
    pub fn summary(&self) -> String {
        format!(
            "Theme: {}. Pages: {}. Completed by: {}",
            self.theme,
            self.pages.len(),
            self.user_name
        )
    }
}

/// A vector with metadata, as written to the vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Record identifier
    pub id: String,
    /// Embedding values
    pub values: Vec<f32>,
    /// Arbitrary metadata
    pub metadata: Map<String, Value>,
}

/// A query hit from the vector store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    /// Record identifier
    pub id: String,
    /// Similarity score
    pub score: f32,
    /// Stored metadata
    #[serde(default)]
    pub metadata: Map<String, Value>,
}
