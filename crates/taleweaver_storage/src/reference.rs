//! Media reference types.

use crate::MediaType;
use uuid::Uuid;

/// Reference to stored media.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaReference {
    /// Unique identifier for this media reference
    pub id: Uuid,
    /// SHA-256 hash of the content
    pub content_hash: String,
    /// Storage backend name (e.g., "filesystem")
    pub storage_backend: String,
    /// Grouping directory
    pub collection: String,
    /// File name within the collection
    pub name: String,
    /// Backend-specific path to the media
    pub storage_path: String,
    /// Size of the media in bytes
    pub size_bytes: u64,
    /// Type of media
    pub media_type: MediaType,
    /// MIME type
    pub mime_type: String,
}

impl MediaReference {
    /// `collection/name`, the portable key used in URLs.
    pub fn key(&self) -> String {
        format!("{}/{}", self.collection, self.name)
    }
}
