//! Media metadata types.

use crate::MediaType;

/// Where and what to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMetadata {
    /// Type of media (image, audio)
    pub media_type: MediaType,
    /// MIME type (e.g., "image/png", "audio/mpeg")
    pub mime_type: String,
    /// Grouping directory, normally the reading session id
    pub collection: String,
    /// File name within the collection
    pub name: String,
}

impl MediaMetadata {
    /// Describe a file to store.
    pub fn new(
        media_type: MediaType,
        mime_type: impl Into<String>,
        collection: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            media_type,
            mime_type: mime_type.into(),
            collection: collection.into(),
            name: name.into(),
        }
    }
}
