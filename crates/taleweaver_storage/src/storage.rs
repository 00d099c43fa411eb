//! Storage trait definition.

use crate::{MediaMetadata, MediaReference};
use taleweaver_error::TaleweaverResult;

/// Trait for pluggable media storage backends.
#[async_trait::async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store media and return a reference.
    ///
    /// Storing under an existing collection/name replaces the previous file.
    async fn store(&self, data: &[u8], metadata: &MediaMetadata)
    -> TaleweaverResult<MediaReference>;

    /// Read a file by collection and name.
    ///
    /// Used when serving media to readers, who only know the URL.
    async fn load(&self, collection: &str, name: &str) -> TaleweaverResult<Vec<u8>>;
}
