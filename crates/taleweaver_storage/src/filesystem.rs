//! Filesystem-based media storage implementation.

use crate::{MediaMetadata, MediaReference, MediaStorage};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use taleweaver_error::{StorageError, StorageErrorKind, TaleweaverResult};
use uuid::Uuid;

/// Filesystem storage backend.
///
/// Stores media files as `{base_path}/{collection}/{name}`:
///
/// ```text
/// /var/taleweaver/media/
/// ├── 0f5c2a4e-.../
/// │   ├── page-1.mp3
/// │   ├── page-1.png
/// │   └── page-2.mp3
/// └── demo/
///     └── voice-nova.mp3
/// ```
///
/// Writes go to a temp file first and are renamed into place, so a reader
/// never sees a half-written page.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    base_path: PathBuf,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> TaleweaverResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem storage");
        Ok(Self { base_path })
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Compute SHA-256 hash of data.
    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Reject anything that could escape the base directory.
    fn validate_segment(segment: &str) -> TaleweaverResult<()> {
        let bad = segment.is_empty()
            || segment == "."
            || segment == ".."
            || segment.contains(['/', '\\'])
            || segment.contains('\0');
        if bad {
            return Err(
                StorageError::new(StorageErrorKind::InvalidPath(segment.to_string())).into(),
            );
        }
        Ok(())
    }

    /// Filesystem path for a collection and name.
    fn get_path(&self, collection: &str, name: &str) -> TaleweaverResult<PathBuf> {
        Self::validate_segment(collection)?;
        Self::validate_segment(name)?;
        Ok(self.base_path.join(collection).join(name))
    }

    async fn read(path: &Path) -> TaleweaverResult<Vec<u8>> {
        tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(path.display().to_string())).into()
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into()
            }
        })
    }
}

#[async_trait::async_trait]
impl MediaStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, data, metadata), fields(size = data.len(), media_type = %metadata.media_type))]
    async fn store(
        &self,
        data: &[u8],
        metadata: &MediaMetadata,
    ) -> TaleweaverResult<MediaReference> {
        let path = self.get_path(&metadata.collection, &metadata.name)?;
        let hash = Self::compute_hash(data);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            hash = %hash,
            path = %path.display(),
            size = data.len(),
            media_type = %metadata.media_type,
            "Stored media file"
        );

        Ok(MediaReference {
            id: Uuid::new_v4(),
            content_hash: hash,
            storage_backend: "filesystem".to_string(),
            collection: metadata.collection.clone(),
            name: metadata.name.clone(),
            storage_path: path.to_string_lossy().to_string(),
            size_bytes: data.len() as u64,
            media_type: metadata.media_type,
            mime_type: metadata.mime_type.clone(),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn load(&self, collection: &str, name: &str) -> TaleweaverResult<Vec<u8>> {
        let path = self.get_path(collection, name)?;
        Self::read(&path).await
    }
}
