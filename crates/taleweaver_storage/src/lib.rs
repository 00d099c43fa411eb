//! Media storage for Taleweaver.
//!
//! Narration audio and illustrations are written once per story page and
//! served back to the reader. Files are grouped by collection (one per reading
//! session) and named by the caller. Each returned reference records the
//! SHA-256 hash of the bytes written.
//!
//! # Example
//!
//! ```rust
//! use taleweaver_storage::{FileSystemStorage, MediaMetadata, MediaStorage, MediaType};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileSystemStorage::new("/tmp/taleweaver-media")?;
//! let metadata = MediaMetadata::new(MediaType::Audio, "audio/mpeg", "session-1", "page-1.mp3");
//!
//! let reference = storage.store(b"ID3...", &metadata).await?;
//! let served = storage.load(&reference.collection, &reference.name).await?;
//! assert_eq!(served, b"ID3...");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod media_type;
mod metadata;
mod reference;
mod storage;

pub use filesystem::FileSystemStorage;
pub use media_type::MediaType;
pub use metadata::MediaMetadata;
pub use reference::MediaReference;
pub use storage::MediaStorage;
pub use taleweaver_error::{StorageError, StorageErrorKind};
