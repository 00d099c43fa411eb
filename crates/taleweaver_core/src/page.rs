//! Page identity within a reading session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one page of one reading session.
///
/// Generated media is named after the page key, so concurrent sessions never
/// overwrite each other's narration or artwork.
///
/// # Examples
///
/// ```
/// use taleweaver_core::PageKey;
///
/// let first = PageKey::start();
/// let second = first.next();
/// assert_eq!(second.session_id, first.session_id);
/// assert_eq!(second.page_number, 2);
/// assert_eq!(second.file_name("mp3"), "page-2.mp3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageKey {
    /// Reading session the page belongs to
    pub session_id: Uuid,
    /// One-based page number
    pub page_number: u32,
}

impl PageKey {
    /// Create a key for an existing session.
    pub fn new(session_id: Uuid, page_number: u32) -> Self {
        Self {
            session_id,
            page_number,
        }
    }

    /// First page of a brand-new session.
    pub fn start() -> Self {
        Self::new(Uuid::new_v4(), 1)
    }

    /// The page after this one.
    pub fn next(&self) -> Self {
        Self::new(self.session_id, self.page_number.saturating_add(1))
    }

    /// Media file name for this page.
    pub fn file_name(&self, extension: &str) -> String {
        format!("page-{}.{}", self.page_number, extension)
    }

    /// Storage collection (directory) for the session.
    pub fn collection(&self) -> String {
        self.session_id.to_string()
    }

    /// Stable 32-bit seed derived from the session id.
    ///
    /// Used to keep illustration style consistent across a session's pages.
    pub fn art_seed(&self) -> u32 {
        let bytes = self.session_id.as_bytes();
        u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}
