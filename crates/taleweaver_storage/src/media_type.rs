//! Media type enumeration.

/// Type of media content.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum MediaType {
    /// Illustration (PNG)
    #[display("image")]
    Image,
    /// Narration (MP3, Opus, WAV)
    #[display("audio")]
    Audio,
}

impl MediaType {
    /// Guess the media type and MIME type from a file name's extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_storage::MediaType;
    ///
    /// assert_eq!(MediaType::from_file_name("page-1.mp3"), Some((MediaType::Audio, "audio/mpeg")));
    /// assert_eq!(MediaType::from_file_name("notes.txt"), None);
    /// ```
    pub fn from_file_name(name: &str) -> Option<(Self, &'static str)> {
        let extension = name.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "png" => Some((Self::Image, "image/png")),
            "jpg" | "jpeg" => Some((Self::Image, "image/jpeg")),
            "mp3" => Some((Self::Audio, "audio/mpeg")),
            "opus" | "ogg" => Some((Self::Audio, "audio/ogg")),
            "wav" => Some((Self::Audio, "audio/wav")),
            _ => None,
        }
    }
}
