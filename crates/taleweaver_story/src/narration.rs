//! Page narration.

use std::sync::Arc;
use taleweaver_core::{AudioFormat, PageKey, SpeechRequest};
use taleweaver_interface::SpeechSynthesizer;
use taleweaver_storage::{MediaMetadata, MediaReference, MediaStorage, MediaType};
use tracing::{debug, instrument, warn};

/// Longest text sent to the speech provider, in characters.
pub const MAX_NARRATION_CHARS: usize = 2800;

/// Collection holding voice samples.
pub const DEMO_COLLECTION: &str = "demo";

/// Reads story pages aloud and stores the audio next to the page.
///
/// Narration is best-effort: every failure is logged and turns into `None`.
#[derive(Clone)]
pub struct Narrator {
    speech: Arc<dyn SpeechSynthesizer>,
    storage: Arc<dyn MediaStorage>,
    default_voice: String,
}

impl std::fmt::Debug for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrator")
            .field("speech", &self.speech.name())
            .field("default_voice", &self.default_voice)
            .finish_non_exhaustive()
    }
}

impl Narrator {
    /// Create a narrator with the voice used when the reader picked none.
    pub fn new(
        speech: Arc<dyn SpeechSynthesizer>,
        storage: Arc<dyn MediaStorage>,
        default_voice: impl Into<String>,
    ) -> Self {
        Self {
            speech,
            storage,
            default_voice: default_voice.into(),
        }
    }

    /// Voice used when none is requested.
    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }

    /// Narrate a page and store it as `{session}/page-{n}.mp3`.
    #[instrument(skip(self, text), fields(session = %page.session_id, page = page.page_number))]
    pub async fn narrate(
        &self,
        text: &str,
        voice: Option<&str>,
        page: &PageKey,
    ) -> Option<MediaReference> {
        let format = AudioFormat::Mp3;
        let metadata = MediaMetadata::new(
            MediaType::Audio,
            format.mime_type(),
            page.collection(),
            page.file_name(format.extension()),
        );
        self.speak(text, voice, format, metadata).await
    }

    /// Short sample of a voice, stored as `demo/voice-{voice}.mp3`.
    #[instrument(skip(self))]
    pub async fn voice_demo(&self, voice: Option<&str>) -> Option<MediaReference> {
        let voice = voice.unwrap_or(&self.default_voice);
        let text = format!(
            "Hello! I'm {}, and I'll be reading your story today. Let's go on an adventure together!",
            voice
        );
        let format = AudioFormat::Mp3;
        let metadata = MediaMetadata::new(
            MediaType::Audio,
            format.mime_type(),
            DEMO_COLLECTION,
            format!("voice-{}.{}", voice, format.extension()),
        );
        self.speak(&text, Some(voice), format, metadata).await
    }

    async fn speak(
        &self,
        text: &str,
        voice: Option<&str>,
        format: AudioFormat,
        metadata: MediaMetadata,
    ) -> Option<MediaReference> {
        if let Err(reason) = self.speech.availability() {
            debug!(%reason, "Narration skipped");
            return None;
        }

        let request = SpeechRequest {
            text: truncate_chars(text, MAX_NARRATION_CHARS).to_string(),
            voice: voice.unwrap_or(&self.default_voice).to_string(),
            format,
        };
        let audio = match self.speech.synthesize(&request).await {
            Ok(audio) => audio,
            Err(e) => {
                warn!(provider = self.speech.name(), error = %e, "Narration failed");
                return None;
            }
        };

        match self.storage.store(&audio, &metadata).await {
            Ok(reference) => {
                debug!(key = %reference.key(), bytes = reference.size_bytes, "Stored narration");
                Some(reference)
            }
            Err(e) => {
                warn!(error = %e, "Failed to store narration");
                None
            }
        }
    }
}

/// Longest prefix of `text` holding at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_chars;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("", 3), "");
    }
}
