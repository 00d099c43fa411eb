//! Full story pages: text plus narration, artwork and nearby places.

use crate::{
    DEFAULT_STORY_RESULTS, Illustration, Illustrator, LocationService, Narrator, StoryGenerator,
};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use taleweaver_core::{
    AgeBand, Business, Coordinates, GenerationRequest, GenerationResult, PageKey, StoryMode,
};
use taleweaver_error::{BuilderError, GenerationError, GenerationErrorKind, TaleweaverResult};
use taleweaver_storage::MediaReference;
use tracing::{info, instrument};

/// Shortest accepted theme or choice, after trimming.
const MIN_INPUT_CHARS: usize = 2;

/// What the pipeline knows about the reader for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReaderContext {
    /// Age in years, used to pick writing guidelines
    pub age: Option<u8>,
    /// Narration voice; the narrator's default when absent
    pub voice: Option<String>,
    /// Where the reader is, for place suggestions
    pub position: Option<Coordinates>,
}

impl ReaderContext {
    fn age_band(&self) -> Option<AgeBand> {
        self.age.map(AgeBand::from_age)
    }
}

/// One generated page with its side-channel media.
#[derive(Debug, Clone, Getters)]
pub struct StoryPage {
    /// Theme the story was started with
    theme: String,
    /// Session and page number
    page_key: PageKey,
    /// Generated text, location and choices
    result: GenerationResult,
    /// Stored narration, if it succeeded
    narration: Option<MediaReference>,
    /// Stored artwork or a placeholder
    illustration: Illustration,
    /// Places related to the story; empty without a reader position
    businesses: Vec<Business>,
}

/// Composes text generation with narration, illustration and places.
///
/// Text generation is the only hard failure. The side channels run together
/// once the text exists and each degrades on its own.
#[derive(Debug, Clone)]
pub struct StoryPipeline {
    generator: Arc<StoryGenerator>,
    narrator: Arc<Narrator>,
    illustrator: Arc<Illustrator>,
    locations: Arc<LocationService>,
}

impl StoryPipeline {
    /// Assemble a pipeline from its parts.
    pub fn new(
        generator: Arc<StoryGenerator>,
        narrator: Arc<Narrator>,
        illustrator: Arc<Illustrator>,
        locations: Arc<LocationService>,
    ) -> Self {
        Self {
            generator,
            narrator,
            illustrator,
            locations,
        }
    }

    /// The text generator.
    pub fn generator(&self) -> &StoryGenerator {
        &self.generator
    }

    /// The narrator.
    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    /// The location service.
    pub fn locations(&self) -> &LocationService {
        &self.locations
    }

    /// First page of a new story about `theme`.
    ///
    /// # Errors
    ///
    /// Rejects themes shorter than two characters, and fails when every
    /// story provider fails.
    #[instrument(skip(self, reader), fields(session = %page_key.session_id))]
    pub async fn start(
        &self,
        theme: &str,
        page_key: PageKey,
        reader: &ReaderContext,
    ) -> TaleweaverResult<StoryPage> {
        let theme = validated(theme, "Theme must be at least 2 characters long")?;
        let request = self.request(
            format!("An interactive adventure about {}", theme),
            StoryMode::Fresh,
            reader,
        )?;
        self.compose(theme, request, page_key, reader).await
    }

    /// Next page after the reader picked `choice`.
    ///
    /// # Errors
    ///
    /// Rejects choices shorter than two characters, and fails when every
    /// story provider fails.
    #[instrument(skip(self, story_context, reader), fields(session = %page_key.session_id, page = page_key.page_number))]
    pub async fn continue_story(
        &self,
        theme: &str,
        story_context: &str,
        choice: &str,
        page_key: PageKey,
        reader: &ReaderContext,
    ) -> TaleweaverResult<StoryPage> {
        let choice = validated(choice, "Choice must be provided")?;
        let request = self.request(story_context.to_string(), StoryMode::continuation(choice), reader)?;
        self.compose(theme.trim(), request, page_key, reader).await
    }

    /// Closing page with no further choices.
    #[instrument(skip(self, story_context, reader), fields(session = %page_key.session_id, page = page_key.page_number))]
    pub async fn finish(
        &self,
        theme: &str,
        story_context: &str,
        page_key: PageKey,
        reader: &ReaderContext,
    ) -> TaleweaverResult<StoryPage> {
        let request = self.request(story_context.to_string(), StoryMode::Ending, reader)?;
        self.compose(theme.trim(), request, page_key, reader).await
    }

    fn request(
        &self,
        prompt_text: String,
        mode: StoryMode,
        reader: &ReaderContext,
    ) -> TaleweaverResult<GenerationRequest> {
        let mut builder = GenerationRequest::builder();
        builder.prompt_text(prompt_text).mode(mode);
        if let Some(band) = reader.age_band() {
            builder.age_band(band);
        }
        Ok(builder
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?)
    }

    async fn compose(
        &self,
        theme: &str,
        request: GenerationRequest,
        page_key: PageKey,
        reader: &ReaderContext,
    ) -> TaleweaverResult<StoryPage> {
        let result = self.generator.generate(&request).await?;

        let story = result.story_text.as_str();
        let (narration, illustration, businesses) = tokio::join!(
            self.narrator.narrate(story, reader.voice.as_deref(), &page_key),
            self.illustrator.illustrate(story, theme, &page_key),
            async {
                match reader.position {
                    Some(position) => {
                        self.locations
                            .find_story_related(story, position, DEFAULT_STORY_RESULTS)
                            .await
                    }
                    None => Vec::new(),
                }
            },
        );

        info!(
            provider = %result.provider_used,
            narrated = narration.is_some(),
            illustrated = illustration.is_stored(),
            businesses = businesses.len(),
            "Story page ready"
        );
        Ok(StoryPage {
            theme: theme.to_string(),
            page_key,
            result,
            narration,
            illustration,
            businesses,
        })
    }
}

fn validated<'a>(input: &'a str, message: &str) -> TaleweaverResult<&'a str> {
    let trimmed = input.trim();
    if trimmed.chars().count() < MIN_INPUT_CHARS {
        return Err(GenerationError::new(GenerationErrorKind::InvalidRequest(message.to_string())).into());
    }
    Ok(trimmed)
}
