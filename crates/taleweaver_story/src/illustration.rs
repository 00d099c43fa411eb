//! Page illustration.

use std::sync::Arc;
use taleweaver_core::{ImageRequest, PageKey};
use taleweaver_interface::ImageGenerator;
use taleweaver_storage::{MediaMetadata, MediaReference, MediaStorage, MediaType};
use tracing::{debug, instrument, warn};

/// Image shown when no illustration could be produced.
pub const PLACEHOLDER_URL: &str = "https://placehold.co/600x400?text=Illustration+Unavailable";

/// Story characters included in the image prompt.
const SCENE_EXCERPT_CHARS: usize = 400;

/// Artwork for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Illustration {
    /// Generated and stored
    Stored(MediaReference),
    /// Generation failed; show this URL instead
    Placeholder(String),
}

impl Illustration {
    /// The fallback illustration.
    pub fn placeholder() -> Self {
        Self::Placeholder(PLACEHOLDER_URL.to_string())
    }

    /// Whether real artwork was produced.
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored(_))
    }
}

/// Generates page artwork with a per-session seed.
///
/// All pages of one session share a seed, so the artwork keeps a consistent
/// look from page to page.
#[derive(Clone)]
pub struct Illustrator {
    images: Arc<dyn ImageGenerator>,
    storage: Arc<dyn MediaStorage>,
    width: u32,
    height: u32,
    cfg_scale: f32,
    steps: u32,
}

impl std::fmt::Debug for Illustrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Illustrator")
            .field("images", &self.images.name())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Illustrator {
    /// Create an illustrator producing 1024x1024 images.
    pub fn new(images: Arc<dyn ImageGenerator>, storage: Arc<dyn MediaStorage>) -> Self {
        Self {
            images,
            storage,
            width: 1024,
            height: 1024,
            cfg_scale: 7.0,
            steps: 30,
        }
    }

    /// Image dimensions in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Prompt adherence and diffusion steps.
    pub fn with_quality(mut self, cfg_scale: f32, steps: u32) -> Self {
        self.cfg_scale = cfg_scale;
        self.steps = steps;
        self
    }

    /// Prompt describing the page for the image model.
    pub fn image_prompt(story: &str, theme: &str) -> String {
        let scene = crate::truncate_chars(story.trim(), SCENE_EXCERPT_CHARS);
        format!(
            "Children's storybook illustration in a soft watercolor style, warm colors, \
             friendly characters, no text. Theme: {}. Scene: {}",
            theme.trim(),
            scene
        )
    }

    /// Illustrate a page and store it as `{session}/page-{n}.png`.
    #[instrument(skip(self, story), fields(session = %page.session_id, page = page.page_number))]
    pub async fn illustrate(&self, story: &str, theme: &str, page: &PageKey) -> Illustration {
        if let Err(reason) = self.images.availability() {
            debug!(%reason, "Illustration skipped");
            return Illustration::placeholder();
        }

        let request = match ImageRequest::builder()
            .prompt(Self::image_prompt(story, theme))
            .width(self.width)
            .height(self.height)
            .cfg_scale(self.cfg_scale)
            .steps(self.steps)
            .seed(page.art_seed())
            .build()
        {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Invalid image request");
                return Illustration::placeholder();
            }
        };

        let png = match self.images.generate_image(&request).await {
            Ok(png) => png,
            Err(e) => {
                warn!(provider = self.images.name(), error = %e, "Illustration failed");
                return Illustration::placeholder();
            }
        };

        let metadata = MediaMetadata::new(
            MediaType::Image,
            "image/png",
            page.collection(),
            page.file_name("png"),
        );
        match self.storage.store(&png, &metadata).await {
            Ok(reference) => {
                debug!(key = %reference.key(), "Stored illustration");
                Illustration::Stored(reference)
            }
            Err(e) => {
                warn!(error = %e, "Failed to store illustration");
                Illustration::placeholder()
            }
        }
    }
}
