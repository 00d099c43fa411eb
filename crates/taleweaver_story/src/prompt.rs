//! Instruction text for story providers.

use crate::age_guidelines;
use taleweaver_core::{GenerationRequest, StoryMode, StoryPrompt};

const STORYTELLER: &str = "You are a warm, imaginative storyteller writing interactive picture-book \
stories for children. Keep every story kind, safe and encouraging.";

const FRESH_TASK: &str = "Write the opening scene of a new story in 3 to 4 short paragraphs. \
The scene must happen at a specific, named place the reader could visit, such as a café, park, \
library or bookshop. End the scene with 2 to 3 numbered choices for what happens next.";

const CONTINUATION_TASK: &str = "Continue the story from the reader's choice in 2 to 3 short \
paragraphs. The new scene must happen at a specific, named place. End with 2 to 3 numbered \
choices for what happens next.";

const ENDING_TASK: &str = "Bring the story to a heartwarming, conclusive ending in 2 to 3 short \
paragraphs. Resolve the adventure and close on a hopeful note. This is the final page, so do not \
offer the reader any further options.";

const FORMAT_WITH_CHOICES: &str = "Answer in exactly this format:\n\
STORY: <the story text>\n\
LOCATION: <the named place>\n\
CHOICES:\n\
1. <first choice>\n\
2. <second choice>\n\
3. <optional third choice>";

const FORMAT_ENDING: &str = "Answer in exactly this format:\n\
STORY: <the story text>\n\
LOCATION: <the named place>";

/// Builds provider instructions from a generation request.
///
/// # Examples
///
/// ```
/// use taleweaver_core::{GenerationRequest, StoryMode};
/// use taleweaver_story::PromptBuilder;
///
/// let request = GenerationRequest::builder()
///     .prompt_text("The fox found the lantern.")
///     .mode(StoryMode::Ending)
///     .build()
///     .unwrap();
///
/// let prompt = PromptBuilder::build(&request);
/// assert!(!prompt.instruction_text().contains("CHOICES:"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// System and user instructions for the request's mode.
    pub fn build(request: &GenerationRequest) -> StoryPrompt {
        let (task, format) = match request.mode() {
            StoryMode::Fresh => (FRESH_TASK, FORMAT_WITH_CHOICES),
            StoryMode::Continuation { .. } => (CONTINUATION_TASK, FORMAT_WITH_CHOICES),
            StoryMode::Ending => (ENDING_TASK, FORMAT_ENDING),
        };

        let mut system = format!("{}\n\n{}\n\n{}", STORYTELLER, task, format);
        let guidelines = age_guidelines(*request.age_band(), request.mode());
        if !guidelines.is_empty() {
            system.push_str("\n\n");
            system.push_str(&guidelines);
        }

        StoryPrompt::new(system, Self::user_text(request))
    }

    fn user_text(request: &GenerationRequest) -> String {
        let mut user = match request.mode() {
            StoryMode::Fresh => {
                format!("Write a story based on this prompt: {}", request.prompt_text())
            }
            StoryMode::Continuation { previous_choice } => format!(
                "Story so far:\n{}\n\nThe reader chose: {}\n\nContinue the story from this choice.",
                request.prompt_text(),
                previous_choice
            ),
            StoryMode::Ending => format!(
                "Story so far:\n{}\n\nWrite the happy ending.",
                request.prompt_text()
            ),
        };

        if let Some(genre) = request.genre() {
            user.push_str(&format!("\nGenre: {}", genre));
        }
        if !request.characters().is_empty() {
            user.push_str(&format!("\nCharacters: {}", request.characters().join(", ")));
        }
        if let Some(setting) = request.setting() {
            user.push_str(&format!("\nSetting: {}", setting));
        }
        user
    }
}
