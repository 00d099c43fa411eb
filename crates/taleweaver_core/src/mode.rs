//! Story generation modes.

use serde::{Deserialize, Serialize};

/// Where in the story a generation call sits.
///
/// The reader's previous choice travels inside [`StoryMode::Continuation`],
/// so a continuation can never be built without one and the other modes can
/// never carry one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StoryMode {
    /// Opening page of a new story
    #[default]
    #[display("fresh")]
    Fresh,
    /// Page following the reader's choice
    #[display("continuation")]
    Continuation {
        /// The option the reader picked on the previous page
        previous_choice: String,
    },
    /// Final, choice-free page
    #[display("ending")]
    Ending,
}

impl StoryMode {
    /// Continuation after the given choice.
    pub fn continuation(previous_choice: impl Into<String>) -> Self {
        Self::Continuation {
            previous_choice: previous_choice.into(),
        }
    }

    /// The previous choice, present only for continuations.
    pub fn previous_choice(&self) -> Option<&str> {
        match self {
            Self::Continuation { previous_choice } => Some(previous_choice),
            Self::Fresh | Self::Ending => None,
        }
    }

    /// Whether this is the terminal page.
    pub fn is_ending(&self) -> bool {
        matches!(self, Self::Ending)
    }
}
