//! Prompt and sampling parameter types handed to story providers.

use serde::{Deserialize, Serialize};

/// Instruction text for a story provider, split into system and user parts.
///
/// Providers with a dedicated system slot send the parts separately; others
/// send [`StoryPrompt::instruction_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPrompt {
    /// Role, output format and style guidance
    pub system: String,
    /// The concrete story request
    pub user: String,
}

impl StoryPrompt {
    /// Create a prompt from its parts.
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    /// Both parts flattened into one instruction.
    pub fn instruction_text(&self) -> String {
        format!("{}\n\n{}", self.system, self.user)
    }
}

/// Sampling parameters forwarded to the provider unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}
