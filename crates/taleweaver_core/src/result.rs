//! Story generation results.

use serde::{Deserialize, Serialize};

/// Fields extracted from a provider's raw response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedStory {
    /// The narrative body
    pub story_text: String,
    /// Named place where the scene happens; empty when the model gave none
    pub location: String,
    /// Reader choices in the order the model listed them
    pub choices: Vec<String>,
}

/// Record of one provider invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAttempt {
    /// Provider name as reported by the adapter
    pub provider_name: String,
    /// Whether the provider returned text
    pub succeeded: bool,
    /// Raw text on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    /// Failure reason otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
}

impl ProviderAttempt {
    /// A successful attempt.
    pub fn success(provider_name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            succeeded: true,
            raw_text: Some(raw_text.into()),
            error_reason: None,
        }
    }

    /// A failed attempt.
    pub fn failure(provider_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            succeeded: false,
            raw_text: None,
            error_reason: Some(reason.into()),
        }
    }
}

/// Outcome of a successful generation call.
///
/// Holds at most three choices, and none at all for an ending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// The narrative body
    pub story_text: String,
    /// Named place where the scene happens; possibly empty
    pub location: String,
    /// Reader choices, zero to three
    pub choices: Vec<String>,
    /// Name of the provider whose text was used
    pub provider_used: String,
    /// Every attempt made for this call, in order
    pub attempts: Vec<ProviderAttempt>,
}
