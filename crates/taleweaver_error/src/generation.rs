//! Story generation errors.

use std::fmt;

/// One provider's failure as recorded by the story generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}: {}", provider, reason)]
pub struct ProviderFailure {
    /// Provider name as reported by the adapter
    pub provider: String,
    /// Human-readable failure reason
    pub reason: String,
}

impl ProviderFailure {
    /// Create a failure record.
    pub fn new(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

/// Story generation failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenerationErrorKind {
    /// Every configured provider failed; failures are in attempt order
    AllProvidersExhausted {
        /// Per-provider reasons, first attempt first
        failures: Vec<ProviderFailure>,
    },

    /// The caller's request was rejected before any provider was contacted
    InvalidRequest(String),
}

impl fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllProvidersExhausted { failures } if failures.is_empty() => {
                write!(f, "All providers exhausted: no story provider is configured")
            }
            Self::AllProvidersExhausted { failures } => {
                write!(f, "All providers exhausted: ")?;
                for (i, failure) in failures.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", failure)?;
                }
                Ok(())
            }
            Self::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{GenerationError, GenerationErrorKind, ProviderFailure};
///
/// let err = GenerationError::new(GenerationErrorKind::AllProvidersExhausted {
///     failures: vec![
///         ProviderFailure::new("anthropic", "timeout"),
///         ProviderFailure::new("openai", "401"),
///     ],
/// });
/// assert!(format!("{}", err).contains("anthropic: timeout; openai: 401"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Per-provider failures when every provider was exhausted.
    pub fn failures(&self) -> &[ProviderFailure] {
        match &self.kind {
            GenerationErrorKind::AllProvidersExhausted { failures } => failures,
            GenerationErrorKind::InvalidRequest(_) => &[],
        }
    }
}
