//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, GenerationError, ProviderError, ServerError, StorageError};

/// Every error condition a Taleweaver crate can surface.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{ProviderError, ProviderErrorKind, TaleweaverError, TaleweaverErrorKind};
///
/// let err: TaleweaverError = ProviderError::new(ProviderErrorKind::EmptyResponse).into();
/// assert!(matches!(err.kind(), TaleweaverErrorKind::Provider(_)));
/// assert!(format!("{}", err).contains("Empty response from provider"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TaleweaverErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Provider adapter error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Story generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Media storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Taleweaver error with kind discrimination.
///
/// # Examples
///
/// ```
/// use taleweaver_error::{ConfigError, TaleweaverResult};
///
/// fn might_fail() -> TaleweaverResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Taleweaver Error: {}", _0)]
pub struct TaleweaverError(Box<TaleweaverErrorKind>);

impl TaleweaverError {
    /// Create a new error from a kind.
    pub fn new(kind: TaleweaverErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TaleweaverErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TaleweaverErrorKind
impl<T> From<T> for TaleweaverError
where
    T: Into<TaleweaverErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Taleweaver operations.
pub type TaleweaverResult<T> = std::result::Result<T, TaleweaverError>;
