//! Errors raised by external provider adapters.

/// Provider adapter failure conditions.
///
/// Every kind is recoverable from the generator's point of view: the failing
/// provider is recorded and the next one is tried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Credentials or required configuration are absent
    #[display("Missing credentials: {}", _0)]
    MissingCredentials(String),

    /// Transport-level failure (connect, DNS, timeout)
    #[display("HTTP error: {}", _0)]
    Http(String),

    /// Provider rejected the credentials
    #[display("Unauthorized: {}", _0)]
    Unauthorized(String),

    /// Provider throttled the request
    #[display("Rate limit exceeded: {}", _0)]
    RateLimited(String),

    /// Provider returned a non-success status
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error message
        message: String,
    },

    /// Response body did not have the expected shape
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),

    /// Response parsed but carried no usable content
    #[display("Empty response from provider")]
    EmptyResponse,

    /// Request construction failed
    #[display("Builder error: {}", _0)]
    Builder(String),
}

impl ProviderErrorKind {
    /// Classify a non-success HTTP status into the matching kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_error::ProviderErrorKind;
    ///
    /// let kind = ProviderErrorKind::from_status(429, "slow down");
    /// assert!(matches!(kind, ProviderErrorKind::RateLimited(_)));
    /// ```
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized(message),
            429 => Self::RateLimited(message),
            _ => Self::Api { status, message },
        }
    }
}

/// Provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
