//! Shared HTTP plumbing for the adapters.

use reqwest::Response;
use std::time::Duration;
use taleweaver_error::{ProviderError, ProviderErrorKind};
use taleweaver_interface::{Available, Probe, UnavailableReason};
use tracing::error;

/// Default per-request timeout for every adapter.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Map a reqwest send failure to a provider error.
#[track_caller]
pub(crate) fn transport_error(provider: &str, e: reqwest::Error) -> ProviderError {
    error!(provider, error = ?e, "HTTP request failed");
    let detail = if e.is_timeout() {
        format!("Request timed out: {}", e)
    } else {
        format!("Request failed: {}", e)
    };
    ProviderError::new(ProviderErrorKind::Http(detail))
}

/// Turn a non-success response into a provider error, keeping the body.
pub(crate) async fn ensure_success(
    provider: &str,
    response: Response,
) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    error!(provider, status = %status, body = %body, "Provider returned error");
    Err(ProviderError::new(ProviderErrorKind::from_status(
        status.as_u16(),
        body,
    )))
}

/// Decode a JSON body into `T`.
pub(crate) async fn decode_json<T: serde::de::DeserializeOwned>(
    provider: &str,
    response: Response,
) -> Result<T, ProviderError> {
    response.json::<T>().await.map_err(|e| {
        error!(provider, error = ?e, "Failed to parse response");
        ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
            "Failed to parse JSON: {}",
            e
        )))
    })
}

/// Configuration-level probe: is there a key at all?
pub(crate) fn key_probe(provider: &str, api_key: &str) -> Probe {
    if api_key.trim().is_empty() {
        Err(UnavailableReason::NotConfigured(format!(
            "{} API key is not set",
            provider
        )))
    } else {
        Ok(Available)
    }
}

/// Error for a call made without credentials.
#[track_caller]
pub(crate) fn missing_key(provider: &str) -> ProviderError {
    ProviderError::new(ProviderErrorKind::MissingCredentials(format!(
        "{} API key is not set",
        provider
    )))
}

/// Classify the result of a health request.
pub(crate) fn probe_response(result: Result<Response, reqwest::Error>) -> Probe {
    match result {
        Ok(response) if response.status().is_success() => Ok(Available),
        Ok(response) => Err(UnavailableReason::Unhealthy(format!(
            "status {}",
            response.status()
        ))),
        Err(e) => Err(UnavailableReason::Unreachable(e.to_string())),
    }
}

/// Strip a trailing slash so paths can be appended with `format!`.
pub(crate) fn trim_base(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}
