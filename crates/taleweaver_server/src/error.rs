//! Mapping from service errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use taleweaver_error::{
    GenerationErrorKind, ServerError, ServerErrorKind, StorageErrorKind, TaleweaverError,
    TaleweaverErrorKind,
};
use tracing::error;

/// An error ready to be sent to the client as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 for a rejected parameter.
    #[track_caller]
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        TaleweaverError::from(ServerError::new(ServerErrorKind::InvalidParameter {
            field: field.to_string(),
            reason: reason.into(),
        }))
        .into()
    }

    /// Status code sent to the client.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message sent to the client.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<TaleweaverError> for ApiError {
    fn from(err: TaleweaverError) -> Self {
        match err.kind() {
            TaleweaverErrorKind::Generation(generation) => match &generation.kind {
                GenerationErrorKind::InvalidRequest(reason) => {
                    Self::new(StatusCode::BAD_REQUEST, reason.clone())
                }
                kind @ GenerationErrorKind::AllProvidersExhausted { .. } => {
                    error!(error = %err, "Story generation failed");
                    Self::new(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Story generation failed: {}", kind),
                    )
                }
            },
            TaleweaverErrorKind::Server(server) => match &server.kind {
                kind @ ServerErrorKind::InvalidParameter { .. } => {
                    Self::new(StatusCode::BAD_REQUEST, kind.to_string())
                }
                kind => {
                    error!(error = %err, "Server error");
                    Self::new(StatusCode::INTERNAL_SERVER_ERROR, kind.to_string())
                }
            },
            TaleweaverErrorKind::Storage(storage) => match &storage.kind {
                StorageErrorKind::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Media not found"),
                StorageErrorKind::InvalidPath(_) => {
                    Self::new(StatusCode::BAD_REQUEST, "Invalid media path")
                }
                _ => {
                    error!(error = %err, "Storage error");
                    Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Media storage failed")
                }
            },
            _ => {
                error!(error = %err, "Request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taleweaver_error::{GenerationError, ProviderFailure, StorageError};

    #[test]
    fn test_status_mapping() {
        let invalid: ApiError = TaleweaverError::from(GenerationError::new(
            GenerationErrorKind::InvalidRequest("Choice must be provided".into()),
        ))
        .into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message(), "Choice must be provided");

        let exhausted: ApiError = TaleweaverError::from(GenerationError::new(
            GenerationErrorKind::AllProvidersExhausted {
                failures: vec![ProviderFailure::new("anthropic", "timeout")],
            },
        ))
        .into();
        assert_eq!(exhausted.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(exhausted.message().contains("anthropic: timeout"));

        let missing: ApiError =
            TaleweaverError::from(StorageError::new(StorageErrorKind::NotFound("x".into()))).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let param = ApiError::invalid("lat", "out of range");
        assert_eq!(param.status(), StatusCode::BAD_REQUEST);
        assert!(param.message().contains("lat"));
    }
}
