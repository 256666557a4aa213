//! Mapping of store outcomes onto the JSON error envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use tictac_core::{ErrorBody, ErrorCode};
use tracing::{error, instrument};

use crate::store::StoreError;

/// An error leaving an HTTP handler.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{} {}: {}", status, code, message)]
pub struct ApiError {
    status: StatusCode,
    code: ErrorCode,
    message: String,
    path: String,
}

impl ApiError {
    /// Creates an error for the request at `path`.
    pub fn new(
        status: StatusCode,
        code: ErrorCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            path: path.into(),
        }
    }

    /// A malformed body or query string.
    pub fn bad_request(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, message, path)
    }

    /// Maps a store error to its status code and wire code.
    #[instrument(skip_all, fields(path = %path))]
    pub fn from_store(err: StoreError, path: &str) -> Self {
        let (status, code) = match &err {
            StoreError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::GameNotFound),
            StoreError::Rejected(rejection) => (StatusCode::BAD_REQUEST, rejection.code()),
            StoreError::CapacityExceeded { .. } | StoreError::IdsExhausted => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::StoreUnavailable)
            }
            StoreError::Corrupted { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::SessionCorrupted)
            }
        };
        if err.is_fatal() {
            error!(error = %err, "Store failure");
        }
        Self::new(status, code, err.to_string(), path)
    }

    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Wire code of the response.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    fn body(&self) -> ErrorBody {
        ErrorBody {
            timestamp: Utc::now(),
            status: self.status.as_u16(),
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            message: self.message.clone(),
            path: self.path.clone(),
            code: self.code,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}
