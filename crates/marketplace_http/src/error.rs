//! API error responses.
//!
//! Every failure leaves the server as `{"message": "..."}` with a status
//! derived from the core `ErrorKind`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use marketplace_core::{ErrorKind, ImageError, ItemValidationError, RepoError};
use serde::{Deserialize, Serialize};

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Body shape shared by greetings and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Status code plus client-facing message.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub message: String,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Storage details stay in the log, not in the response.
    pub fn internal_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }

    fn from_kind(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::Validation => Self::bad_request(message),
            ErrorKind::NotFound => Self::not_found(message),
            ErrorKind::Storage => {
                error!(
                    "event=request_failed module=http status=error kind=storage error={}",
                    message
                );
                Self::internal_error()
            }
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(MessageResponse::new(self.message))).into_response()
    }
}

impl From<RepoError> for ApiErrorResponse {
    fn from(err: RepoError) -> Self {
        Self::from_kind(err.kind(), err.to_string())
    }
}

impl From<ImageError> for ApiErrorResponse {
    fn from(err: ImageError) -> Self {
        Self::from_kind(err.kind(), err.to_string())
    }
}

impl From<ItemValidationError> for ApiErrorResponse {
    fn from(err: ItemValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}
