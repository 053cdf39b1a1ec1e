//! HTTP error handling for the relay API.
//!
//! Converts [`ShareError`] values into HTTP responses with the JSON body
//! shape clients expect: `{ "error": "<short message>" }`. No error here is
//! fatal — a bad request never crashes the registry or touches other
//! sessions' state.

use crate::error::ShareError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use drop_types::ErrorBody;

/// An API-facing error: a status code plus a short message.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status for the response.
    pub status: StatusCode,
    /// Short human-readable message.
    pub message: String,
}

impl ApiError {
    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<ShareError> for ApiError {
    fn from(err: ShareError) -> Self {
        let status = match &err {
            ShareError::SessionNotFound { .. } | ShareError::FileNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            ShareError::TooLarge { .. }
            | ShareError::BadFormat { .. }
            | ShareError::Decode(_) => StatusCode::BAD_REQUEST,
            ShareError::CodeInUse { .. } => StatusCode::CONFLICT,
            ShareError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ShareError::ExhaustedRetries { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
