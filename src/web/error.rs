//! HTTP error type.
//!
//! Handlers return `Result<T, ApiError>`; every variant renders as a JSON
//! body of the form `{"error": "..."}`. Internal failures are logged in full
//! but the client only sees a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub const GENERIC_FAILURE: &str =
    "Something went wrong. Please check your configuration and try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller sent an invalid or incomplete request.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    /// A required setting is missing. The message tells the operator which.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Anything unexpected.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, client_message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            ApiError::NotConfigured(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
            ApiError::Internal(m) => {
                error!(message = %m, "Chat handler error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_FAILURE.to_string(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

/// Fallback for routes hit with the wrong HTTP method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
