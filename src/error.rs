use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type used by handlers and the task worker
pub type Result<T> = std::result::Result<T, ApiError>;

/// API error taxonomy
///
/// Every failure a handler can report maps to exactly one variant; each
/// variant maps to exactly one HTTP status. Database errors are logged
/// server-side and surfaced as opaque 500s.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No authenticated identity on the request
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Entity lookup by key found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authenticated, but not the owning organizer
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Missing required field, malformed filter, invalid key format
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Duplicate registration, no seats available
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "An internal error occurred.".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(json!({
                "error": status.canonical_reason().unwrap_or("Error"),
                "message": message,
            })),
        )
            .into_response()
    }
}
