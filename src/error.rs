//! Service error types with HTTP status code mapping.
//!
//! [`BlogError`] is the central error type. Each variant maps to an HTTP
//! status code and a flat JSON body of the form `{"error": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ParsePostIdError, PostId, ValidationError};

/// JSON error response body.
///
/// ```json
/// { "error": "Not found" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant         | HTTP Status                |
/// |-----------------|----------------------------|
/// | `Validation`    | 400 Bad Request            |
/// | `PostNotFound`  | 404 Not Found              |
/// | `InvalidPostId` | 404 Not Found              |
/// | `Storage`       | 500 Internal Server Error  |
/// | `InvalidConfig` | 500 Internal Server Error  |
#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    /// Post with the given id does not exist.
    #[error("post not found: {0}")]
    PostNotFound(PostId),

    /// Path segment is not a post id, so nothing can match it.
    #[error(transparent)]
    InvalidPostId(#[from] ParsePostIdError),

    /// Request body failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage layer failure. The enclosing session has been rolled back.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BlogError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PostNotFound(_) | Self::InvalidPostId(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a client. Server-side failures are not
    /// described beyond a generic message.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::PostNotFound(_) | Self::InvalidPostId(_) => "Not found".to_string(),
            Self::Validation(err) => err.to_string(),
            Self::Storage(_) | Self::InvalidConfig(_) => "Internal server error".to_string(),
        }
    }

    /// `true` if the referenced post does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::PostNotFound(_) | Self::InvalidPostId(_))
    }

    /// `true` for errors caused by the server rather than the request.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::InvalidConfig(_))
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.public_message(),
        };
        (status, axum::Json(body)).into_response()
    }
}
