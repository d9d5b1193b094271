//! HTML rendering of [`BlogError`].

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::templates;
use crate::error::BlogError;

/// A [`BlogError`] surfaced on the HTML side: not-found conditions render
/// the generic not-found page, everything else the generic error page.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct PageError(#[from] BlogError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if self.0.is_not_found() {
            return not_found();
        }
        if self.0.is_server_error() {
            tracing::error!(error = %self.0, "page request failed");
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(templates::server_error_page()),
        )
            .into_response()
    }
}

/// 404 response with the not-found page.
#[must_use]
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(templates::not_found_page())).into_response()
}
