//! HTML surface: form-driven pages for browsing and editing posts.

pub mod error;
pub mod handlers;
pub mod templates;

use axum::Router;

use crate::app_state::AppState;

pub use error::PageError;

/// Builds the router for every HTML page.
pub fn build_router() -> Router<AppState> {
    handlers::routes()
}
