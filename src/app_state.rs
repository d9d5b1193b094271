//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::PostStore;
use crate::service::PostService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Post service for all reads and writes.
    pub post_service: Arc<PostService>,
}

impl AppState {
    /// Wraps a connected store.
    #[must_use]
    pub fn new(store: PostStore) -> Self {
        Self {
            post_service: Arc::new(PostService::new(store)),
        }
    }
}
