//! Service layer: business logic orchestration.
//!
//! [`PostService`] is the single entry point handlers use to read and
//! change posts.

pub mod post_service;

pub use post_service::PostService;
