//! Data Transfer Objects for REST request/response serialization.

pub mod post_dto;

pub use post_dto::*;
