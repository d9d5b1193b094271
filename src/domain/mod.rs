//! Domain layer: the post entity, its identifier, and input validation.

pub mod post;
pub mod post_id;

pub use post::{Post, PostDraft, PostField, PostPatch, ValidationError};
pub use post_id::{ParsePostIdError, PostId};
