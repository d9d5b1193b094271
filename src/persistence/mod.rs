//! Persistence layer: SQLite storage for posts.
//!
//! [`PostStore`] owns the connection pool, creates the schema and seeds an
//! empty table. Every logical operation runs inside a [`Session`], a
//! transaction that commits explicitly and rolls back when dropped.

pub mod models;
pub mod seed;
pub mod session;
pub mod sqlite;

pub use seed::SEED_POSTS;
pub use session::Session;
pub use sqlite::{PostStore, StoreOptions};
