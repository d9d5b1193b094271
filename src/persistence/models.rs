//! Database row models and their mapping onto domain types.

use chrono::{DateTime, Utc};

use crate::domain::{Post, PostId};

/// Column list shared by every query that returns whole posts.
pub(crate) const POST_COLUMNS: &str = "id, title, author, content, created_at";

/// A row from the `posts` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    /// `INTEGER PRIMARY KEY AUTOINCREMENT`.
    pub id: i64,
    /// `VARCHAR(200)`; width is advisory in SQLite.
    pub title: String,
    /// `VARCHAR(100)`; width is advisory in SQLite.
    pub author: String,
    /// `TEXT`.
    pub content: String,
    /// RFC 3339 text written by the column default at insert time.
    pub created_at: Option<DateTime<Utc>>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId::new(row.id),
            title: row.title,
            author: row.author,
            content: row.content,
            created_at: row.created_at,
        }
    }
}
