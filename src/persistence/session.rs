//! Scoped unit of work over the `posts` table.
//!
//! A [`Session`] owns one SQLite transaction. [`Session::commit`] consumes
//! the session and makes its writes durable. A session dropped without a
//! commit (an early `?` return, a panic, a cancelled request future) is
//! rolled back by the underlying transaction. In every case the pooled
//! connection goes back to the pool when the session is gone.

use std::fmt;

use sqlx::{Sqlite, Transaction};

use super::models::{POST_COLUMNS, PostRow};
use crate::domain::{Post, PostDraft, PostId, PostPatch};
use crate::error::BlogError;

/// Transactional access to the `posts` table for one logical operation.
pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    /// Commits every write made through this session.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] if the commit fails; nothing from
    /// the session is persisted in that case.
    pub async fn commit(self) -> Result<(), BlogError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Discards every write made through this session.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] if the rollback statement fails.
    pub async fn rollback(self) -> Result<(), BlogError> {
        self.tx.rollback().await?;
        Ok(())
    }

    /// Number of stored posts.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] on database failure.
    pub async fn count_posts(&mut self) -> Result<i64, BlogError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(id) FROM posts")
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(count)
    }

    /// All posts, newest id first.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] on database failure.
    pub async fn list_posts(&mut self) -> Result<Vec<Post>, BlogError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY id DESC"
        ))
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// Looks up a single post.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] on database failure.
    pub async fn find_post(&mut self, id: PostId) -> Result<Option<Post>, BlogError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = ?"
        ))
        .bind(id.get())
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(Post::from))
    }

    /// Inserts a post and returns it as stored, with its assigned id and
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] on database failure.
    pub async fn insert_post(&mut self, draft: &PostDraft) -> Result<Post, BlogError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts (title, author, content) VALUES (?, ?, ?) RETURNING {POST_COLUMNS}"
        ))
        .bind(draft.title())
        .bind(draft.author())
        .bind(draft.content())
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row.into())
    }

    /// Applies the present fields of `patch`; `id` and `created_at` are
    /// never touched. Returns `None` if no such post exists.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] on database failure.
    pub async fn update_post(
        &mut self,
        id: PostId,
        patch: &PostPatch,
    ) -> Result<Option<Post>, BlogError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "UPDATE posts SET \
                title = COALESCE(?1, title), \
                author = COALESCE(?2, author), \
                content = COALESCE(?3, content) \
             WHERE id = ?4 RETURNING {POST_COLUMNS}"
        ))
        .bind(patch.title.as_deref())
        .bind(patch.author.as_deref())
        .bind(patch.content.as_deref())
        .bind(id.get())
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(Post::from))
    }

    /// Deletes a post. Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] on database failure.
    pub async fn delete_post(&mut self, id: PostId) -> Result<bool, BlogError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.get())
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
