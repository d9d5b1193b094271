//! Post service: one scoped session per logical operation.

use crate::domain::{Post, PostDraft, PostId, PostPatch};
use crate::error::BlogError;
use crate::persistence::PostStore;

/// Orchestration layer for all post operations.
///
/// Stateless coordinator over a [`PostStore`]. Every method follows the
/// pattern: open session → read/write → commit → log → return. Writes go
/// through [`PostStore::begin_write`]. An error anywhere before the commit
/// drops the session, which rolls it back.
#[derive(Debug, Clone)]
pub struct PostService {
    store: PostStore,
}

impl PostService {
    /// Creates a new `PostService`.
    #[must_use]
    pub const fn new(store: PostStore) -> Self {
        Self { store }
    }

    /// Lists every post, newest id first.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] on database failure.
    pub async fn list_posts(&self) -> Result<Vec<Post>, BlogError> {
        let mut session = self.store.begin().await?;
        let posts = session.list_posts().await?;
        session.commit().await?;
        Ok(posts)
    }

    /// Fetches one post.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::PostNotFound`] if the id is unknown.
    pub async fn get_post(&self, id: PostId) -> Result<Post, BlogError> {
        let mut session = self.store.begin().await?;
        let post = session
            .find_post(id)
            .await?
            .ok_or(BlogError::PostNotFound(id))?;
        session.commit().await?;
        Ok(post)
    }

    /// Inserts a new post and returns it with its assigned id and
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] on database failure.
    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, BlogError> {
        let mut session = self.store.begin_write().await?;
        let post = session.insert_post(draft).await?;
        session.commit().await?;

        tracing::info!(post_id = %post.id, author = %post.author, "post created");
        Ok(post)
    }

    /// Applies a partial update.
    ///
    /// A missing post is reported before the patch is validated. A patch
    /// with any blank field is rejected as a whole; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::PostNotFound`] if the id is unknown, or
    /// [`BlogError::Validation`] if a present field is blank.
    pub async fn update_post(&self, id: PostId, patch: &PostPatch) -> Result<Post, BlogError> {
        let mut session = self.store.begin_write().await?;
        let existing = session
            .find_post(id)
            .await?
            .ok_or(BlogError::PostNotFound(id))?;
        patch.validate()?;

        if patch.is_empty() {
            session.commit().await?;
            return Ok(existing);
        }

        let post = session
            .update_post(id, patch)
            .await?
            .ok_or(BlogError::PostNotFound(id))?;
        session.commit().await?;

        tracing::info!(post_id = %id, "post updated");
        Ok(post)
    }

    /// Overwrites title, author and content of an existing post.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::PostNotFound`] if the id is unknown.
    pub async fn replace_post(&self, id: PostId, draft: PostDraft) -> Result<Post, BlogError> {
        let patch = PostPatch::from(draft);
        let mut session = self.store.begin_write().await?;
        let post = session
            .update_post(id, &patch)
            .await?
            .ok_or(BlogError::PostNotFound(id))?;
        session.commit().await?;

        tracing::info!(post_id = %id, "post replaced");
        Ok(post)
    }

    /// Deletes a post.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::PostNotFound`] if the id is unknown.
    pub async fn delete_post(&self, id: PostId) -> Result<(), BlogError> {
        if self.delete_post_if_present(id).await? {
            Ok(())
        } else {
            Err(BlogError::PostNotFound(id))
        }
    }

    /// Deletes a post if it exists. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] on database failure.
    pub async fn delete_post_if_present(&self, id: PostId) -> Result<bool, BlogError> {
        let mut session = self.store.begin_write().await?;
        let deleted = session.delete_post(id).await?;
        session.commit().await?;

        if deleted {
            tracing::info!(post_id = %id, "post deleted");
        } else {
            tracing::debug!(post_id = %id, "delete of absent post ignored");
        }
        Ok(deleted)
    }

    /// Checks storage reachability.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] if the database does not answer.
    pub async fn ping(&self) -> Result<(), BlogError> {
        self.store.ping().await
    }
}
