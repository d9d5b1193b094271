//! First-run sample content.

use super::sqlite::PostStore;
use crate::domain::PostDraft;
use crate::error::BlogError;

/// `(title, author, content)` of the posts inserted into an empty table.
pub const SEED_POSTS: [(&str, &str, &str); 2] = [
    (
        "Hello SQLAlchemy",
        "Alice",
        "This is your first DB-backed post.\nIt persists in SQLite.",
    ),
    (
        "Edit & Delete",
        "Bob",
        "You can edit or delete this post from the UI below.",
    ),
];

impl PostStore {
    /// Inserts [`SEED_POSTS`] if the table holds no rows. Both inserts
    /// share one session, so either both land or neither does.
    ///
    /// Returns the number of posts inserted (0 when the table was not
    /// empty).
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Storage`] on database failure, or
    /// [`BlogError::Validation`] if a seed entry were ever blank.
    pub async fn seed_if_empty(&self) -> Result<usize, BlogError> {
        let mut session = self.begin_write().await?;
        if session.count_posts().await? > 0 {
            session.commit().await?;
            return Ok(0);
        }

        for (title, author, content) in SEED_POSTS {
            let draft = PostDraft::new(title, author, content)?;
            session.insert_post(&draft).await?;
        }
        session.commit().await?;

        tracing::info!(count = SEED_POSTS.len(), "seeded empty post table");
        Ok(SEED_POSTS.len())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::StoreOptions;

    #[tokio::test]
    async fn seeds_exactly_once() {
        let Ok(store) = PostStore::connect(&StoreOptions::in_memory()).await else {
            panic!("store");
        };
        assert_eq!(store.seed_if_empty().await.ok(), Some(2));
        assert_eq!(store.seed_if_empty().await.ok(), Some(0));

        let Ok(mut session) = store.begin().await else {
            panic!("begin");
        };
        let Ok(posts) = session.list_posts().await else {
            panic!("list");
        };
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Edit & Delete", "Hello SQLAlchemy"]);
    }

    #[tokio::test]
    async fn non_empty_table_is_left_alone() {
        let Ok(store) = PostStore::connect(&StoreOptions::in_memory()).await else {
            panic!("store");
        };
        let Ok(mut session) = store.begin().await else {
            panic!("begin");
        };
        let Ok(draft) = PostDraft::new("Mine", "Me", "Text") else {
            panic!("draft");
        };
        assert!(session.insert_post(&draft).await.is_ok());
        assert!(session.commit().await.is_ok());

        assert_eq!(store.seed_if_empty().await.ok(), Some(0));
    }

    #[tokio::test]
    async fn restart_against_seeded_file_adds_nothing() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let options = StoreOptions {
            url: format!("sqlite://{}", dir.path().join("blog.db").display()),
            max_connections: 5,
            connect_timeout: std::time::Duration::from_secs(5),
        };

        let Ok(store) = PostStore::connect(&options).await else {
            panic!("first open");
        };
        assert_eq!(store.seed_if_empty().await.ok(), Some(2));
        store.close().await;

        let Ok(store) = PostStore::connect(&options).await else {
            panic!("reopen");
        };
        assert_eq!(store.seed_if_empty().await.ok(), Some(0));

        let Ok(mut session) = store.begin().await else {
            panic!("begin");
        };
        let Ok(posts) = session.list_posts().await else {
            panic!("list");
        };
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.created_at.is_some()));
    }
}
