//! Post DTOs for create, update, get, list and delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Post, PostDraft, PostId, PostPatch, ValidationError};

/// Post record returned by every JSON endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostDto {
    /// Post identifier.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Body text.
    pub content: String,
    /// RFC 3339 creation timestamp, `null` if unset.
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.get(),
            title: post.title,
            author: post.author,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

/// Request body for `POST /api/posts` and `PUT /api/posts/{id}`.
///
/// Values may be any JSON scalar: strings are used as-is, numbers and
/// booleans are stringified, `null` counts as blank. A body that is not a
/// JSON object is treated as `{}`.
///
/// Stringified scalars are never blank, so `false` and `0` are accepted as
/// the text `"false"` and `"0"` rather than rejected as empty. `null` in
/// an update is rejected as blank instead of being stored as text.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PostPayload {
    /// Post title.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Value>,
    /// Author name.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub author: Option<Value>,
    /// Body text.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub content: Option<Value>,
}

/// Keeps an explicit `null` distinguishable from an absent key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Text form of a JSON scalar; `null` becomes the empty string.
fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl PostPayload {
    /// Parses a raw request body, falling back to an empty payload when
    /// the body is missing or not a JSON object.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<Value>(body)
            .ok()
            .filter(Value::is_object)
            .and_then(|value| serde_json::from_value(value).ok());
        parsed.unwrap_or_else(|| {
            tracing::debug!(len = body.len(), "unreadable post payload treated as empty");
            Self::default()
        })
    }

    /// Validates the payload as a complete post.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] if any field is absent
    /// or blank.
    pub fn to_draft(&self) -> Result<PostDraft, ValidationError> {
        let field = |v: &Option<Value>| v.as_ref().map(text_of).unwrap_or_default();
        PostDraft::new(
            &field(&self.title),
            &field(&self.author),
            &field(&self.content),
        )
    }

    /// Converts the payload into an unvalidated partial update.
    #[must_use]
    pub fn to_patch(&self) -> PostPatch {
        let field = |v: &Option<Value>| v.as_ref().map(text_of);
        PostPatch::new(
            field(&self.title).as_deref(),
            field(&self.author).as_deref(),
            field(&self.content).as_deref(),
        )
    }
}

/// Response body for `DELETE /api/posts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletePostResponse {
    /// Always `"deleted"`.
    pub status: String,
    /// Identifier of the removed post.
    pub id: i64,
}

impl DeletePostResponse {
    /// Confirmation for a removed post.
    #[must_use]
    pub fn deleted(id: PostId) -> Self {
        Self {
            status: "deleted".to_string(),
            id: id.get(),
        }
    }
}
