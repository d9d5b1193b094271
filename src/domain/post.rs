//! The `Post` entity and the validated inputs that create or change it.
//!
//! All text is trimmed before validation. A [`PostDraft`] is a complete,
//! validated triple used for inserts and full replaces; a [`PostPatch`]
//! carries any subset of fields for partial updates and is validated as a
//! whole so that a blank field never leaves a half-applied change behind.

use std::fmt;

use chrono::{DateTime, Utc};

use super::PostId;

/// A stored blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Storage-assigned identifier (immutable).
    pub id: PostId,
    /// Post title, trimmed and non-empty.
    pub title: String,
    /// Author name, trimmed and non-empty.
    pub author: String,
    /// Body text, trimmed and non-empty.
    pub content: String,
    /// Insertion timestamp assigned by the storage layer.
    pub created_at: Option<DateTime<Utc>>,
}

/// One of the editable text fields of a [`Post`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    /// The `title` column.
    Title,
    /// The `author` column.
    Author,
    /// The `content` column.
    Content,
}

impl PostField {
    /// Column / JSON key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for PostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A create or replace was missing at least one required field.
    #[error("title, author, content are required")]
    MissingFields,

    /// A partial update supplied a field that is blank after trimming.
    #[error("{0} cannot be empty")]
    EmptyField(PostField),
}

/// A complete, validated set of post fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    author: String,
    content: String,
}

impl PostDraft {
    /// Trims and validates the three required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] if any field is blank
    /// after trimming.
    pub fn new(title: &str, author: &str, content: &str) -> Result<Self, ValidationError> {
        let (title, author, content) = (title.trim(), author.trim(), content.trim());
        if title.is_empty() || author.is_empty() || content.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            content: content.to_string(),
        })
    }

    /// Trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Trimmed author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Trimmed content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A partial update. `None` leaves the stored value untouched.
///
/// Values are trimmed on construction but only checked by
/// [`PostPatch::validate`], so callers can decide whether a missing post
/// or a blank field is reported first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement author.
    pub author: Option<String>,
    /// Replacement content.
    pub content: Option<String>,
}

impl PostPatch {
    /// Builds a patch from optional raw values, trimming each one.
    #[must_use]
    pub fn new(title: Option<&str>, author: Option<&str>, content: Option<&str>) -> Self {
        let trim = |v: Option<&str>| v.map(|s| s.trim().to_string());
        Self {
            title: trim(title),
            author: trim(author),
            content: trim(content),
        }
    }

    /// Checks every present field, in `title`, `author`, `content` order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] naming the first present
    /// field that is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            (PostField::Title, &self.title),
            (PostField::Author, &self.author),
            (PostField::Content, &self.content),
        ];
        for (field, value) in fields {
            if value.as_deref().is_some_and(str::is_empty) {
                return Err(ValidationError::EmptyField(field));
            }
        }
        Ok(())
    }

    /// `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.content.is_none()
    }
}

impl From<PostDraft> for PostPatch {
    fn from(draft: PostDraft) -> Self {
        Self {
            title: Some(draft.title),
            author: Some(draft.author),
            content: Some(draft.content),
        }
    }
}
