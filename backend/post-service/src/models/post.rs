use crate::error::PostError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A stored post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: String,
    /// Owner of the post
    pub user_id: String,
    pub content: String,
    pub title: String,
    pub likes: i64,
    pub dislikes: i64,
    pub views: i64,
    pub category: String,
    /// Assigned by the server on insert, never rewritten
    pub created_at: DateTime<Utc>,
    /// Absent until the first successful update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Current column values as a draft, for read-modify-write updates.
    pub fn to_draft(&self) -> PostDraft {
        PostDraft {
            id: Some(self.id.clone()),
            user_id: self.user_id.clone(),
            content: self.content.clone(),
            title: self.title.clone(),
            likes: self.likes,
            dislikes: self.dislikes,
            views: self.views,
            category: self.category.clone(),
        }
    }
}

/// Column values supplied by a caller. Update overwrites every column with
/// these values; nothing is merged with the stored row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct PostDraft {
    /// Optional caller-chosen identifier; generated on create when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub user_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub likes: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub dislikes: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub views: i64,
    #[serde(default)]
    pub category: String,
}

impl PostDraft {
    /// Check the fields that must hold before anything is sent to the store.
    ///
    /// Owners and requested ids are stored and matched verbatim, so a
    /// whitespace-only owner or an id with surrounding whitespace is refused
    /// here instead of being silently normalized.
    pub fn validate_fields(&self) -> Result<(), PostError> {
        self.validate().map_err(PostError::from)?;

        if !self.user_id.is_empty() && self.user_id.trim().is_empty() {
            return Err(PostError::invalid("user_id: must not be blank"));
        }
        if let Some(id) = self.id.as_deref() {
            if id.trim() != id {
                return Err(PostError::invalid(
                    "id: must not be blank or padded with whitespace",
                ));
            }
        }
        Ok(())
    }

    /// The caller-chosen identifier. An empty value means none was chosen.
    pub fn requested_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// One page of posts. `count` is the number of posts in this page, not the
/// number of rows matching the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostCollection {
    pub count: i64,
    pub posts: Vec<Post>,
}

impl From<Vec<Post>> for PostCollection {
    fn from(posts: Vec<Post>) -> Self {
        Self {
            count: posts.len() as i64,
            posts,
        }
    }
}
