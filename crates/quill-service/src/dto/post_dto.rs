//! Post DTOs.

use super::{empty_payload, trimmed};
use chrono::{DateTime, Utc};
use quill_core::{check_length, Patch, PostId, QuillResult, UserId};
use quill_domain::{Post, PostChanges};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 255;
pub const POST_CONTENT_MIN: usize = 3;
pub const POST_CONTENT_MAX: usize = 1200;

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    #[validate(length(min = 3, max = 255, message = "Title must be 3-255 characters"))]
    pub title: String,

    #[validate(length(min = 3, max = 1200, message = "Content must be 3-1200 characters"))]
    pub content: String,
}

impl CreatePostRequest {
    /// Returns the request with surrounding whitespace removed.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            title: trimmed(self.title),
            content: trimmed(self.content),
        }
    }
}

/// Partial post update. Omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub content: Patch<String>,
}

impl UpdatePostRequest {
    /// Validates the supplied fields and converts them to a change set.
    pub fn into_changes(self) -> QuillResult<PostChanges> {
        let title = self.title.map(trimmed).into_required("title")?;
        let content = self.content.map(trimmed).into_required("content")?;

        if let Some(title) = &title {
            check_length("title", title, TITLE_MIN, TITLE_MAX)?;
        }
        if let Some(content) = &content {
            check_length("content", content, POST_CONTENT_MIN, POST_CONTENT_MAX)?;
        }

        let changes = PostChanges { title, content };
        if changes.is_empty() {
            return Err(empty_payload());
        }
        Ok(changes)
    }
}

/// Post response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub id: PostId,
    pub owner_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            owner_id: post.owner_id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
