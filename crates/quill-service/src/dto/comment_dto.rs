//! Comment DTOs.

use super::{empty_payload, trimmed};
use chrono::{DateTime, Utc};
use quill_core::{check_length, CommentId, Patch, PostId, QuillResult, UserId};
use quill_domain::{Comment, CommentChanges};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const COMMENT_MIN: usize = 3;
pub const COMMENT_MAX: usize = 400;

/// Request to create a comment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    #[validate(length(min = 3, max = 400, message = "Content must be 3-400 characters"))]
    pub content: String,
}

impl CreateCommentRequest {
    /// Returns the request with surrounding whitespace removed.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            content: trimmed(self.content),
        }
    }
}

/// Partial comment update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCommentRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub content: Patch<String>,
}

impl UpdateCommentRequest {
    /// Validates the supplied fields and converts them to a change set.
    pub fn into_changes(self) -> QuillResult<CommentChanges> {
        let content = self.content.map(trimmed).into_required("content")?;
        if let Some(content) = &content {
            check_length("content", content, COMMENT_MIN, COMMENT_MAX)?;
        }

        let changes = CommentChanges { content };
        if changes.is_empty() {
            return Err(empty_payload());
        }
        Ok(changes)
    }
}

/// Comment response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: CommentId,
    pub post_id: PostId,
    pub owner_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            owner_id: comment.owner_id,
            content: comment.content,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_trims_and_checks_length() {
        let request = UpdateCommentRequest {
            content: Patch::Value("   ok   ".to_string()),
        };
        assert!(request.into_changes().is_err());

        let request = UpdateCommentRequest {
            content: Patch::Value(" fine ".to_string()),
        };
        assert_eq!(request.into_changes().unwrap().content.as_deref(), Some("fine"));
    }

    #[test]
    fn test_empty_update_is_rejected() {
        assert!(UpdateCommentRequest::default().into_changes().is_err());
    }
}
