//! Comment entity.

use super::Owned;
use chrono::{DateTime, Utc};
use quill_core::{CommentId, PostId, UserId};
use serde::{Deserialize, Serialize};

/// A comment attached to one post and owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub owner_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment with a freshly generated id.
    #[must_use]
    pub fn new(post_id: PostId, owner_id: UserId, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: CommentId::new(),
            post_id,
            owner_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the comment hangs off the given post.
    #[must_use]
    pub fn belongs_to(&self, post_id: PostId) -> bool {
        self.post_id == post_id
    }

    /// Applies a change set in place.
    pub fn apply(&mut self, changes: &CommentChanges) {
        if let Some(content) = &changes.content {
            self.content.clone_from(content);
        }
        self.updated_at = Utc::now();
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> UserId {
        self.owner_id
    }
}

/// Fields of a comment update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentChanges {
    pub content: Option<String>,
}

impl CommentChanges {
    /// Returns true if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_belongs_to() {
        let post_id = PostId::new();
        let comment = Comment::new(post_id, UserId::new(), "Nice post".to_string());
        assert!(comment.belongs_to(post_id));
        assert!(!comment.belongs_to(PostId::new()));
    }

    #[test]
    fn test_apply_keeps_owner_and_post() {
        let mut comment = Comment::new(PostId::new(), UserId::new(), "first".to_string());
        let (owner, post) = (comment.owner_id, comment.post_id);
        comment.apply(&CommentChanges {
            content: Some("edited".to_string()),
        });
        assert_eq!(comment.content, "edited");
        assert_eq!(comment.owner_id(), owner);
        assert_eq!(comment.post_id, post);
    }
}
