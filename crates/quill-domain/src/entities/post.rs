//! Post entity.

use super::Owned;
use chrono::{DateTime, Utc};
use quill_core::{PostId, UserId};
use serde::{Deserialize, Serialize};

/// A blog post, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub owner_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Creates a new post with a freshly generated id.
    #[must_use]
    pub fn new(owner_id: UserId, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(),
            owner_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a change set in place. The owner never changes.
    pub fn apply(&mut self, changes: &PostChanges) {
        if let Some(title) = &changes.title {
            self.title.clone_from(title);
        }
        if let Some(content) = &changes.content {
            self.content.clone_from(content);
        }
        self.updated_at = Utc::now();
    }
}

impl Owned for Post {
    fn owner_id(&self) -> UserId {
        self.owner_id
    }
}

/// Fields of a post update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    /// Returns true if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}
