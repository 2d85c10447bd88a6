//! User service trait definition.

use crate::dto::{UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use quill_core::{Interface, QuillResult, UserId};

/// Account management for the authenticated user.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Gets the actor's own profile.
    async fn get_current_user(&self, actor: Option<UserId>) -> QuillResult<UserResponse>;

    /// Applies a partial update to the actor's profile.
    async fn update_user(
        &self,
        actor: Option<UserId>,
        request: UpdateUserRequest,
    ) -> QuillResult<UserResponse>;

    /// Deletes the actor's account with all of its posts and comments.
    async fn delete_user(&self, actor: Option<UserId>) -> QuillResult<()>;
}
