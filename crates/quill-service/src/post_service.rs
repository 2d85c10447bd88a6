//! Post service trait definition.

use crate::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};
use async_trait::async_trait;
use quill_core::{Interface, PostId, QuillResult, UserId};

/// Post service trait.
///
/// Mutations take the verified actor; `None` is rejected before any store
/// access.
#[async_trait]
pub trait PostService: Interface + Send + Sync {
    /// Creates a post owned by the actor.
    async fn create_post(
        &self,
        actor: Option<UserId>,
        request: CreatePostRequest,
    ) -> QuillResult<PostResponse>;

    /// Gets one post straight from the store.
    async fn get_post(&self, id: PostId) -> QuillResult<PostResponse>;

    /// Lists every post, newest first, through the listing cache.
    async fn list_posts(&self) -> QuillResult<Vec<PostResponse>>;

    /// Applies a partial update to a post the actor owns.
    async fn update_post(
        &self,
        actor: Option<UserId>,
        id: PostId,
        request: UpdatePostRequest,
    ) -> QuillResult<PostResponse>;

    /// Deletes a post the actor owns, together with its comments.
    async fn delete_post(&self, actor: Option<UserId>, id: PostId) -> QuillResult<()>;
}
