//! Comment service trait definition.

use crate::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use async_trait::async_trait;
use quill_core::{CommentId, Interface, PostId, QuillResult, UserId};

/// Comment service trait.
///
/// Every operation is scoped to a post. A missing post is reported before
/// anything about the comment, and a comment that belongs to another post
/// is not found.
#[async_trait]
pub trait CommentService: Interface + Send + Sync {
    /// Creates a comment on a post.
    async fn create_comment(
        &self,
        actor: Option<UserId>,
        post_id: PostId,
        request: CreateCommentRequest,
    ) -> QuillResult<CommentResponse>;

    /// Gets one comment straight from the store.
    async fn get_comment(&self, post_id: PostId, id: CommentId) -> QuillResult<CommentResponse>;

    /// Lists the comments of a post, oldest first, through the listing cache.
    async fn list_comments(&self, post_id: PostId) -> QuillResult<Vec<CommentResponse>>;

    /// Applies a partial update to a comment the actor owns.
    async fn update_comment(
        &self,
        actor: Option<UserId>,
        post_id: PostId,
        id: CommentId,
        request: UpdateCommentRequest,
    ) -> QuillResult<CommentResponse>;

    /// Deletes a comment the actor owns.
    async fn delete_comment(
        &self,
        actor: Option<UserId>,
        post_id: PostId,
        id: CommentId,
    ) -> QuillResult<()>;
}
