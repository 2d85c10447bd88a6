//! Entity store traits.
//!
//! Lookups return `Ok(None)` for unknown ids; only I/O and constraint
//! failures surface as errors.

use async_trait::async_trait;
use quill_core::{CommentId, Interface, PostId, QuillResult, UserId};
use quill_domain::{Comment, CommentChanges, Post, PostChanges, User, UserChanges};

/// User store.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> QuillResult<Option<User>>;

    /// Finds a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> QuillResult<Option<User>>;

    /// Checks if an email is already registered.
    async fn exists_by_email(&self, email: &str) -> QuillResult<bool>;

    /// Saves a new user. A taken email yields `Conflict`.
    async fn save(&self, user: &User) -> QuillResult<User>;

    /// Applies the supplied fields and returns the stored user, or `None`
    /// if no user has this id.
    async fn update(&self, id: UserId, changes: &UserChanges) -> QuillResult<Option<User>>;

    /// Deletes a user together with their posts and comments.
    ///
    /// Returns the ids of every post whose comments changed: the user's own
    /// posts and the posts they commented on. `None` if no user has this id.
    async fn delete(&self, id: UserId) -> QuillResult<Option<Vec<PostId>>>;
}

/// Post store.
#[async_trait]
pub trait PostRepository: Interface + Send + Sync {
    /// Finds a post by ID.
    async fn find_by_id(&self, id: PostId) -> QuillResult<Option<Post>>;

    /// Returns every post, newest first.
    async fn find_all(&self) -> QuillResult<Vec<Post>>;

    /// Saves a new post.
    async fn save(&self, post: &Post) -> QuillResult<Post>;

    /// Applies the supplied fields and returns the stored post.
    async fn update(&self, id: PostId, changes: &PostChanges) -> QuillResult<Option<Post>>;

    /// Deletes a post together with its comments.
    async fn delete(&self, id: PostId) -> QuillResult<bool>;
}

/// Comment store.
#[async_trait]
pub trait CommentRepository: Interface + Send + Sync {
    /// Finds a comment by ID.
    async fn find_by_id(&self, id: CommentId) -> QuillResult<Option<Comment>>;

    /// Returns the comments of a post, oldest first.
    async fn find_by_post(&self, post_id: PostId) -> QuillResult<Vec<Comment>>;


    /// Saves a new comment. An unknown post yields `NotFound`.
    async fn save(&self, comment: &Comment) -> QuillResult<Comment>;

    /// Applies the supplied fields and returns the stored comment.
    async fn update(&self, id: CommentId, changes: &CommentChanges)
        -> QuillResult<Option<Comment>>;

    /// Deletes a comment.
    async fn delete(&self, id: CommentId) -> QuillResult<bool>;
}
