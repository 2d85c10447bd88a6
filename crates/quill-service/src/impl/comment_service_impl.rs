//! Comment service implementation.

use crate::cache::{cache_keys, CacheCoordinator, CacheInterface};
use crate::comment_service::CommentService;
use crate::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use async_trait::async_trait;
use quill_config::LISTING_TTL_SECS;
use quill_core::{CommentId, PostId, QuillError, QuillResult, UserId, ValidateExt};
use quill_domain::Comment;
use quill_repository::{CommentRepository, PostRepository};
use quill_security::{require_actor, require_owner};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Comment service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = CommentService)]
pub struct CommentServiceComponent {
    #[shaku(inject)]
    post_repository: Arc<dyn PostRepository>,
    #[shaku(inject)]
    comment_repository: Arc<dyn CommentRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = Duration::from_secs(LISTING_TTL_SECS))]
    listing_ttl: Duration,
}

impl CommentServiceComponent {
    /// Creates the service outside of a DI module.
    #[must_use]
    pub fn new(
        post_repository: Arc<dyn PostRepository>,
        comment_repository: Arc<dyn CommentRepository>,
        cache: Arc<dyn CacheInterface>,
        listing_ttl: Duration,
    ) -> Self {
        Self {
            post_repository,
            comment_repository,
            cache,
            listing_ttl,
        }
    }

    fn coordinator(&self) -> CacheCoordinator<'_> {
        CacheCoordinator::new(self.cache.as_ref(), self.listing_ttl)
    }

    async fn ensure_post(&self, post_id: PostId) -> QuillResult<()> {
        match self.post_repository.find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(QuillError::not_found("Post", post_id)),
        }
    }

    /// Fetches a comment of an existing post.
    async fn fetch(&self, post_id: PostId, id: CommentId) -> QuillResult<Comment> {
        self.ensure_post(post_id).await?;
        self.comment_repository
            .find_by_id(id)
            .await?
            .filter(|comment| comment.belongs_to(post_id))
            .ok_or_else(|| QuillError::not_found("Comment", id))
    }
}

#[async_trait]
impl CommentService for CommentServiceComponent {
    async fn create_comment(
        &self,
        actor: Option<UserId>,
        post_id: PostId,
        request: CreateCommentRequest,
    ) -> QuillResult<CommentResponse> {
        let actor = require_actor(actor)?;
        let request = request.normalized();
        request.validate_request()?;

        self.ensure_post(post_id).await?;

        let comment = Comment::new(post_id, actor, request.content);
        let saved = self.comment_repository.save(&comment).await?;

        self.coordinator().invalidate_comments(post_id).await;

        info!("Comment created: {} on post {}", saved.id, post_id);
        Ok(CommentResponse::from(saved))
    }

    async fn get_comment(&self, post_id: PostId, id: CommentId) -> QuillResult<CommentResponse> {
        debug!("Getting comment {} of post {}", id, post_id);
        self.fetch(post_id, id).await.map(CommentResponse::from)
    }

    async fn list_comments(&self, post_id: PostId) -> QuillResult<Vec<CommentResponse>> {
        // A cached listing implies the post exists: deleting a post drops it.
        self.coordinator()
            .read_through(&cache_keys::comments_of(post_id), || async move {
                self.ensure_post(post_id).await?;
                let comments = self.comment_repository.find_by_post(post_id).await?;
                Ok(comments.into_iter().map(CommentResponse::from).collect())
            })
            .await
    }

    async fn update_comment(
        &self,
        actor: Option<UserId>,
        post_id: PostId,
        id: CommentId,
        request: UpdateCommentRequest,
    ) -> QuillResult<CommentResponse> {
        let actor = require_actor(actor)?;
        let changes = request.into_changes()?;

        let comment = self.fetch(post_id, id).await?;
        require_owner(actor, &comment)?;

        let updated = self
            .comment_repository
            .update(id, &changes)
            .await?
            .ok_or_else(|| QuillError::not_found("Comment", id))?;

        self.coordinator().invalidate_comments(post_id).await;

        info!("Comment updated: {}", id);
        Ok(CommentResponse::from(updated))
    }

    async fn delete_comment(
        &self,
        actor: Option<UserId>,
        post_id: PostId,
        id: CommentId,
    ) -> QuillResult<()> {
        let actor = require_actor(actor)?;

        let comment = self.fetch(post_id, id).await?;
        require_owner(actor, &comment)?;

        if !self.comment_repository.delete(id).await? {
            return Err(QuillError::not_found("Comment", id));
        }

        self.coordinator().invalidate_comments(post_id).await;

        info!("Comment deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for CommentServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentServiceComponent")
            .field("listing_ttl", &self.listing_ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CacheOp, InMemoryStore, RecordingCache};
    use quill_core::Patch;
    use quill_domain::Post;

    const TTL: Duration = Duration::from_secs(LISTING_TTL_SECS);

    struct Fixture {
        store: InMemoryStore,
        cache: Arc<RecordingCache>,
        service: CommentServiceComponent,
    }

    fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let cache = Arc::new(RecordingCache::new());
        let service =
            CommentServiceComponent::new(store.posts(), store.comments(), cache.clone(), TTL);
        Fixture {
            store,
            cache,
            service,
        }
    }

    fn seed_post(store: &InMemoryStore) -> Post {
        let post = Post::new(UserId::new(), "A post".to_string(), "Body text".to_string());
        store.insert_post(&post);
        post
    }

    fn comment(content: &str) -> CreateCommentRequest {
        CreateCommentRequest {
            content: content.to_string(),
        }
    }

    fn edit(content: &str) -> UpdateCommentRequest {
        UpdateCommentRequest {
            content: Patch::Value(content.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_invalidates_only_that_posts_comments() {
        let f = fixture();
        let post = seed_post(&f.store);
        let other = seed_post(&f.store);
        f.cache.set_raw(&cache_keys::comments_of(other.id), "[]", TTL).await.unwrap();
        f.cache.set_raw(cache_keys::POSTS_ALL, "[]", TTL).await.unwrap();
        f.cache.clear_ops();

        f.service.create_comment(Some(UserId::new()), post.id, comment("First!")).await.unwrap();

        assert_eq!(f.cache.deletes(), vec![cache_keys::comments_of(post.id)]);
        assert!(f.cache.raw(&cache_keys::comments_of(other.id)).is_some());
        assert!(f.cache.raw(cache_keys::POSTS_ALL).is_some());
    }

    #[tokio::test]
    async fn test_create_on_missing_post_is_not_found() {
        let f = fixture();
        let result = f
            .service
            .create_comment(Some(UserId::new()), PostId::new(), comment("Hello"))
            .await;
        assert!(matches!(result, Err(QuillError::NotFound { resource_type: "Post", .. })));
        assert_eq!(f.store.writes(), 0);
        assert!(f.cache.deletes().is_empty());
    }

    #[tokio::test]
    async fn test_missing_actor_is_rejected_before_store_access() {
        let f = fixture();
        f.store.set_unavailable(true);
        let result = f.service.create_comment(None, PostId::new(), comment("Hello")).await;
        assert!(matches!(result, Err(QuillError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_listing_is_refreshed_after_update() {
        let f = fixture();
        let post = seed_post(&f.store);
        let author = UserId::new();
        let created = f.service.create_comment(Some(author), post.id, comment("Draft")).await.unwrap();

        assert_eq!(f.service.list_comments(post.id).await.unwrap()[0].content, "Draft");

        f.service
            .update_comment(Some(author), post.id, created.id, edit("Final"))
            .await
            .unwrap();

        let listed = f.service.list_comments(post.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content, "Final");
    }

    #[tokio::test]
    async fn test_non_owner_update_is_forbidden_and_comment_unchanged() {
        let f = fixture();
        let post = seed_post(&f.store);
        let author = UserId::new();
        let created = f.service.create_comment(Some(author), post.id, comment("Original")).await.unwrap();
        let writes = f.store.writes();
        f.cache.clear_ops();

        let result = f
            .service
            .update_comment(Some(UserId::new()), post.id, created.id, edit("Hijacked"))
            .await;

        assert!(matches!(result, Err(QuillError::Forbidden(_))));
        assert_eq!(f.store.comment(created.id).unwrap().content, "Original");
        assert_eq!(f.store.writes(), writes);
        assert!(f.cache.deletes().is_empty());
    }

    #[tokio::test]
    async fn test_post_owner_cannot_delete_others_comment() {
        let f = fixture();
        let post = seed_post(&f.store);
        let created = f
            .service
            .create_comment(Some(UserId::new()), post.id, comment("Mine"))
            .await
            .unwrap();

        let result = f.service.delete_comment(Some(post.owner_id), post.id, created.id).await;

        assert!(matches!(result, Err(QuillError::Forbidden(_))));
        assert!(f.store.comment(created.id).is_some());
    }

    #[tokio::test]
    async fn test_comment_under_other_post_is_not_found() {
        let f = fixture();
        let post = seed_post(&f.store);
        let other = seed_post(&f.store);
        let author = UserId::new();
        let created = f.service.create_comment(Some(author), post.id, comment("Hello")).await.unwrap();

        let get = f.service.get_comment(other.id, created.id).await;
        assert!(matches!(get, Err(QuillError::NotFound { resource_type: "Comment", .. })));

        let delete = f.service.delete_comment(Some(author), other.id, created.id).await;
        assert!(matches!(delete, Err(QuillError::NotFound { .. })));
        assert!(f.store.comment(created.id).is_some());
    }

    #[tokio::test]
    async fn test_missing_post_is_reported_before_comment() {
        let f = fixture();
        let result = f.service.get_comment(PostId::new(), CommentId::new()).await;
        assert!(matches!(result, Err(QuillError::NotFound { resource_type: "Post", .. })));
    }

    #[tokio::test]
    async fn test_delete_invalidates_post_comments() {
        let f = fixture();
        let post = seed_post(&f.store);
        let author = UserId::new();
        let created = f.service.create_comment(Some(author), post.id, comment("Bye soon")).await.unwrap();
        f.service.list_comments(post.id).await.unwrap();
        f.cache.clear_ops();

        f.service.delete_comment(Some(author), post.id, created.id).await.unwrap();

        assert_eq!(f.cache.deletes(), vec![cache_keys::comments_of(post.id)]);
        assert!(f.service.list_comments(post.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_of_missing_post_is_not_found() {
        let f = fixture();
        let post_id = PostId::new();
        let result = f.service.list_comments(post_id).await;
        assert!(matches!(result, Err(QuillError::NotFound { .. })));
        assert!(f.cache.raw(&cache_keys::comments_of(post_id)).is_none());
        assert!(!f.cache.ops().iter().any(|op| matches!(op, CacheOp::Set(..))));
    }

    #[tokio::test]
    async fn test_cached_comment_listing_does_not_touch_store() {
        let f = fixture();
        let post = seed_post(&f.store);
        f.service
            .create_comment(Some(UserId::new()), post.id, comment("Cached"))
            .await
            .unwrap();
        f.service.list_comments(post.id).await.unwrap();

        // store down, cache still answers
        f.store.set_unavailable(true);
        let listed = f.service.list_comments(post.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content, "Cached");
    }

    #[tokio::test]
    async fn test_get_comment_bypasses_cache() {
        let f = fixture();
        let post = seed_post(&f.store);
        let created = f
            .service
            .create_comment(Some(UserId::new()), post.id, comment("Hello"))
            .await
            .unwrap();
        f.cache.clear_ops();

        assert_eq!(f.service.get_comment(post.id, created.id).await.unwrap(), created);
        assert!(f.cache.ops().is_empty());
    }
}
