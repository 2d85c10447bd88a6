//! Post service implementation.

use crate::cache::{cache_keys, CacheCoordinator, CacheInterface};
use crate::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};
use crate::post_service::PostService;
use async_trait::async_trait;
use quill_config::LISTING_TTL_SECS;
use quill_core::{PostId, QuillError, QuillResult, UserId, ValidateExt};
use quill_domain::Post;
use quill_repository::PostRepository;
use quill_security::{require_actor, require_owner};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Post service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = PostService)]
pub struct PostServiceComponent {
    #[shaku(inject)]
    post_repository: Arc<dyn PostRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = Duration::from_secs(LISTING_TTL_SECS))]
    listing_ttl: Duration,
}

impl PostServiceComponent {
    /// Creates the service outside of a DI module.
    #[must_use]
    pub fn new(
        post_repository: Arc<dyn PostRepository>,
        cache: Arc<dyn CacheInterface>,
        listing_ttl: Duration,
    ) -> Self {
        Self {
            post_repository,
            cache,
            listing_ttl,
        }
    }

    fn coordinator(&self) -> CacheCoordinator<'_> {
        CacheCoordinator::new(self.cache.as_ref(), self.listing_ttl)
    }

    async fn fetch(&self, id: PostId) -> QuillResult<Post> {
        self.post_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| QuillError::not_found("Post", id))
    }
}

#[async_trait]
impl PostService for PostServiceComponent {
    async fn create_post(
        &self,
        actor: Option<UserId>,
        request: CreatePostRequest,
    ) -> QuillResult<PostResponse> {
        let actor = require_actor(actor)?;
        let request = request.normalized();
        request.validate_request()?;

        let post = Post::new(actor, request.title, request.content);
        let saved = self.post_repository.save(&post).await?;

        self.coordinator().invalidate_posts().await;

        info!("Post created: {} by {}", saved.id, actor);
        Ok(PostResponse::from(saved))
    }

    async fn get_post(&self, id: PostId) -> QuillResult<PostResponse> {
        debug!("Getting post: {}", id);
        self.fetch(id).await.map(PostResponse::from)
    }

    async fn list_posts(&self) -> QuillResult<Vec<PostResponse>> {
        let repository = &self.post_repository;
        self.coordinator()
            .read_through(cache_keys::POSTS_ALL, || async move {
                let posts = repository.find_all().await?;
                Ok(posts.into_iter().map(PostResponse::from).collect())
            })
            .await
    }

    async fn update_post(
        &self,
        actor: Option<UserId>,
        id: PostId,
        request: UpdatePostRequest,
    ) -> QuillResult<PostResponse> {
        let actor = require_actor(actor)?;
        let changes = request.into_changes()?;

        let post = self.fetch(id).await?;
        require_owner(actor, &post)?;

        let updated = self
            .post_repository
            .update(id, &changes)
            .await?
            .ok_or_else(|| QuillError::not_found("Post", id))?;

        self.coordinator().invalidate_posts().await;

        info!("Post updated: {}", id);
        Ok(PostResponse::from(updated))
    }

    async fn delete_post(&self, actor: Option<UserId>, id: PostId) -> QuillResult<()> {
        let actor = require_actor(actor)?;

        let post = self.fetch(id).await?;
        require_owner(actor, &post)?;

        if !self.post_repository.delete(id).await? {
            return Err(QuillError::not_found("Post", id));
        }

        // comments went with the post
        self.coordinator().invalidate_posts_and_comments(&[id]).await;

        info!("Post deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for PostServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostServiceComponent")
            .field("listing_ttl", &self.listing_ttl)
            .finish_non_exhaustive()
    }
}
