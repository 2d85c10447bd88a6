//! Cache coherence between store writes and listing entries.

use super::{cache_keys, CacheExt, CacheInterface};
use futures::future::join_all;
use quill_core::{PostId, QuillResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Binds store mutations to cache invalidations and serves listings
/// cache-aside.
///
/// Callers invoke an `invalidate_*` method only after the store confirmed
/// the write, synchronously within the same request. A failed write never
/// reaches the coordinator, so it never costs a cache entry.
///
/// Known race: a reader that misses, loads from the store, and is then
/// overtaken by a writer's invalidation will still store its (now stale)
/// snapshot. That entry survives until the next write to the same key or
/// until the TTL lapses. This bounded staleness is accepted.
#[derive(Clone, Copy)]
pub struct CacheCoordinator<'a> {
    cache: &'a dyn CacheInterface,
    ttl: Duration,
}

impl<'a> CacheCoordinator<'a> {
    /// Creates a coordinator over `cache` that stores listings for `ttl`.
    #[must_use]
    pub fn new(cache: &'a dyn CacheInterface, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Returns the cached listing under `key`, or loads it from the store
    /// and caches it.
    ///
    /// A failing or undecodable cache read counts as a miss. A failing
    /// cache write is logged and the fresh value is still returned. Store
    /// errors from `load` propagate.
    pub async fn read_through<T, F, Fut>(&self, key: &str, load: F) -> QuillResult<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = QuillResult<T>> + Send,
    {
        match self.cache.get::<T>(key).await {
            Ok(Some(cached)) => {
                debug!("Serving '{}' from cache", key);
                return Ok(cached);
            }
            Ok(None) => debug!("Cache miss for '{}', loading from store", key),
            Err(e) => warn!("Cache read for '{}' failed, falling back to store: {}", key, e),
        }

        let fresh = load().await?;

        if let Err(e) = self.cache.set(key, &fresh, self.ttl).await {
            warn!("Failed to cache '{}': {}", key, e);
        }

        Ok(fresh)
    }

    /// Drops the post listing after a post write.
    pub async fn invalidate_posts(&self) {
        self.invalidate(cache_keys::POSTS_ALL).await;
    }

    /// Drops the comment listing of one post after a comment write.
    pub async fn invalidate_comments(&self, post_id: PostId) {
        self.invalidate(&cache_keys::comments_of(post_id)).await;
    }

    /// Drops the post listing and the comment listings of `post_ids`.
    ///
    /// Used after deletes that cascade across several posts.
    pub async fn invalidate_posts_and_comments(&self, post_ids: &[PostId]) {
        let keys: Vec<String> = std::iter::once(cache_keys::POSTS_ALL.to_string())
            .chain(post_ids.iter().map(|id| cache_keys::comments_of(*id)))
            .collect();
        join_all(keys.iter().map(|key| self.invalidate(key))).await;
    }

    /// Deletes one key. Absent keys and cache failures are not errors.
    pub async fn invalidate(&self, key: &str) {
        match self.cache.delete(key).await {
            Ok(existed) => debug!("Invalidated '{}' (present: {})", key, existed),
            Err(e) => warn!("Failed to invalidate '{}': {}", key, e),
        }
    }
}

impl std::fmt::Debug for CacheCoordinator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheCoordinator")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
