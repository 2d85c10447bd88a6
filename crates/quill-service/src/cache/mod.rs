//! Lookaside cache for the two listing read paths.
//!
//! The cache holds derived, disposable state. The store stays authoritative:
//! an entry may be absent, expired or (within the race described on
//! [`CacheCoordinator`]) briefly stale, and cache failures never fail a
//! request.

mod cache_interface;
pub mod cache_keys;
mod coordinator;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use coordinator::CacheCoordinator;
pub use memory_cache::InMemoryCache;
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters};
