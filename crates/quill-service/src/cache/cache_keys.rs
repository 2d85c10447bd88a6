//! Cache key builders.
//!
//! Exactly two key families exist: the full post listing and one comment
//! listing per post. Each key is all-or-nothing; there is no partial
//! invalidation inside an entry.

use quill_core::PostId;

/// Key of the cached post listing.
pub const POSTS_ALL: &str = "posts:all";

/// Key of the cached comment listing for one post.
#[must_use]
pub fn comments_of(post_id: PostId) -> String {
    format!("comments:{post_id}")
}
