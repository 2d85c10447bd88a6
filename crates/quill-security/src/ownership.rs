//! Ownership gate.
//!
//! An actor may update or delete an entity only when they own it. The check
//! runs on the freshly fetched entity, after the existence lookup and before
//! the write, and its result is never cached.

use quill_core::{QuillError, QuillResult, UserId};
use quill_domain::Owned;
use tracing::debug;

/// Returns true if `actor` may mutate `target`.
#[must_use]
pub fn can_mutate<T: Owned + ?Sized>(actor: UserId, target: &T) -> bool {
    actor == target.owner_id()
}

/// Fails with `Forbidden` unless `actor` owns `target`.
pub fn require_owner<T: Owned + ?Sized>(actor: UserId, target: &T) -> QuillResult<()> {
    if can_mutate(actor, target) {
        Ok(())
    } else {
        debug!("Actor {} denied on entity owned by {}", actor, target.owner_id());
        Err(QuillError::forbidden(
            "You don't have permission to modify this resource",
        ))
    }
}

/// Resolves the acting user, rejecting anonymous requests.
///
/// Runs before any lookup so that an anonymous mutation never touches the
/// store.
pub fn require_actor(actor: Option<UserId>) -> QuillResult<UserId> {
    actor.ok_or_else(|| QuillError::unauthorized("Authentication required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_domain::{Comment, Post};
    use quill_core::PostId;

    #[test]
    fn test_owner_can_mutate() {
        let owner = UserId::new();
        let post = Post::new(owner, "t".to_string(), "c".to_string());
        assert!(can_mutate(owner, &post));
        assert!(require_owner(owner, &post).is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let post = Post::new(UserId::new(), "t".to_string(), "c".to_string());
        let stranger = UserId::new();
        assert!(!can_mutate(stranger, &post));
        assert!(matches!(
            require_owner(stranger, &post),
            Err(QuillError::Forbidden(_))
        ));
    }

    #[test]
    fn test_post_owner_cannot_mutate_others_comment() {
        let post_owner = UserId::new();
        let commenter = UserId::new();
        let comment = Comment::new(PostId::new(), commenter, "hi".to_string());
        assert!(!can_mutate(post_owner, &comment));
        assert!(can_mutate(commenter, &comment));
    }

    #[test]
    fn test_missing_actor_is_unauthorized() {
        assert!(matches!(require_actor(None), Err(QuillError::Unauthorized(_))));
        let id = UserId::new();
        assert_eq!(require_actor(Some(id)).unwrap(), id);
    }
}
