//! Domain entities.

mod comment;
mod post;
mod user;

pub use comment::*;
pub use post::*;
pub use user::*;

use quill_core::UserId;

/// An entity that belongs to exactly one user.
///
/// Ownership is fixed at creation; no operation reassigns it.
pub trait Owned {
    /// Returns the owning user's id.
    fn owner_id(&self) -> UserId;
}
