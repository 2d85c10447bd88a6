//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `post_service.rs`).

pub mod auth_service_impl;
pub mod comment_service_impl;
pub mod post_service_impl;
pub mod user_service_impl;

pub use auth_service_impl::AuthServiceComponent;
pub use comment_service_impl::{CommentServiceComponent, CommentServiceComponentParameters};
pub use post_service_impl::{PostServiceComponent, PostServiceComponentParameters};
pub use user_service_impl::{UserServiceComponent, UserServiceComponentParameters};
