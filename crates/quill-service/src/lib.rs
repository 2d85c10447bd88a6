//! # Quill Service
//!
//! Application services for accounts, posts and comments, the listing cache
//! and the coordinator that keeps it coherent with the store.
//!
//! Every mutation runs the same sequence:
//!
//! ```text
//! actor present? ─▶ validate ─▶ fetch target ─▶ ownership gate ─▶ write ─▶ invalidate
//!   Unauthorized    Validation     NotFound        Forbidden               (swallowed)
//! ```

pub mod auth_service;
pub mod cache;
pub mod comment_service;
pub mod dto;
pub mod gateway;
pub mod r#impl;
pub mod post_service;
pub mod user_service;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use auth_service::*;
pub use cache::*;
pub use comment_service::*;
pub use dto::*;
pub use gateway::*;
pub use post_service::*;
pub use r#impl::*;
pub use user_service::*;
