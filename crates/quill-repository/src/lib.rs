//! # Quill Repository
//!
//! Entity store for users, posts and comments, backed by PostgreSQL.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn PostRepository>   (store interface)
//! PgPostRepository               (SQLx implementation)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! PostgreSQL
//! ```
//!
//! Deleting a user removes their posts and comments, and deleting a post
//! removes its comments. Both cascades are enforced by foreign keys, so they
//! complete inside the single `DELETE` statement.

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
