//! PostgreSQL repository implementations.

mod comment_repository;
mod post_repository;
mod user_repository;

pub use comment_repository::PgCommentRepository;
pub use post_repository::PgPostRepository;
pub use user_repository::PgUserRepository;
