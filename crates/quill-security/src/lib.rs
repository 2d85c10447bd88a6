//! # Quill Security
//!
//! Bearer tokens that identify the actor, password hashing, and the
//! ownership gate that decides whether an actor may change an entity.

pub mod jwt;
pub mod ownership;
pub mod password;

pub use jwt::*;
pub use ownership::*;
pub use password::*;
