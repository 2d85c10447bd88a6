//! # Quill Domain
//!
//! Users, posts and comments, plus the ownership relation that the
//! authorization gate checks before every mutation.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
