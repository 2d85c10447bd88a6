//! # Quill Core
//!
//! Core types, error definitions, and validation helpers shared by every
//! layer of the Quill blog API.

pub mod error;
pub mod id;
pub mod patch;
pub mod result;
pub mod validation;

pub use error::*;
pub use id::*;
pub use patch::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
