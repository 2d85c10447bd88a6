//! Data Transfer Objects (DTOs).
//!
//! Create requests are trimmed and then checked with `validator`. Update
//! requests carry [`Patch`](quill_core::Patch) fields and are checked field
//! by field: only what the client supplied is validated and written.

mod auth_dto;
mod comment_dto;
mod post_dto;
mod user_dto;

pub use auth_dto::*;
pub use comment_dto::*;
pub use post_dto::*;
pub use user_dto::*;

use quill_core::QuillError;

/// Error for an update request that supplies no fields.
pub(crate) fn empty_payload() -> QuillError {
    QuillError::validation("payload cannot be empty")
}

pub(crate) fn trimmed(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}
