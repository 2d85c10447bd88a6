//! REST API controllers.

pub mod auth_controller;
pub mod comment_controller;
pub mod health_controller;
pub mod post_controller;
pub mod user_controller;

use quill_core::QuillError;
use std::str::FromStr;

/// Parses an id from a path segment. Ids are opaque, so one that does not
/// parse names nothing.
pub(crate) fn parse_path_id<T: FromStr>(resource_type: &'static str, raw: &str) -> Result<T, QuillError> {
    raw.parse()
        .map_err(|_| QuillError::not_found(resource_type, raw))
}
