//! OpenAPI documentation configuration.

use crate::controllers::health_controller::HealthResponse;
use quill_core::{CommentId, ErrorResponse, FieldError, PostId, UserId};
use quill_service::{
    AuthResponse, CommentResponse, CreateCommentRequest, CreatePostRequest, LoginRequest,
    PostResponse, RegisterRequest, UpdateCommentRequest, UpdatePostRequest, UpdateUserRequest,
    UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Quill blog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quill Blog API",
        version = "1.0.0",
        description = "Users, blog posts and comments with cached listings",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::auth_controller::register,
        crate::controllers::auth_controller::login,
        crate::controllers::user_controller::get_current_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::post_controller::list_posts,
        crate::controllers::post_controller::create_post,
        crate::controllers::post_controller::get_post,
        crate::controllers::post_controller::update_post,
        crate::controllers::post_controller::delete_post,
        crate::controllers::comment_controller::list_comments,
        crate::controllers::comment_controller::create_comment,
        crate::controllers::comment_controller::get_comment,
        crate::controllers::comment_controller::update_comment,
        crate::controllers::comment_controller::delete_comment,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            PostId,
            CommentId,
            ErrorResponse,
            FieldError,
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UpdateUserRequest,
            UserResponse,
            CreatePostRequest,
            UpdatePostRequest,
            PostResponse,
            CreateCommentRequest,
            UpdateCommentRequest,
            CommentResponse,
        )
    ),
    modifiers(&ApiPrefix, &SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "The caller's own account"),
        (name = "posts", description = "Blog posts"),
        (name = "comments", description = "Comments on a post"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Prefixes the versioned API paths; probes stay at the root.
struct ApiPrefix;

impl Modify for ApiPrefix {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let paths = std::mem::take(&mut openapi.paths.paths);
        openapi.paths.paths = paths
            .into_iter()
            .map(|(path, item)| match path.as_str() {
                "/health" | "/ready" | "/live" => (path, item),
                _ => (format!("/api/v1{path}"), item),
            })
            .collect();
    }
}

/// Security addon for JWT Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token authentication"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_api_and_probe_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/v1/blogs"));
        assert!(paths.contains_key("/api/v1/blogs/{post_id}/comments/{comment_id}"));
        assert!(paths.contains_key("/api/v1/auth/register"));
        assert!(paths.contains_key("/health"));
        assert!(!paths.contains_key("/blogs"));
    }
}
