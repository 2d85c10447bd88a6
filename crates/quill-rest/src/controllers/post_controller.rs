//! Post controller.

use super::parse_path_id;
use crate::{
    extractors::{AuthenticatedUser, JsonBody},
    responses::{created, no_content, ok, ApiResult, AppError, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use quill_core::PostId;
use quill_service::{CreatePostRequest, PostResponse, UpdatePostRequest};

/// Creates the post router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:post_id", get(get_post).put(update_post).delete(delete_post))
}

/// List every post, newest first.
#[utoipa::path(
    get,
    path = "/blogs",
    tag = "posts",
    responses(
        (status = 200, description = "All posts", body = [PostResponse])
    )
)]
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Vec<PostResponse>> {
    let posts = state.post_service.list_posts().await?;
    ok(posts)
}

/// Create a post.
#[utoipa::path(
    post,
    path = "/blogs",
    tag = "posts",
    security(("bearer_auth" = [])),
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid input", body = quill_core::ErrorResponse),
        (status = 401, description = "Not authenticated", body = quill_core::ErrorResponse)
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(request): JsonBody<CreatePostRequest>,
) -> CreatedResult<PostResponse> {
    let post = state.post_service.create_post(user.actor(), request).await?;
    created(post)
}

/// Get one post.
#[utoipa::path(
    get,
    path = "/blogs/{post_id}",
    tag = "posts",
    params(("post_id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 404, description = "No such post", body = quill_core::ErrorResponse)
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<PostResponse> {
    let id: PostId = parse_path_id("Post", &post_id)?;
    let post = state.post_service.get_post(id).await?;
    ok(post)
}

/// Update the title and/or content of one of the caller's posts.
#[utoipa::path(
    put,
    path = "/blogs/{post_id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("post_id" = String, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 403, description = "Not the owner", body = quill_core::ErrorResponse),
        (status = 404, description = "No such post", body = quill_core::ErrorResponse)
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(post_id): Path<String>,
    JsonBody(request): JsonBody<UpdatePostRequest>,
) -> ApiResult<PostResponse> {
    let id: PostId = parse_path_id("Post", &post_id)?;
    let post = state.post_service.update_post(user.actor(), id, request).await?;
    ok(post)
}

/// Delete one of the caller's posts and its comments.
#[utoipa::path(
    delete,
    path = "/blogs/{post_id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("post_id" = String, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 403, description = "Not the owner", body = quill_core::ErrorResponse),
        (status = 404, description = "No such post", body = quill_core::ErrorResponse)
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(post_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: PostId = parse_path_id("Post", &post_id)?;
    state.post_service.delete_post(user.actor(), id).await?;
    Ok(no_content())
}
