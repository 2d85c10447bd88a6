//! Comment controller. Routes are nested under a post.

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
use quill_core::{CommentId, PostId, QuillError};
use quill_service::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};

/// Creates the comment router, to be nested under `/blogs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:post_id/comments", get(list_comments).post(create_comment))
        .route(
            "/:post_id/comments/:comment_id",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
}

fn parse_ids(post_id: &str, comment_id: &str) -> Result<(PostId, CommentId), QuillError> {
    Ok((
        parse_path_id("Post", post_id)?,
        parse_path_id("Comment", comment_id)?,
    ))
}

/// List the comments of a post, oldest first.
#[utoipa::path(
    get,
    path = "/blogs/{post_id}/comments",
    tag = "comments",
    params(("post_id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Comments of the post", body = [CommentResponse]),
        (status = 404, description = "No such post", body = quill_core::ErrorResponse)
    )
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Vec<CommentResponse>> {
    let post_id: PostId = parse_path_id("Post", &post_id)?;
    let comments = state.comment_service.list_comments(post_id).await?;
    ok(comments)
}

/// Comment on a post.
#[utoipa::path(
    post,
    path = "/blogs/{post_id}/comments",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(("post_id" = String, Path, description = "Post id")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 404, description = "No such post", body = quill_core::ErrorResponse)
    )
)]
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(post_id): Path<String>,
    JsonBody(request): JsonBody<CreateCommentRequest>,
) -> CreatedResult<CommentResponse> {
    let post_id: PostId = parse_path_id("Post", &post_id)?;
    let comment = state
        .comment_service
        .create_comment(user.actor(), post_id, request)
        .await?;
    created(comment)
}

/// Get one comment of a post.
#[utoipa::path(
    get,
    path = "/blogs/{post_id}/comments/{comment_id}",
    tag = "comments",
    params(
        ("post_id" = String, Path, description = "Post id"),
        ("comment_id" = String, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "The comment", body = CommentResponse),
        (status = 404, description = "No such post or comment", body = quill_core::ErrorResponse)
    )
)]
pub async fn get_comment(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> ApiResult<CommentResponse> {
    let (post_id, comment_id) = parse_ids(&post_id, &comment_id)?;
    let comment = state.comment_service.get_comment(post_id, comment_id).await?;
    ok(comment)
}

/// Update one of the caller's comments.
#[utoipa::path(
    put,
    path = "/blogs/{post_id}/comments/{comment_id}",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(
        ("post_id" = String, Path, description = "Post id"),
        ("comment_id" = String, Path, description = "Comment id")
    ),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 403, description = "Not the owner", body = quill_core::ErrorResponse),
        (status = 404, description = "No such post or comment", body = quill_core::ErrorResponse)
    )
)]
pub async fn update_comment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((post_id, comment_id)): Path<(String, String)>,
    JsonBody(request): JsonBody<UpdateCommentRequest>,
) -> ApiResult<CommentResponse> {
    let (post_id, comment_id) = parse_ids(&post_id, &comment_id)?;
    let comment = state
        .comment_service
        .update_comment(user.actor(), post_id, comment_id, request)
        .await?;
    ok(comment)
}

/// Delete one of the caller's comments.
#[utoipa::path(
    delete,
    path = "/blogs/{post_id}/comments/{comment_id}",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(
        ("post_id" = String, Path, description = "Post id"),
        ("comment_id" = String, Path, description = "Comment id")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Not the owner", body = quill_core::ErrorResponse),
        (status = 404, description = "No such post or comment", body = quill_core::ErrorResponse)
    )
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let (post_id, comment_id) = parse_ids(&post_id, &comment_id)?;
    state
        .comment_service
        .delete_comment(user.actor(), post_id, comment_id)
        .await?;
    Ok(no_content())
}
