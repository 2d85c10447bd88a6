//! Account controller. Every route acts on the caller's own account.

use crate::{
    extractors::{AuthenticatedUser, JsonBody},
    responses::{no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, routing::get, Router};
use quill_service::{UpdateUserRequest, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_current_user).put(update_user).delete(delete_user))
}

/// Get the caller's profile.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated", body = quill_core::ErrorResponse)
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<UserResponse> {
    let response = state.user_service.get_current_user(user.actor()).await?;
    ok(response)
}

/// Update any subset of the caller's profile fields.
#[utoipa::path(
    put,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid input", body = quill_core::ErrorResponse),
        (status = 409, description = "Email already registered", body = quill_core::ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", user.id);

    let response = state.user_service.update_user(user.actor(), request).await?;
    ok(response)
}

/// Delete the caller's account with all of its posts and comments.
#[utoipa::path(
    delete,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Not authenticated", body = quill_core::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", user.id);

    state.user_service.delete_user(user.actor()).await?;
    Ok(no_content())
}
