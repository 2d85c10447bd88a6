//! Authentication controller.

use crate::{
    extractors::JsonBody,
    responses::{created, ok, ApiResult, CreatedResult},
    state::AppState,
};
use axum::{extract::State, routing::post, Router};
use quill_service::{AuthResponse, LoginRequest, RegisterRequest};
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Invalid input", body = quill_core::ErrorResponse),
        (status = 409, description = "Email already registered", body = quill_core::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> CreatedResult<AuthResponse> {
    debug!("Registration request");

    let response = state.auth_service.register(request).await?;
    created(response)
}

/// Login with email and password.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, description = "Invalid email or password", body = quill_core::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<AuthResponse> {
    debug!("Login request");

    let response = state.auth_service.login(request).await?;
    ok(response)
}
