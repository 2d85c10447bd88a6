//! Authentication service trait definition.

use crate::dto::{AuthResponse, LoginRequest, RegisterRequest};
use async_trait::async_trait;
use quill_core::{Interface, QuillResult};
use quill_security::Claims;

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Interface + Send + Sync {
    /// Registers a new user and issues an access token.
    async fn register(&self, request: RegisterRequest) -> QuillResult<AuthResponse>;

    /// Checks credentials and issues an access token.
    async fn login(&self, request: LoginRequest) -> QuillResult<AuthResponse>;

    /// Validates an access token and returns its claims.
    async fn validate_token(&self, token: &str) -> QuillResult<Claims>;
}
