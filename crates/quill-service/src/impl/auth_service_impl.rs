//! Authentication service implementation.

use crate::auth_service::AuthService;
use crate::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use async_trait::async_trait;
use chrono::Utc;
use quill_core::{QuillError, QuillResult, ValidateExt};
use quill_domain::{Email, User};
use quill_repository::UserRepository;
use quill_security::{Claims, PasswordHasherInterface, TokenProviderInterface};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = AuthService)]
pub struct AuthServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    password_hasher: Arc<dyn PasswordHasherInterface>,
    #[shaku(inject)]
    token_provider: Arc<dyn TokenProviderInterface>,
}

impl AuthServiceComponent {
    /// Creates the service outside of a DI module.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        token_provider: Arc<dyn TokenProviderInterface>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_provider,
        }
    }

    fn create_auth_response(&self, user: &User) -> QuillResult<AuthResponse> {
        let token = self
            .token_provider
            .issue_access_token(user.id, user.email.as_str())?;

        Ok(AuthResponse {
            access_token: token.token,
            token_type: token.token_type,
            expires_in: (token.expires_at - Utc::now()).num_seconds(),
            user: UserResponse::from(user),
        })
    }
}

#[async_trait]
impl AuthService for AuthServiceComponent {
    async fn register(&self, request: RegisterRequest) -> QuillResult<AuthResponse> {
        let request = request.validated()?;
        let email = Email::new(request.email)
            .map_err(|e| QuillError::validation(format!("email: {e}")))?;
        debug!("Registering user: {}", email);

        if self.user_repository.exists_by_email(email.as_str()).await? {
            return Err(QuillError::conflict(format!(
                "Email '{email}' is already registered"
            )));
        }

        let password_hash = self.password_hasher.hash(&request.password)?;
        let user = User::new(email, password_hash, request.first_name, request.last_name);

        // the unique index still wins if two registrations race
        let saved = self.user_repository.save(&user).await?;

        info!("User registered: {}", saved.id);
        self.create_auth_response(&saved)
    }

    async fn login(&self, request: LoginRequest) -> QuillResult<AuthResponse> {
        request.validate_request()?;
        let email = request.email.trim().to_lowercase();
        debug!("Login attempt for: {}", email);

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                QuillError::InvalidCredentials
            })?;

        if !self.password_hasher.verify(&request.password, &user.password_hash)? {
            warn!("Login failed: invalid password - {}", user.id);
            return Err(QuillError::InvalidCredentials);
        }

        info!("User logged in: {}", user.id);
        self.create_auth_response(&user)
    }

    async fn validate_token(&self, token: &str) -> QuillResult<Claims> {
        self.token_provider.validate_access_token(token)
    }
}

impl std::fmt::Debug for AuthServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceComponent").finish_non_exhaustive()
    }
}
