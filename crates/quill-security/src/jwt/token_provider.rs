//! JWT token provider for creating and validating tokens.

use super::Claims;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use quill_config::SecurityConfig;
use quill_core::{Interface, QuillError, QuillResult, UserId};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, warn};

/// A signed access token.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// Encoded JWT.
    pub token: String,
    /// Expiration time.
    pub expires_at: DateTime<Utc>,
    /// Token type (always "Bearer").
    pub token_type: String,
}

/// Interface for issuing and checking bearer tokens.
pub trait TokenProviderInterface: Interface + Send + Sync {
    /// Issues an access token identifying `user_id`.
    fn issue_access_token(&self, user_id: UserId, email: &str) -> QuillResult<AccessToken>;

    /// Validates a token and returns its claims.
    fn validate_access_token(&self, token: &str) -> QuillResult<Claims>;
}

/// JWT token provider service (HS256).
#[derive(Component, Clone)]
#[shaku(interface = TokenProviderInterface)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Returns the encoding key (for building the DI module).
    #[must_use]
    pub const fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key (for building the DI module).
    #[must_use]
    pub const fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Returns the validation rules (for building the DI module).
    #[must_use]
    pub const fn validation(&self) -> &Validation {
        &self.validation
    }
}

impl TokenProviderInterface for TokenProvider {
    fn issue_access_token(&self, user_id: UserId, email: &str) -> QuillResult<AccessToken> {
        let lifetime = i64::try_from(self.config.jwt_access_expiration_secs).unwrap_or(i64::MAX);
        let expires_at = Utc::now() + Duration::seconds(lifetime);

        let claims = Claims::new_access(
            user_id,
            email.to_string(),
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| QuillError::Internal(format!("Failed to generate access token: {e}")))?;

        debug!("Generated access token for user {}", user_id);
        Ok(AccessToken {
            token,
            expires_at,
            token_type: "Bearer".to_string(),
        })
    }

    fn validate_access_token(&self, token: &str) -> QuillResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                warn!("Token validation failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => QuillError::TokenExpired,
                    ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                        QuillError::InvalidToken("Invalid token signature".to_string())
                    }
                    ErrorKind::InvalidIssuer => {
                        QuillError::InvalidToken("Invalid token issuer".to_string())
                    }
                    ErrorKind::InvalidAudience => {
                        QuillError::InvalidToken("Invalid token audience".to_string())
                    }
                    _ => QuillError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
