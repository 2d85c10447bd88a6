//! Authentication-related DTOs.

use super::{check_password, trimmed, UserResponse};
use quill_core::{QuillResult, ValidateExt};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 40, message = "First name must be 3-40 characters"))]
    pub first_name: String,

    #[validate(length(min = 3, max = 40, message = "Last name must be 3-40 characters"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub password: String,
}

impl RegisterRequest {
    /// Trims the request and checks every field.
    pub fn validated(self) -> QuillResult<Self> {
        let request = Self {
            first_name: trimmed(self.first_name),
            last_name: trimmed(self.last_name),
            email: trimmed(self.email),
            password: trimmed(self.password),
        };
        request.validate_request()?;
        check_password(&request.password)?;
        Ok(request)
    }
}

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Authentication response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}
