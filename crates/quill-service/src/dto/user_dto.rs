//! User DTOs.

use super::{empty_payload, trimmed};
use chrono::{DateTime, Utc};
use quill_core::{check_length, rules, validation_errors_to_quill_error, Patch, QuillError, QuillResult, UserId};
use quill_domain::{Email, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 40;
pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 40;

/// Partial profile update. Any subset of the fields may be supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub first_name: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub last_name: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub password: Patch<String>,
}

/// A validated profile update; the password is still in clear text.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub password: Option<String>,
}

impl ProfileUpdate {
    /// Returns true if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
    }
}

impl UpdateUserRequest {
    /// Validates the supplied fields.
    pub fn into_update(self) -> QuillResult<ProfileUpdate> {
        let first_name = self.first_name.map(trimmed).into_required("first_name")?;
        let last_name = self.last_name.map(trimmed).into_required("last_name")?;
        let email = self.email.into_required("email")?;
        let password = self.password.map(trimmed).into_required("password")?;

        if let Some(name) = &first_name {
            check_length("first_name", name, NAME_MIN, NAME_MAX)?;
        }
        if let Some(name) = &last_name {
            check_length("last_name", name, NAME_MIN, NAME_MAX)?;
        }
        if let Some(password) = &password {
            check_password(password)?;
        }
        let email = email
            .map(|raw| Email::new(raw).map_err(|e| QuillError::validation(format!("email: {e}"))))
            .transpose()?;

        let update = ProfileUpdate {
            first_name,
            last_name,
            email,
            password,
        };
        if update.is_empty() {
            return Err(empty_payload());
        }
        Ok(update)
    }
}

/// Checks length and composition of a new password.
pub fn check_password(password: &str) -> QuillResult<()> {
    check_length("password", password, PASSWORD_MIN, PASSWORD_MAX)?;
    rules::password_strength(password).map_err(password_error)
}

fn password_error(error: ValidationError) -> QuillError {
    let mut errors = ValidationErrors::new();
    errors.add("password", error);
    validation_errors_to_quill_error(errors)
}

/// User response DTO. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self::from(user.clone())
    }
}
