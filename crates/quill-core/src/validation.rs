//! Validation utilities.

use crate::{FieldError, QuillError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `QuillError` on failure.
    fn validate_request(&self) -> Result<(), QuillError> {
        self.validate().map_err(validation_errors_to_quill_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `QuillError`.
#[must_use]
pub fn validation_errors_to_quill_error(errors: ValidationErrors) -> QuillError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    QuillError::Validation(message)
}

/// Checks that `value` has between `min` and `max` characters.
pub fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), QuillError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(QuillError::validation(format!(
            "{field}: must be between {min} and {max} characters"
        )));
    }
    Ok(())
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Characters allowed in a password besides ASCII letters and digits.
    pub const PASSWORD_SYMBOLS: &[char] = &['@', '$', '#', '_', '-'];

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates password composition.
    ///
    /// Requires a lowercase letter, an uppercase letter, a digit and one of
    /// [`PASSWORD_SYMBOLS`], and nothing outside those classes. Length is
    /// checked separately.
    pub fn password_strength(password: &str) -> Result<(), ValidationError> {
        if !password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(&c))
        {
            return Err(ValidationError::new("password_invalid_characters")
                .with_message("Password may only contain letters, digits and @$#_-".into()));
        }

        let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
        let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(&c));

        if !(has_uppercase && has_lowercase && has_digit && has_symbol) {
            return Err(ValidationError::new("password_too_weak").with_message(
                "Password needs an uppercase letter, a lowercase letter, a digit and one of @$#_-"
                    .into(),
            ));
        }

        Ok(())
    }
}
