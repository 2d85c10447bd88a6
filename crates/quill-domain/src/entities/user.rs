//! User entity.

use super::Owned;
use crate::Email;
use chrono::{DateTime, Utc};
use quill_core::UserId;
use serde::Serialize;

/// A registered account.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Email address, unique across all users.
    pub email: Email,

    /// Argon2 password hash (never exposed via API).
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a freshly generated id.
    #[must_use]
    pub fn new(email: Email, password_hash: String, first_name: String, last_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            password_hash,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the user's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies a profile change set in place.
    pub fn apply(&mut self, changes: &UserChanges) {
        if let Some(first_name) = &changes.first_name {
            self.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &changes.last_name {
            self.last_name.clone_from(last_name);
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(password_hash) = &changes.password_hash {
            self.password_hash.clone_from(password_hash);
        }
        self.updated_at = Utc::now();
    }
}

/// An account owns itself: only the user may change or delete it.
impl Owned for User {
    fn owner_id(&self) -> UserId {
        self.id
    }
}

/// Fields of a profile update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    /// Returns true if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
    }
}
