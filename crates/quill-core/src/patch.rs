//! Tri-state field for partial updates.

use crate::{QuillError, QuillResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field of a partial update.
///
/// Distinguishes a field left out of the payload from one explicitly set to
/// `null`. Use with `#[serde(default)]` so absent keys become [`Patch::Missing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not supplied.
    Missing,
    /// The field was supplied as `null`.
    Null,
    /// The field was supplied with a value.
    Value(T),
}

impl<T> Patch<T> {
    /// Returns true if the field was not supplied at all.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns true if the field was supplied, as a value or as `null`.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !self.is_missing()
    }

    /// Returns the supplied value, if any.
    #[must_use]
    pub const fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Missing | Self::Null => None,
        }
    }

    /// Maps the supplied value, keeping `Missing` and `Null` as they are.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Self::Missing => Patch::Missing,
            Self::Null => Patch::Null,
            Self::Value(value) => Patch::Value(f(value)),
        }
    }

    /// Resolves a patch on a field that cannot be cleared.
    ///
    /// `Missing` means "leave unchanged" and yields `None`; `Null` is rejected.
    pub fn into_required(self, field: &str) -> QuillResult<Option<T>> {
        match self {
            Self::Missing => Ok(None),
            Self::Null => Err(QuillError::validation(format!("{field} cannot be null"))),
            Self::Value(value) => Ok(Some(value)),
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Missing | Self::Null => serializer.serialize_none(),
        }
    }
}
