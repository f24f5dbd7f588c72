//! Todo entity and description validation

use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for todo descriptions
const MAX_DESCRIPTION_LEN: usize = 500;

/// A todo row.
///
/// `list_id` always references an existing `todo_lists` row; the
/// foreign key is enforced by the storage engine.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Todo {
    pub id: i64,
    pub description: String,
    pub completed: bool,
    pub list_id: i64,
}

/// Validated todo description (non-empty after trimming, bounded length)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDescription(String);

impl TodoDescription {
    /// Create a new todo description.
    ///
    /// Leading/trailing whitespace is trimmed; the result must be
    /// non-empty and at most 500 characters.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "description",
            });
        }

        if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description",
                max: MAX_DESCRIPTION_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the description as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TodoDescription {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_descriptions() {
        assert!(TodoDescription::new("Buy milk").is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = TodoDescription::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn max_length() {
        let desc_500 = "a".repeat(500);
        assert!(TodoDescription::new(&desc_500).is_ok());

        let desc_501 = "a".repeat(501);
        let err = TodoDescription::new(&desc_501).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 500, .. }));
    }
}
