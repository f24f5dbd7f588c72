//! Todo list entity and name validation

use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for list names
const MAX_LIST_NAME_LEN: usize = 100;

/// A todo list row.
///
/// Owns zero or more [`Todo`](super::Todo) rows via `todos.list_id`;
/// deleting a list cascades to them at the schema level.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TodoList {
    pub id: i64,
    pub name: String,
}

/// Validated list name (non-empty after trimming, bounded length)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListName(String);

impl ListName {
    /// Create a new list name.
    ///
    /// Leading/trailing whitespace is trimmed; the result must be
    /// non-empty and at most 100 characters.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "list name" });
        }

        if trimmed.chars().count() > MAX_LIST_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "list name",
                max: MAX_LIST_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the list name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ListName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
