//! Database error type shared by the repositories

use sqlx::error::ErrorKind;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },

    #[error("constraint violation: {0}")]
    Constraint(String),
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        // FK and NOT NULL failures carry meaning for callers (409 vs 500),
        // so pull them out of the generic database error.
        if let sqlx::Error::Database(db_err) = &e {
            match db_err.kind() {
                ErrorKind::ForeignKeyViolation | ErrorKind::NotNullViolation => {
                    return Self::Constraint(db_err.message().to_owned());
                }
                _ => {}
            }
        }
        Self::Sqlx(e)
    }
}
