//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`sqlx`] errors with context about what failed.

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `SQLite` operation failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    /// A username is already taken. The write was not applied.
    #[error("username already exists: {0}")]
    UniqueViolation(String),

    /// A stored row could not be mapped to a domain record.
    #[error("invalid {table} row {id}: {reason}")]
    InvalidRow {
        /// Table the row came from.
        table: &'static str,
        /// Row id.
        id: i64,
        /// What was wrong with it.
        reason: String,
    },

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DbError {
    /// Map a write failure, turning a `UNIQUE` constraint violation on
    /// `username` into [`DbError::UniqueViolation`].
    pub(crate) fn from_write(err: sqlx::Error, username: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::UniqueViolation(username.to_owned())
            }
            _ => Self::Sqlite(err),
        }
    }
}
