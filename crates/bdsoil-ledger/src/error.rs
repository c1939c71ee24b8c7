//! Error types for the `bdsoil-ledger` crate.
//!
//! The variants follow what the user is told: bad input, refused
//! credentials, a taken username, or a record that is not theirs.

use bdsoil_db::DbError;

/// Errors returned by ledger and account operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Input failed validation. Nothing was written.
    #[error("{0}")]
    Validation(String),

    /// Credentials did not match. Nothing was written.
    #[error("{0}")]
    Auth(String),

    /// The username belongs to another account. Nothing was written.
    #[error("username {0:?} already exists")]
    DuplicateUsername(String),

    /// The record does not exist or belongs to someone else.
    #[error("{0} not found")]
    NotFound(String),

    /// The store failed.
    #[error("database error: {0}")]
    Db(DbError),
}

impl From<DbError> for LedgerError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(username) => Self::DuplicateUsername(username),
            other => Self::Db(other),
        }
    }
}
