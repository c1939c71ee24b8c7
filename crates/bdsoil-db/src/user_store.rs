//! Persistence for the `users` table.
//!
//! Column names predate this crate (`password`, `nid`) and are kept so
//! existing database files keep working. Rows map onto
//! [`bdsoil_types::User`].

use bdsoil_types::{User, UserId};
use sqlx::SqlitePool;

use crate::error::DbError;

/// A user row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,
    /// Lowercase hex password hash.
    pub password_hash: String,
    /// National id number.
    pub national_id: String,
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
}

/// Replacement values for a profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New login name.
    pub username: String,
    /// New national id number.
    pub national_id: String,
    /// New full name.
    pub name: String,
    /// New phone number.
    pub phone: String,
    /// New profile picture path, or `None` to clear it.
    pub profile_pic: Option<String>,
}

/// Operations on the `users` table.
pub struct UserStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserStore<'a> {
    /// Create a new user store bound to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::UniqueViolation`] if the username is taken, in
    /// which case nothing is written.
    pub async fn insert(&self, user: &NewUser) -> Result<UserId, DbError> {
        let result = sqlx::query(
            "INSERT INTO users (username, password, nid, name, phone) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.national_id)
        .bind(&user.name)
        .bind(&user.phone)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::from_write(e, &user.username))?;

        let id = UserId(result.last_insert_rowid());
        tracing::debug!(user_id = %id, "Inserted user");
        Ok(id)
    }

    /// Fetch a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DbError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, nid, name, phone, profile_pic FROM users WHERE id = ?",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    /// Fetch a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, nid, name, phone, profile_pic FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    /// Stored password hash for a user.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn password_hash(&self, id: UserId) -> Result<Option<String>, DbError> {
        let hash = sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE id = ?")
            .bind(id.into_inner())
            .fetch_optional(self.pool)
            .await?;
        Ok(hash)
    }

    /// Overwrite a user's profile fields. Returns `false` if no such user.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::UniqueViolation`] if the new username belongs to
    /// another user, in which case nothing is written.
    pub async fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> Result<bool, DbError> {
        let result = sqlx::query(
            "UPDATE users SET username = ?, nid = ?, name = ?, phone = ?, profile_pic = ? WHERE id = ?",
        )
        .bind(&update.username)
        .bind(&update.national_id)
        .bind(&update.name)
        .bind(&update.phone)
        .bind(&update.profile_pic)
        .bind(id.into_inner())
        .execute(self.pool)
        .await
        .map_err(|e| DbError::from_write(e, &update.username))?;
        Ok(result.rows_affected() > 0)
    }
}

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    /// Row id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Password hash.
    pub password: String,
    /// National id number.
    pub nid: String,
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Profile picture path.
    pub profile_pic: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            username: row.username,
            password_hash: row.password,
            national_id: row.nid,
            name: row.name,
            phone: row.phone,
            profile_pic: row.profile_pic,
        }
    }
}
