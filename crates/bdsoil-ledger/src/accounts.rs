//! User accounts: registration, login and profile maintenance.
//!
//! Text fields are trimmed and must be non-empty. Passwords are taken
//! verbatim.

use bdsoil_db::{NewUser, ProfileUpdate, UserStore};
use bdsoil_types::{User, UserId};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password};
use crate::error::LedgerError;

/// Details supplied at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Desired login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// National id number.
    pub national_id: String,
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
}

/// Replacement profile details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChanges {
    /// New login name.
    pub username: String,
    /// New national id number.
    pub national_id: String,
    /// New full name.
    pub name: String,
    /// New phone number.
    pub phone: String,
    /// Profile picture path. Blank clears it.
    pub profile_pic: Option<String>,
}

/// Account operations for one store.
pub struct Accounts<'a> {
    pool: &'a SqlitePool,
}

impl<'a> Accounts<'a> {
    /// Bind to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an account.
    pub async fn register(&self, registration: &Registration) -> Result<UserId, LedgerError> {
        let username = required(&registration.username)?;
        if registration.password.is_empty() {
            return Err(all_fields_required());
        }
        let new_user = NewUser {
            username: username.to_owned(),
            password_hash: hash_password(&registration.password),
            national_id: required(&registration.national_id)?.to_owned(),
            name: required(&registration.name)?.to_owned(),
            phone: required(&registration.phone)?.to_owned(),
        };

        let id = UserStore::new(self.pool).insert(&new_user).await?;
        info!(user_id = %id, username, "account registered");
        Ok(id)
    }

    /// Check credentials and return the user's id.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserId, LedgerError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(LedgerError::Validation("Please fill all fields".to_owned()));
        }

        let user = UserStore::new(self.pool).find_by_username(username).await?;
        match user {
            Some(user) if verify_password(&user.password_hash, password) => {
                info!(user_id = %user.id, "login succeeded");
                Ok(user.id)
            }
            _ => {
                warn!(username, "login refused");
                Err(LedgerError::Auth("Invalid credentials".to_owned()))
            }
        }
    }

    /// Fetch the user's profile.
    pub async fn profile(&self, user_id: UserId) -> Result<User, LedgerError> {
        UserStore::new(self.pool)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("user {user_id}")))
    }

    /// Replace the user's profile details.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        changes: &ProfileChanges,
    ) -> Result<User, LedgerError> {
        let update = ProfileUpdate {
            username: required(&changes.username)?.to_owned(),
            national_id: required(&changes.national_id)?.to_owned(),
            name: required(&changes.name)?.to_owned(),
            phone: required(&changes.phone)?.to_owned(),
            profile_pic: changes
                .profile_pic
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(ToOwned::to_owned),
        };

        if !UserStore::new(self.pool).update_profile(user_id, &update).await? {
            return Err(LedgerError::NotFound(format!("user {user_id}")));
        }
        info!(user_id = %user_id, "profile updated");
        self.profile(user_id).await
    }
}

fn all_fields_required() -> LedgerError {
    LedgerError::Validation("All fields are required.".to_owned())
}

fn required(value: &str) -> Result<&str, LedgerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(all_fields_required())
    } else {
        Ok(trimmed)
    }
}
