//! Process-wide state and the authentication gate.
//!
//! [`App::open`] loads the reference catalog, connects to the store and
//! makes sure the schema exists. Every command except `register` then goes
//! through [`App::authenticate`] before touching user data.

use bdsoil_catalog::Catalog;
use bdsoil_db::SqliteDatabase;
use bdsoil_ledger::{Accounts, LandLedger};
use bdsoil_types::UserId;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppError;

/// Username and password as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Login name.
    pub username: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

impl Credentials {
    /// The username, or an empty string when none was given.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    /// The password, or an empty string when none was given.
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}

/// Loaded configuration, catalog and store.
pub struct App {
    /// Effective configuration.
    pub config: AppConfig,
    /// Reference tables and market prices.
    pub catalog: Catalog,
    db: SqliteDatabase,
}

impl App {
    /// Load the catalog, connect to the store and ensure its schema.
    pub async fn open(config: AppConfig) -> Result<Self, AppError> {
        let catalog = Catalog::load(&config.catalog_sources());
        Self::with_catalog(config, catalog).await
    }

    /// Like [`App::open`] but with an already-built catalog.
    pub async fn with_catalog(config: AppConfig, catalog: Catalog) -> Result<Self, AppError> {
        let db = SqliteDatabase::connect(&config.sqlite_config()).await?;
        db.ensure_schema().await?;
        info!(url = %config.database.url, "store ready");
        Ok(Self { config, catalog, db })
    }

    /// Account operations.
    pub const fn accounts(&self) -> Accounts<'_> {
        Accounts::new(self.db.pool())
    }

    /// Land operations.
    pub const fn lands(&self) -> LandLedger<'_> {
        LandLedger::new(self.db.pool())
    }

    /// Log in with the given credentials.
    ///
    /// Missing credentials are reported the same way as blank ones.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, AppError> {
        let user_id = self
            .accounts()
            .login(credentials.username(), credentials.password())
            .await?;
        Ok(user_id)
    }

    /// Close the pool.
    pub async fn close(&self) {
        self.db.close().await;
    }
}
