//! `SQLite` connection pool and schema.
//!
//! The store is a single `SQLite` file. Uses [`sqlx`] with runtime query
//! construction so no database is needed at build time. All queries are
//! parameterized.
//!
//! Schema changes are additive and applied in code on every start by
//! [`SqliteDatabase::ensure_schema`]: tables are created if missing and
//! columns added later (`users.profile_pic`) are added with
//! `ALTER TABLE` when an older file lacks them. Older files also declare
//! `lands.gps_coords` as `NOT NULL`; that table is rebuilt once with the
//! column nullable, keeping every row and id.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use crate::error::DbError;

/// Default maximum number of connections in the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default connection timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// URL of a private in-memory database.
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

const CREATE_USERS: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    nid TEXT NOT NULL,
    name TEXT NOT NULL,
    phone TEXT NOT NULL
)";

const CREATE_LANDS: &str = r"
CREATE TABLE IF NOT EXISTS lands (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    location TEXT NOT NULL,
    area REAL NOT NULL,
    soil_type TEXT NOT NULL,
    gps_coords TEXT,
    FOREIGN KEY (user_id) REFERENCES users (id)
)";

const CREATE_LANDS_REBUILD: &str = r"
CREATE TABLE lands_rebuild (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    location TEXT NOT NULL,
    area REAL NOT NULL,
    soil_type TEXT NOT NULL,
    gps_coords TEXT,
    FOREIGN KEY (user_id) REFERENCES users (id)
)";

/// Configuration for the `SQLite` connection pool.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database URL, e.g. `sqlite://bdsoil.db` or `sqlite::memory:`.
    pub url: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl SqliteConfig {
    /// Create a new configuration from a database URL.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// A private in-memory database.
    ///
    /// Every `SQLite` in-memory connection is its own database, so the pool
    /// is capped at one connection that is never recycled.
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_URL).with_max_connections(1)
    }

    /// Set the maximum number of connections.
    #[must_use]
    pub const fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Connection pool handle to the `SQLite` store.
#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if needed) the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the URL cannot be parsed and
    /// [`DbError::Sqlite`] if the connection fails.
    pub async fn connect(config: &SqliteConfig) -> Result<Self, DbError> {
        let connect_options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| DbError::Config(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout);
        if config.is_in_memory() {
            options = options.idle_timeout(None).max_lifetime(None);
        }
        let pool = options.connect_with(connect_options).await?;

        tracing::info!(
            max_connections = config.max_connections,
            in_memory = config.is_in_memory(),
            "Connected to SQLite"
        );

        Ok(Self { pool })
    }

    /// Connect using a database URL string with default pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the connection fails.
    pub async fn connect_url(url: &str) -> Result<Self, DbError> {
        Self::connect(&SqliteConfig::new(url)).await
    }

    /// Create missing tables, add missing columns and relax a legacy
    /// `NOT NULL` on `lands.gps_coords`.
    ///
    /// Idempotent. Existing row contents and ids are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if any statement fails.
    pub async fn ensure_schema(&self) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(CREATE_USERS).execute(&mut *tx).await?;

        let columns: Vec<String> = sqlx::query("PRAGMA table_info(users)")
            .fetch_all(&mut *tx)
            .await?
            .iter()
            .map(|row| row.try_get::<String, _>("name"))
            .collect::<Result<_, _>>()?;
        if !columns.iter().any(|c| c == "profile_pic") {
            sqlx::query("ALTER TABLE users ADD COLUMN profile_pic TEXT")
                .execute(&mut *tx)
                .await?;
            tracing::info!("Added users.profile_pic column");
        }

        sqlx::query(CREATE_LANDS).execute(&mut *tx).await?;

        let gps_not_null = sqlx::query("PRAGMA table_info(lands)")
            .fetch_all(&mut *tx)
            .await?
            .iter()
            .map(|row| -> Result<(String, i64), sqlx::Error> {
                Ok((row.try_get("name")?, row.try_get("notnull")?))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .any(|(name, not_null)| name == "gps_coords" && not_null != 0);
        if gps_not_null {
            sqlx::query(CREATE_LANDS_REBUILD).execute(&mut *tx).await?;
            sqlx::query(
                "INSERT INTO lands_rebuild (id, user_id, location, area, soil_type, gps_coords) \
                 SELECT id, user_id, location, area, soil_type, gps_coords FROM lands",
            )
            .execute(&mut *tx)
            .await?;
            sqlx::query("DROP TABLE lands").execute(&mut *tx).await?;
            sqlx::query("ALTER TABLE lands_rebuild RENAME TO lands")
                .execute(&mut *tx)
                .await?;
            tracing::info!("Rebuilt lands table with nullable gps_coords");
        }

        tx.commit().await?;
        tracing::info!("Database schema ensured");
        Ok(())
    }

    /// Return a reference to the underlying [`SqlitePool`].
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all connections in the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("SQLite pool closed");
    }
}
